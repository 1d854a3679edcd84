//! Statistics storage backends
//!
//! Provides the JSON file backend used by the server and an in-memory backend
//! for tests and throwaway sessions.

use async_trait::async_trait;
use dsadash_core::{storage_error, DashError, DashResult, ErrorContext, StatisticsDocument};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Statistics storage trait for different persistence backends
#[async_trait]
pub trait StatisticsStorage: Send + Sync {
    /// Load the document; `None` when nothing has been persisted yet
    async fn load(&self) -> DashResult<Option<StatisticsDocument>>;

    /// Replace the persisted document
    async fn save(&self, document: &StatisticsDocument) -> DashResult<()>;
}

/// Pretty-printed JSON file (two-space indentation)
#[derive(Debug, Clone)]
pub struct JsonFileStatisticsStorage {
    path: PathBuf,
}

impl JsonFileStatisticsStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StatisticsStorage for JsonFileStatisticsStorage {
    async fn load(&self) -> DashResult<Option<StatisticsDocument>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No statistics persisted yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(storage_error!(
                    format!("Failed to read statistics from {}: {}", self.path.display(), e),
                    "json_statistics_storage",
                    e
                ));
            }
        };

        let document = serde_json::from_str(&content).map_err(|e| DashError::Parse {
            message: format!("Malformed statistics file {}: {}", self.path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("json_statistics_storage")
                .with_operation("load")
                .with_metadata("path", &self.path.to_string_lossy())
                .with_suggestion("Fix or remove the statistics file"),
        })?;

        Ok(Some(document))
    }

    async fn save(&self, document: &StatisticsDocument) -> DashResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                storage_error!(
                    format!("Failed to create {}: {}", parent.display(), e),
                    "json_statistics_storage",
                    e
                )
            })?;
        }

        let json = serde_json::to_string_pretty(document)?;

        // Write next to the target and rename so readers never see a partial file
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await.map_err(|e| {
            storage_error!(
                format!("Failed to write statistics to {}: {}", temp.display(), e),
                "json_statistics_storage",
                e
            )
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            storage_error!(
                format!("Failed to replace {}: {}", self.path.display(), e),
                "json_statistics_storage",
                e
            )
        })?;

        info!(path = %self.path.display(), "Saved statistics");
        Ok(())
    }
}

/// In-memory statistics storage
#[derive(Debug, Default)]
pub struct MemoryStatisticsStorage {
    document: Arc<RwLock<Option<StatisticsDocument>>>,
}

impl MemoryStatisticsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: StatisticsDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document))),
        }
    }
}

#[async_trait]
impl StatisticsStorage for MemoryStatisticsStorage {
    async fn load(&self) -> DashResult<Option<StatisticsDocument>> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &StatisticsDocument) -> DashResult<()> {
        *self.document.write().await = Some(document.clone());
        debug!("Saved statistics to memory storage");
        Ok(())
    }
}
