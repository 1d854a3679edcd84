//! Configuration management

use crate::error::{DashError, DashResult, ErrorContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Directory holding the markdown problem files
    pub root: PathBuf,
    /// Entry names skipped during the walk, in addition to dot-prefixed names
    pub ignored_names: Vec<String>,
    /// Extension (without dot) of files that get problem metadata
    pub markdown_extension: String,
    /// Drop directories that end up with no children after filtering
    pub prune_empty_dirs: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data/DSA"),
            ignored_names: vec![
                "node_modules".to_string(),
                "frontend".to_string(),
                ".git".to_string(),
            ],
            markdown_extension: "md".to_string(),
            prune_empty_dirs: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Location of the persisted statistics document
    pub statistics_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            statistics_path: PathBuf::from("./data/statistics.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            storage: StorageConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DashResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DashError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: DashConfig = toml::from_str(&content).map_err(|e| DashError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> DashResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| DashError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| DashError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> DashResult<()> {
        if self.repository.root.as_os_str().is_empty() {
            return Err(DashError::Config {
                message: "Repository root must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set repository.root to the problems directory"),
            });
        }

        let extension = self.repository.markdown_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(DashError::Config {
                message: "Markdown extension must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set repository.markdown_extension, e.g. \"md\""),
            });
        }

        if let Some(name) = self
            .repository
            .ignored_names
            .iter()
            .find(|name| name.is_empty() || name.contains('/') || name.contains('\\'))
        {
            return Err(DashError::Config {
                message: format!("Ignored name '{}' must be a single path component", name),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("List bare directory or file names in ignored_names"),
            });
        }

        if self.storage.statistics_path.as_os_str().is_empty() {
            return Err(DashError::Config {
                message: "Statistics path must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.statistics_path to a JSON file location"),
            });
        }

        if self.server.port == 0 {
            return Err(DashError::Config {
                message: "Server port must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set server.port to a positive value"),
            });
        }

        Ok(())
    }
}
