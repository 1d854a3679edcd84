//! Statistics service - serialized access to the statistics document

use crate::mutations::{apply_add_problem, apply_problem_status};
use crate::storage::{JsonFileStatisticsStorage, StatisticsStorage};
use dsadash_core::{
    log_operation_error, log_operation_start, log_operation_success, performance,
    validation_error, DashResult, ProblemDetail, StatisticsDocument, StorageConfig,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Owns the storage handle and runs every load-mutate-save cycle under one lock,
/// so concurrent requests within a process never lose each other's updates.
pub struct StatisticsService {
    storage: Arc<dyn StatisticsStorage>,
    lock: Mutex<()>,
}

impl StatisticsService {
    pub fn new(storage: Arc<dyn StatisticsStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(Arc::new(JsonFileStatisticsStorage::new(
            &config.statistics_path,
        )))
    }

    pub async fn load(&self) -> DashResult<Option<StatisticsDocument>> {
        let _guard = self.lock.lock().await;
        performance::measure_async("load_statistics", self.storage.load()).await
    }

    /// Replace the whole document after checking its counters
    pub async fn save(&self, document: &StatisticsDocument) -> DashResult<()> {
        if let Err(message) = document.check_consistency() {
            return Err(validation_error!(message, "statistics", "statistics_service"));
        }

        let _guard = self.lock.lock().await;
        log_operation_start!("save_statistics");
        match self.storage.save(document).await {
            Ok(()) => {
                log_operation_success!("save_statistics", total = document.total_problems);
                Ok(())
            }
            Err(e) => {
                log_operation_error!("save_statistics", e);
                Err(e)
            }
        }
    }

    /// Flip one problem's solved flag.
    ///
    /// Returns `None` when no document has been persisted. Unknown problems and
    /// unchanged states return the current document without writing it back.
    pub async fn update_problem_status(
        &self,
        topic: &str,
        problem_name: &str,
        solved: bool,
    ) -> DashResult<Option<StatisticsDocument>> {
        let _guard = self.lock.lock().await;

        let Some(mut document) = self.storage.load().await? else {
            return Ok(None);
        };

        if apply_problem_status(&mut document, topic, problem_name, solved) {
            self.storage.save(&document).await?;
            log_operation_success!(
                "update_problem_status",
                topic = topic,
                problem = problem_name,
                solved = solved
            );
        } else {
            debug!(topic, problem = problem_name, "Problem status unchanged");
        }

        Ok(Some(document))
    }

    /// Track a new problem, starting an empty document when none exists
    pub async fn add_problem(
        &self,
        topic: &str,
        problem: ProblemDetail,
    ) -> DashResult<StatisticsDocument> {
        if topic.trim().is_empty() {
            return Err(validation_error!("Topic is required", "topic", "statistics_service"));
        }
        if problem.name.trim().is_empty() {
            return Err(validation_error!(
                "Problem name is required",
                "problem.name",
                "statistics_service"
            ));
        }

        let _guard = self.lock.lock().await;

        let mut document = self.storage.load().await?.unwrap_or_default();
        let name = problem.name.clone();
        apply_add_problem(&mut document, topic, problem);
        self.storage.save(&document).await?;

        log_operation_success!("add_problem", topic = topic, problem = %name);
        Ok(document)
    }
}

impl std::fmt::Debug for StatisticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticsService").finish_non_exhaustive()
    }
}
