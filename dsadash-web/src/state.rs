//! Application state shared by every handler

use crate::WebConfig;
use dsadash_repo::RepositoryProcessor;
use dsadash_stats::StatisticsService;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Handles to the repository walker and the statistics store.
///
/// Built once by whoever composes the server and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub config: WebConfig,
    pub repository: Arc<RepositoryProcessor>,
    pub statistics: Arc<StatisticsService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: WebConfig) -> Self {
        let repository = Arc::new(RepositoryProcessor::from_config(&config.repository));
        let statistics = Arc::new(StatisticsService::from_config(&config.storage));

        info!(
            root = %config.repository.root.display(),
            statistics = %config.storage.statistics_path.display(),
            "Application state initialized"
        );

        Self::with_services(config, repository, statistics)
    }

    /// Assemble state from existing services, e.g. an in-memory statistics store
    pub fn with_services(
        config: WebConfig,
        repository: Arc<RepositoryProcessor>,
        statistics: Arc<StatisticsService>,
    ) -> Self {
        Self {
            config,
            repository,
            statistics,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
