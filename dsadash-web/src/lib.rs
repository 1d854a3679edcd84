//! DSA Dashboard Web Server
//!
//! HTTP API over the problems repository and the statistics document.

pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use server::{DashServer, DashServerBuilder};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use dsadash_core::{
    DashConfig, DashError, ErrorKind, LoggingConfig, RepositoryConfig, StorageConfig,
};
use serde_json::json;
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state)
}

/// Number of consecutive ports tried when the configured one is taken
pub const DEFAULT_PORT_ATTEMPTS: u16 = 5;

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// First port to try
    pub port: u16,
    /// How many ports to try, starting at `port`
    pub port_attempts: u16,
    pub repository: RepositoryConfig,
    pub storage: StorageConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_dash_config(&DashConfig::default())
    }
}

impl WebConfig {
    pub fn from_dash_config(config: &DashConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            repository: config.repository.clone(),
            storage: config.storage.clone(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> WebResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from `DSADASH_*` variables supplied by `lookup`.
    ///
    /// `DSADASH_CONFIG` names a TOML file used as the base; the other variables
    /// override single fields of it.
    pub fn from_lookup<F>(lookup: F) -> WebResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup("DSADASH_CONFIG") {
            Some(path) => DashConfig::from_file(path)?,
            None => DashConfig::default(),
        };
        let mut config = Self::from_dash_config(&base);

        if let Some(host) = lookup("DSADASH_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("DSADASH_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid DSADASH_PORT"),
            }
        }
        if let Some(root) = lookup("DSADASH_REPO_ROOT") {
            config.repository.root = PathBuf::from(root);
        }
        if let Some(path) = lookup("DSADASH_STATISTICS_PATH") {
            config.storage.statistics_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the settings shared with the TOML configuration
    pub fn validate(&self) -> WebResult<()> {
        if self.port_attempts == 0 {
            return Err(WebError::Config(
                "port_attempts must be at least 1".to_string(),
            ));
        }
        let dash = DashConfig {
            repository: self.repository.clone(),
            storage: self.storage.clone(),
            server: dsadash_core::ServerConfig {
                host: self.host.clone(),
                port: self.port,
            },
        };
        dash.validate()?;
        Ok(())
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Dash(#[from] DashError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Dash(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::IoFailure | ErrorKind::ParseFailure | ErrorKind::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            WebError::Server(_) | WebError::Config(_) | WebError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                WebError::Dash(e) => e.log(),
                other => tracing::error!(error = %other, "Request failed"),
            }
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

/// Initialize logging for the web server
pub fn init_logging(log_level: &str) -> WebResult<()> {
    let mut config = LoggingConfig {
        level: log_level.to_string(),
        ..LoggingConfig::default()
    };
    config.filter_directives = vec![
        format!("dsadash_web={}", log_level),
        format!("dsadash_repo={}", log_level),
        format!("dsadash_stats={}", log_level),
        "tower_http=debug".to_string(),
    ];

    dsadash_core::init_logging(&config)
        .map_err(|e| WebError::Config(format!("Failed to initialize logging: {}", e)))
}
