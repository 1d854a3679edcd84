//! Dashboard web server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main dashboard web server
pub struct DashServer {
    config: WebConfig,
    state: AppState,
}

impl DashServer {
    /// Create a new server after validating its configuration
    pub fn new(config: WebConfig) -> WebResult<Self> {
        config.validate()?;
        let state = AppState::new(config.clone());

        Ok(Self { config, state })
    }

    /// Start the web server and block until shutdown
    pub async fn start(self) -> WebResult<()> {
        let listener = bind_with_fallback(&self.config).await?;
        let address = listener.local_addr()?;

        info!("Server listening on http://{}", address);

        let app = create_app(self.state.clone());

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down gracefully");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Bind the configured port, moving to the next one while the port is taken
pub async fn bind_with_fallback(config: &WebConfig) -> WebResult<TcpListener> {
    let mut last_error = None;

    for offset in 0..config.port_attempts {
        let Some(port) = config.port.checked_add(offset) else {
            break;
        };
        let address = format!("{}:{}", config.host, port);

        match TcpListener::bind(&address).await {
            Ok(listener) => {
                if offset > 0 {
                    warn!(
                        requested = config.port,
                        bound = port,
                        "Configured port was busy, using a fallback port"
                    );
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                warn!(address = %address, "Port already in use");
                last_error = Some(e);
            }
            Err(e) => return Err(WebError::Server(e)),
        }
    }

    Err(WebError::Server(last_error.unwrap_or_else(|| {
        std::io::Error::new(ErrorKind::AddrInUse, "no port available")
    })))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Builder for DashServer
pub struct DashServerBuilder {
    config: WebConfig,
}

impl DashServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: WebConfig) -> Self {
        Self { config }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set how many consecutive ports may be tried
    pub fn port_attempts(mut self, attempts: u16) -> Self {
        self.config.port_attempts = attempts;
        self
    }

    /// Set the problems directory
    pub fn repository_root<P: Into<std::path::PathBuf>>(mut self, root: P) -> Self {
        self.config.repository.root = root.into();
        self
    }

    /// Set the statistics file location
    pub fn statistics_path<P: Into<std::path::PathBuf>>(mut self, path: P) -> Self {
        self.config.storage.statistics_path = path.into();
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<DashServer> {
        DashServer::new(self.config)
    }
}

impl Default for DashServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = DashServer::new(WebConfig::default());
        assert!(server.is_ok());
    }

    #[test]
    fn test_server_builder() {
        let builder = DashServerBuilder::new()
            .host("localhost")
            .port(4000)
            .port_attempts(2)
            .repository_root("/srv/DSA");

        assert_eq!(builder.config.host, "localhost");
        assert_eq!(builder.config.port, 4000);
        assert_eq!(builder.config.port_attempts, 2);
        assert_eq!(
            builder.config.repository.root,
            std::path::PathBuf::from("/srv/DSA")
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(DashServerBuilder::new().port(0).build().is_err());
    }

    #[tokio::test]
    async fn test_port_fallback() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let busy_port = taken.local_addr().unwrap().port();

        let config = WebConfig {
            host: "127.0.0.1".to_string(),
            port: busy_port,
            port_attempts: 5,
            ..WebConfig::default()
        };

        let listener = bind_with_fallback(&config).await.unwrap();
        let bound = listener.local_addr().unwrap().port();
        assert_ne!(bound, busy_port);
        assert!(bound > busy_port && bound < busy_port.saturating_add(5));
    }

    #[tokio::test]
    async fn test_single_attempt_on_busy_port_fails() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = WebConfig {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
            port_attempts: 1,
            ..WebConfig::default()
        };

        assert!(matches!(
            bind_with_fallback(&config).await,
            Err(WebError::Server(_))
        ));
    }
}
