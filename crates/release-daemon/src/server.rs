//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use release_registry::{InMemoryReleaseManager, ReleaseManager};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Release manager daemon server
pub struct Server {
    config: DaemonConfig,
    manager: Arc<dyn ReleaseManager>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        Ok(Self {
            config,
            manager: Arc::new(InMemoryReleaseManager::new()),
        })
    }

    /// Run the server until Ctrl+C or SIGTERM
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.manager.clone());
        let app = create_router(state, &self.config.server);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Release manager listening on {}", addr);

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        let stats = self.manager.stats().await;
        tracing::info!(
            services = stats.services,
            snapshots = stats.snapshots,
            "Release manager shutting down"
        );

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
