//! lpsheet API Server implementation
//!
//! HTTP server using Axum. Exposes the plain-text trigger used by the
//! spreadsheet workflow plus JSON endpoints for integrations.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::config::AppConfig;
use crate::core::{run_workbook, MicrolpOracle, Oracle, RunOutcome};
use crate::error::{LpSheetError, LpSheetResult};

/// Shared application state
pub struct AppState {
    pub version: String,
    pub config: AppConfig,
    pub oracle: Arc<dyn Oracle>,
    /// Held for the whole of a run so overlapping triggers do not
    /// interleave their clear/write steps. The guard moves into the
    /// blocking task, so a dropped request still holds it until the run ends.
    run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: AppConfig, oracle: Arc<dyn Oracle>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            oracle,
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run the pipeline against the configured workbook on the blocking pool
    pub async fn run_pipeline(self: &Arc<Self>) -> LpSheetResult<RunOutcome> {
        let guard = Arc::clone(&self.run_lock).lock_owned().await;
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            run_workbook(&state.config, state.oracle.as_ref())
        })
        .await
        .map_err(|e| LpSheetError::Internal(format!("solver task failed: {}", e)))?
    }
}

/// Build the router (also used directly by tests)
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Plain-text trigger surface
        .route("/", get(handlers::root))
        .route("/trigger", get(handlers::trigger))
        // Health and info endpoints
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // JSON API
        .route("/api/v1/solve", post(handlers::solve))
        .route("/api/v1/parse", post(handlers::parse))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let workbook = config.workbook.input.display().to_string();
    let state = Arc::new(AppState::new(config, Arc::new(MicrolpOracle::new())));
    let app = router(state);

    info!("🔥 lpsheet server starting on http://{}", addr);
    info!("   Workbook: {}", workbook);
    info!("   Trigger: GET /trigger, JSON: POST /api/v1/solve, /api/v1/parse");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("lpsheet server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_state_version() {
        let state = AppState::new(AppConfig::default(), Arc::new(MicrolpOracle::new()));
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_run_pipeline_missing_workbook() {
        let mut config = AppConfig::default();
        config.workbook.input = PathBuf::from("no-such-workbook.xlsx");
        let state = Arc::new(AppState::new(config, Arc::new(MicrolpOracle::new())));

        let err = state.run_pipeline().await.unwrap_err();
        assert_eq!(err.kind(), "workbook");
    }
}
