use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::admin_http::spawn_admin_server;
use configs::AppConfig;
use service::students::{InMemoryStudentStore, StudentStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Directory for a fresh process: seeded with the demo students unless disabled.
pub fn build_store(cfg: &AppConfig) -> Arc<dyn StudentStore> {
    if cfg.directory.seed {
        InMemoryStudentStore::seeded()
    } else {
        InMemoryStudentStore::new()
    }
}

/// Router with default CORS over a store built from `cfg`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::new(build_store(cfg));
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Serve with an already loaded configuration until Ctrl+C; logging is expected to be set up.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    if let Some(admin_addr) = cfg.admin.addr.as_deref() {
        spawn_admin_server(admin_addr, service::metrics::encode_metrics).await?;
    }

    let app = build_app(&cfg);

    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, seed = cfg.directory.seed, "starting student directory");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
