//! Serve mode: store, engine and API in one process.

use std::net::SocketAddr;

use tracing::{info, warn};

use rota_core::{Engine, RotaConfig};
use rota_state::{NewStaff, StateStore};

pub async fn run(config: RotaConfig) -> anyhow::Result<()> {
    info!("rota daemon starting");

    // ── Engine ─────────────────────────────────────────────────

    let engine = Engine::from_config(&config)?;
    info!(task_role = %engine.task_role, "schedule table loaded");

    // ── Row store ──────────────────────────────────────────────

    std::fs::create_dir_all(&config.server.data_dir)?;
    let db_path = config.server.data_dir.join("rota.redb");
    let store = StateStore::open(&db_path)?;
    info!(path = ?db_path, "state store opened");

    let roster: Vec<NewStaff> = config.staff.iter().map(NewStaff::from).collect();
    let seeded = store.seed_staff(&roster)?;
    if seeded == 0 {
        info!("staff table already populated");
    }

    // ── API server ─────────────────────────────────────────────

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let router = rota_api::build_router(store, engine, config);

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("rota daemon stopped");
    Ok(())
}
