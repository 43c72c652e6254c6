pub mod admin; // Admin sign-in, review list, status changes
pub mod api; // Local HTTP API for the browser frontend
pub mod catalog;
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod lifecycle; // Status stages and timeline
pub mod models;
pub mod reference_id;
pub mod store;
pub mod submission;
pub mod tracking;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Start the portal service and block until Ctrl-C.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!(
        "{} starting v{} ({})",
        config::APP_NAME,
        config::APP_VERSION,
        config::COLLEGE_NAME
    );

    let cfg = config::PortalConfig::from_env();
    let core = Arc::new(core_state::CoreState::open(&cfg));

    let server = api::start_portal_api_server(core, cfg.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Portal ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.stop().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
