//! hitbadge gateway
//!
//! - Badge endpoint: /?site=...&style=...&label=...
//! - Counter store selected by config (memory or sqlite)
//! - Tracing via RUST_LOG (default info)

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use hitbadge_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "hitbadge-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_default()?;
    let mut listen: SocketAddr = cfg.server.listen.parse()?;
    // PORT overrides the configured port (container platforms set it).
    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        listen.set_port(port);
    }

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "hitbadge-gateway starting");
    tracing::info!("badge url: http://{listen}/?site=your_site&style=classic&label=Visitors");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
