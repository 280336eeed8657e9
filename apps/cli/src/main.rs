mod args;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use http_api::HttpState;
use receiver_app::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::CliArgs::parse();

    let load = match &args.config {
        Some(file) => config::load_or_create(file)?,
        None => config::ConfigLoad::defaults(),
    };
    let config = args.apply(load.config);
    logging::init(&config.log)?;

    if let Some(file) = &load.file {
        if load.created {
            info!(path = %file.display(), "created config with defaults");
        } else {
            info!(path = %file.display(), "loaded config");
        }
    }

    let state = HttpState::new(AppState::new(), config.http_options());
    let router = http_api::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to address {addr}"))?;
    info!(addr = %listener.local_addr()?, "receiver listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
