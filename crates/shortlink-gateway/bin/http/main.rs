mod cli;

use crate::cli::{LogFormatArg, CLI};
use anyhow::Context;
use clap::Parser;
use shortlink_core::Validity;
use shortlink_gateway::{App, AppState};
use shortlink_store::{ShortLinkStore, StoreSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    let default_validity = Validity::from_minutes(config.default_validity_minutes)
        .context("invalid default validity")?;
    let settings = StoreSettings::builder()
        .base_url(config.base_url.clone())
        .default_validity(default_validity)
        .max_generation_attempts(config.max_generation_attempts)
        .build();
    let store = Arc::new(ShortLinkStore::new(settings));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!(
        listen_addr = %listener.local_addr()?,
        base_url = %config.base_url,
        default_validity_minutes = config.default_validity_minutes,
        log_format = %config.log_format,
        "starting gateway server"
    );

    let app = App::router(AppState::new(store));
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("gateway server stopped");
    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
