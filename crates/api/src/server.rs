//! Process entrypoint shared by the three gateway binaries.

use std::sync::Arc;

use anyhow::Context;
use mapp_genai_core::gateway::Gateway;
use mapp_genai_core::settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::router::build_app;

/// Load configuration, start a runtime sized by `MAX_WORKERS` and serve
/// `gateway` until SIGINT or SIGTERM.
///
/// Only configuration and bind failures are fatal.
pub fn run(gateway: Gateway) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env(gateway.default_port())
        .context("Invalid gateway configuration")?;

    init_tracing(&settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.max_workers)
        .enable_all()
        .build()
        .context("Failed to build the Tokio runtime")?;

    runtime.block_on(serve(gateway, Arc::new(settings)))
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` applies to the gateway
/// crates and `tower_http`. Production output is JSON.
pub fn init_tracing(settings: &Settings) {
    let level = settings.log_directive();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("mapp_genai_api={level},mapp_genai_core={level},tower_http={level}").into()
    });

    let (json, plain) = if settings.is_production() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

async fn serve(gateway: Gateway, settings: Arc<Settings>) -> anyhow::Result<()> {
    tracing::info!(
        service = gateway.service_name(),
        title = gateway.title(),
        host = %settings.api_host,
        port = settings.api_port,
        environment = %settings.environment,
        workers = settings.max_workers,
        "Loaded gateway configuration",
    );
    tracing::debug!(?settings, "Resolved settings");

    tracing::info!(
        model = %settings.model_name,
        api_key_configured = settings.openai_api_key.is_some(),
        "Model backend",
    );
    if settings.uses_default_secret() && !settings.is_development() {
        tracing::warn!(
            environment = %settings.environment,
            "SECRET_KEY is the development placeholder",
        );
    }

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build the HTTP client")?;

    let app = build_app(gateway, Arc::clone(&settings), client);

    let listener = tokio::net::TcpListener::bind((settings.api_host.as_str(), settings.api_port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind to {}:{}",
                settings.api_host, settings.api_port
            )
        })?;
    let addr = listener.local_addr().context("Listener has no local address")?;
    tracing::info!(%addr, service = gateway.service_name(), "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
