mod api;
mod app_state;
mod config;
mod core;
mod domain;
mod errors;
mod routes;

use std::path::Path;

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app_state::build_app_state;
use crate::config::AppConfig;
use crate::core::client::kube_client::build_kube_client;
use crate::errors::StartupError;
use crate::routes::app_router;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(config.log_dir.as_deref());

    if let Err(e) = run(config).await {
        error!("{e}");
        return Err(e);
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    info!(
        kubeconfig = %config.kubeconfig_path.display(),
        ingress_inclusion = %config.ingress_inclusion,
        "Starting eks-ops-api"
    );

    let kube_client = build_kube_client(&config.kubeconfig_path).await?;
    let state = build_app_state(&config, kube_client);
    let app = app_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr.to_string(),
            source,
        })?;
    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr.to_string(),
            source,
        })?;

    info!("Server stopped");
    Ok(())
}

/// Stdout logging filtered by `RUST_LOG` (default `info`), plus a daily rolling file
/// when `log_dir` is set. The returned guard must live until shutdown.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().with_target(true);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "eks-ops-api.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stdout).init();
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {e}"),
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
