//! Position Reconciler Binary
//!
//! Serves option position reconciliation reports over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin position-reconciler
//! ```
//!
//! # Environment Variables
//!
//! - `RECONCILER_CONFIG`: Path to the YAML config (default: config.yaml, then built-in defaults)
//! - `RUST_LOG`: Extra log directives (default level from config)
//!
//! Any `${VAR}` referenced from the config file is also read from the
//! environment or a `.env` file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use position_reconciler::config::{Config, load_config};
use position_reconciler::infrastructure::http::{AppState, create_router};
use position_reconciler::infrastructure::source::TransactionSource;
use position_reconciler::observability::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

/// Default config file, used when present.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = resolve_config()?;
    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Position Reconciler"
    );

    let source = TransactionSource::from_config(&config.source)
        .context("failed to create transaction source")?;
    let source_kind = source.kind();
    tracing::info!(
        source = source_kind,
        path = config.source.path.as_deref().unwrap_or(""),
        base_url = config.source.base_url.as_deref().unwrap_or(""),
        "Transaction source configured"
    );

    let app = create_router(AppState::new(Arc::new(source), source_kind));

    let addr = config.server.listen_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Position Reconciler stopped");
    Ok(())
}

/// Load config from `RECONCILER_CONFIG`, else `config.yaml` if present,
/// else defaults.
fn resolve_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var("RECONCILER_CONFIG") {
        return load_config(Some(&path)).with_context(|| format!("failed to load {path}"));
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(None).context("failed to load config.yaml");
    }

    Ok(Config::default())
}

fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        load_dotenv_from_ancestors();
    }
}

fn load_dotenv_from_ancestors() {
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
