//! scrutineer-server binary: serve the validation API over HTTP.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use scrutineer_core::{Orchestrator, OrchestratorConfig, ValidatorRegistry};
use scrutineer_server::{app, AppState};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Validation orchestrator service
#[derive(Parser, Debug)]
#[command(name = "scrutineer-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Wall-clock bound on a validation run (e.g. "60s", "2m")
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    timeout: Duration,

    /// Cap on validations in flight within a run
    #[arg(long, default_value_t = scrutineer_core::DEFAULT_MAX_CONCURRENT)]
    max_concurrent: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OrchestratorConfig {
        timeout: args.timeout,
        max_concurrent: args.max_concurrent,
    };
    let orchestrator = Orchestrator::new(ValidatorRegistry::with_defaults(), config);
    let state = AppState::new(orchestrator);

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        timeout = ?args.timeout,
        max_concurrent = args.max_concurrent,
        "scrutineer server listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("scrutineer server stopped");
    Ok(())
}

/// Resolves when the process is asked to stop (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
