//! hireflow-hub - Agent registry service
//!
//! Discovers agent modules under the module root, then serves the registry
//! read-only over HTTP. The listener is bound only after discovery settles.
//!
//! `--check` runs discovery, prints what was registered and skipped, and exits
//! non-zero if any module was skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hireflow_common::config::{resolve_modules_dir, HubConfig};
use hireflow_registry::{AgentDiscovery, DiscoveryReport};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hireflow_hub::{build_router, AppState};

/// Command-line arguments for hireflow-hub
#[derive(Parser, Debug)]
#[command(name = "hireflow-hub")]
#[command(about = "Agent registry service for hireflow")]
#[command(version)]
struct Args {
    /// Module root containing one directory per agent
    #[arg(short, long)]
    modules_dir: Option<PathBuf>,

    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "HIREFLOW_HUB_PORT")]
    port: Option<u16>,

    /// Validate the module tree and exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = HubConfig::load(args.config.as_deref()).context("Failed to load config")?;

    // RUST_LOG wins over the config file level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting hireflow-hub v{}",
        env!("CARGO_PKG_VERSION")
    );

    let modules_dir = resolve_modules_dir(args.modules_dir.as_deref(), &config);
    info!("Module root: {}", modules_dir.display());

    let report = AgentDiscovery::new(&modules_dir).discover().await;

    if args.check {
        print_check_report(&report);
        if report.root_missing || !report.skipped.is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if report.root_missing {
        warn!("Serving an empty registry: module root missing");
    }

    let state = AppState::new(report, modules_dir);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", config.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("hireflow-hub listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("hireflow-hub stopped");
    Ok(())
}

fn print_check_report(report: &DiscoveryReport) {
    if report.root_missing {
        println!("module root missing");
    }

    let mut agents = report.registry.all_agents();
    agents.sort_by(|a, b| a.id.cmp(&b.id));
    for agent in agents {
        println!(
            "registered {} ({}, v{}) {}",
            agent.id, agent.category, agent.version, agent.api.base_path
        );
    }

    for module in &report.skipped {
        println!(
            "skipped {} [{}]: {}",
            module.module_dir,
            module.reason.kind(),
            module.reason
        );
    }

    println!(
        "{} registered, {} skipped",
        report.registry.len(),
        report.skipped.len()
    );
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
