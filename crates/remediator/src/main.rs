use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alert_remediator::{
    config::{Config, Overrides},
    dispatch::{ActionExecutor, DispatchEngine},
    kubernetes::KubeCluster,
    server::Server,
};

#[derive(Parser, Debug)]
#[command(name = "alert-remediator")]
#[command(about = "Apply static remediations for Alertmanager alerts", long_about = None)]
struct Args {
    /// Listen address (overrides SERVER_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// YAML remediation table (overrides REMEDIATION_CONFIG)
    #[arg(long)]
    remediations: Option<PathBuf>,

    /// Per-action timeout in seconds (overrides ACTION_TIMEOUT_SECS)
    #[arg(long)]
    action_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(Overrides {
        addr: args.addr,
        remediations: args.remediations,
        action_timeout_secs: args.action_timeout,
    })?;
    info!("Loaded configuration: {:?}", config);

    let registry = Arc::new(
        config
            .remediation
            .load_registry()
            .context("failed to load remediation table")?,
    );
    let mut alert_names: Vec<&str> = registry.alert_names().collect();
    alert_names.sort_unstable();
    info!("Remediations configured for: {}", alert_names.join(", "));

    let cluster = Arc::new(
        KubeCluster::try_default()
            .await
            .context("failed to create Kubernetes client")?,
    );
    let executor = ActionExecutor::with_timeout(cluster, config.remediation.action_timeout());
    let engine = DispatchEngine::new(registry, executor);

    // Start server
    info!("Starting server on {}", config.server.addr);
    Server::new(engine).start(&config.server.addr).await?;

    Ok(())
}
