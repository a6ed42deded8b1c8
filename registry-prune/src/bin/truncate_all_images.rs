//! Prune old version tags of every repository in a registry

use anyhow::Result;
use clap::Parser;
use common::init_logging;
use registry_prune::cli::RegistryArgs;
use registry_prune::prune_all;
use tracing::info;

/// Truncates image tags in a container registry
#[derive(Parser, Debug)]
#[command(name = "truncate-all-images")]
struct Cli {
    #[command(flatten)]
    registry: RegistryArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging("truncate-all-images");
    let cli = Cli::parse();

    let client = cli.registry.client()?;
    info!(registry = %client.base_url(), keep = cli.registry.keep, "Pruning all repositories");

    let summaries = prune_all(&client, cli.registry.keep).await?;

    let deleted: usize = summaries.iter().map(|s| s.deleted.len()).sum();
    let failed: usize = summaries.iter().map(|s| s.failed.len()).sum();
    info!(
        repositories = summaries.len(),
        deleted,
        failed,
        "Pruning finished"
    );

    Ok(())
}
