//! Prune old version tags of a single registry repository

use anyhow::Result;
use clap::Parser;
use common::init_logging;
use registry_prune::cli::RegistryArgs;
use registry_prune::prune_repository;
use tracing::info;

/// Manage Docker image tags in a private registry
#[derive(Parser, Debug)]
#[command(name = "truncate-image")]
struct Cli {
    #[command(flatten)]
    registry: RegistryArgs,

    /// The name of the repository (image) to manage
    #[arg(long, env = "DOCKER_REPOSITORY")]
    repository: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging("truncate-image");
    let cli = Cli::parse();

    let client = cli.registry.client()?;
    info!(
        registry = %client.base_url(),
        repository = %cli.repository,
        keep = cli.registry.keep,
        "Pruning repository"
    );

    let summary = prune_repository(&client, &cli.repository, cli.registry.keep).await?;

    info!(
        repository = %summary.repository,
        kept = summary.kept.len(),
        deleted = summary.deleted.len(),
        failed = summary.failed.len(),
        "Pruning finished"
    );

    Ok(())
}
