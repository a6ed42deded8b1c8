//! Applying a retention plan to a registry

use crate::registry::RegistryClient;
use crate::retention;
use anyhow::{bail, Result};
use reqwest::StatusCode;
use tracing::{error, info, warn};

/// Outcome of pruning one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub repository: String,
    pub kept: Vec<String>,
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Prune one repository down to `keep` stable versions (plus relevant pre-releases).
///
/// A tag that cannot be deleted is logged and skipped; the remaining tags
/// are still processed.
pub async fn prune_repository(
    client: &RegistryClient,
    repository: &str,
    keep: usize,
) -> Result<PruneSummary> {
    let tags = client.tags(repository).await?;
    let plan = retention::plan(&tags, keep)?;

    let mut summary = PruneSummary {
        repository: repository.to_string(),
        kept: plan.keep.clone(),
        ..Default::default()
    };

    if plan.has_no_versions() {
        info!(repository, "No valid semver tags found");
        return Ok(summary);
    }

    if plan.delete.is_empty() {
        info!(repository, keep, "No need to delete tags, {} or fewer relevant tags found", keep);
        return Ok(summary);
    }

    info!(repository, count = plan.delete.len(), "Deleting tags");

    for tag in plan.delete {
        match delete_tag(client, repository, &tag).await {
            Ok(()) => {
                info!(repository, tag = %tag, "Deleted tag");
                summary.deleted.push(tag);
            }
            Err(e) => {
                warn!(repository, tag = %tag, error = %e, "Failed to delete tag");
                summary.failed.push(tag);
            }
        }
    }

    Ok(summary)
}

async fn delete_tag(client: &RegistryClient, repository: &str, tag: &str) -> Result<()> {
    let digest = client.manifest_digest(repository, tag).await?;
    let status = client.delete_manifest(repository, &digest).await?;
    if status != StatusCode::ACCEPTED {
        bail!("registry answered {} for digest {}", status, digest);
    }
    Ok(())
}

/// Prune every repository in the registry catalog.
///
/// Repositories are processed one after another; a failing repository does
/// not stop the others, but makes the overall run fail.
pub async fn prune_all(client: &RegistryClient, keep: usize) -> Result<Vec<PruneSummary>> {
    // Reject a bad keep value before touching the registry.
    retention::plan(&[], keep)?;

    let repositories = client.repositories().await?;
    info!(count = repositories.len(), "Found repositories");

    let mut summaries = Vec::with_capacity(repositories.len());
    let mut failed = Vec::new();

    for repository in &repositories {
        match prune_repository(client, repository, keep).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!(repository = %repository, error = %e, "Failed to prune repository");
                failed.push(repository.clone());
            }
        }
    }

    if !failed.is_empty() {
        bail!("Failed to prune {} repositories: {}", failed.len(), failed.join(", "));
    }

    Ok(summaries)
}
