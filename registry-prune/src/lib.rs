//! Docker Registry v2 tag pruning
//!
//! Keeps the newest semver tags of each repository and deletes the rest.
//! Tags that are not semver (`latest`, branch names, ...) are never touched.

pub mod cli;
pub mod prune;
pub mod registry;
pub mod retention;

pub use prune::{prune_all, prune_repository, PruneSummary};
pub use registry::RegistryClient;
pub use retention::{plan, RetentionError, RetentionPlan};
