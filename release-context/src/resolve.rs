//! Derivation of release parameters from an invocation context
//!
//! The result is a pure function of the context: no I/O happens here.

use crate::context::InvocationContext;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Config file used when the caller does not name one.
pub const DEFAULT_CONFIG_NAME: &str = "release-drafter.yml";

/// Only runs on this branch publish the release.
pub const MAIN_BRANCH: &str = "main";

// Anchored: the whole input must be version-like, so `v1.2.3` or
// `1.2.3+build` fall back to auto-versioning.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)+([-a-zA-Z0-9.]*)?$").expect("version regex is valid")
});

/// Parameters handed to the release-drafter action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseParameters {
    pub publish: bool,
    /// Commitish the release is attributed to.
    pub base_branch: String,
    pub config_name: String,
    /// Empty means "let release-drafter pick the next version".
    pub version: String,
}

/// Resolve release parameters for one workflow run.
pub fn resolve(ctx: &InvocationContext) -> ReleaseParameters {
    ReleaseParameters {
        publish: ctx.ref_name == MAIN_BRANCH,
        base_branch: base_branch(ctx),
        config_name: config_name(ctx),
        version: version(ctx),
    }
}

fn base_branch(ctx: &InvocationContext) -> String {
    match ctx.head_ref.as_deref() {
        Some(head) if ctx.is_pull_request() && !head.is_empty() => head.to_string(),
        _ => ctx.ref_name.clone(),
    }
}

fn config_name(ctx: &InvocationContext) -> String {
    match ctx.inputs.config_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_CONFIG_NAME.to_string(),
    }
}

fn version(ctx: &InvocationContext) -> String {
    match ctx.inputs.version.as_deref() {
        Some(v) if is_version_like(v) => v.to_string(),
        _ => String::new(),
    }
}

/// Whether `value` looks like `1.2`, `1.2.3`, `1.2.3-beta.1`, ...
pub fn is_version_like(value: &str) -> bool {
    VERSION_RE.is_match(value)
}
