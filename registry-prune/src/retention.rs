//! Which version tags to keep

use semver::Version;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetentionError {
    #[error("number of version tags to keep must be a positive integer, got {0}")]
    InvalidKeep(usize),
}

/// Split of a repository's semver tags into kept and deleted ones.
///
/// Both lists preserve the order in which the registry listed the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    pub keep: Vec<String>,
    pub delete: Vec<String>,
}

impl RetentionPlan {
    /// True when the repository has no semver tags at all.
    pub fn has_no_versions(&self) -> bool {
        self.keep.is_empty() && self.delete.is_empty()
    }
}

/// Decide which tags to delete.
///
/// - the newest `keep` stable versions stay
/// - the newest pre-release stays if it is newer than every stable version
/// - pre-releases newer than the oldest kept stable stay
/// - without any stable version, the newest `keep` pre-releases stay
pub fn plan(tags: &[String], keep: usize) -> Result<RetentionPlan, RetentionError> {
    if keep == 0 {
        return Err(RetentionError::InvalidKeep(keep));
    }

    let versioned: Vec<(Version, &str)> = tags
        .iter()
        .filter_map(|tag| Version::parse(tag).ok().map(|v| (v, tag.as_str())))
        .collect();

    let (mut stable, mut pre): (Vec<_>, Vec<_>) =
        versioned.iter().partition(|(v, _)| v.pre.is_empty());
    stable.sort_by(|a, b| a.0.cmp(&b.0));
    pre.sort_by(|a, b| a.0.cmp(&b.0));

    let kept_stable = &stable[stable.len().saturating_sub(keep)..];
    let mut kept: HashSet<&str> = kept_stable.iter().map(|(_, tag)| *tag).collect();

    if let Some((latest_pre, tag)) = pre.last() {
        let newer_than_stable = stable.last().map_or(true, |(s, _)| latest_pre > s);
        if newer_than_stable {
            kept.insert(*tag);
        }
    }

    match kept_stable.first() {
        Some((oldest_kept, _)) => {
            kept.extend(
                pre.iter()
                    .filter(|(v, _)| v > oldest_kept)
                    .map(|(_, tag)| *tag),
            );
        }
        None => {
            kept.extend(
                pre[pre.len().saturating_sub(keep)..]
                    .iter()
                    .map(|(_, tag)| *tag),
            );
        }
    }

    let (keep_tags, delete_tags): (Vec<_>, Vec<_>) = versioned
        .iter()
        .map(|(_, tag)| tag.to_string())
        .partition(|tag| kept.contains(tag.as_str()));

    Ok(RetentionPlan {
        keep: keep_tags,
        delete: delete_tags,
    })
}
