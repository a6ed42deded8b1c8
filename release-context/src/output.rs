//! Emission of step outputs in the GitHub Actions `GITHUB_OUTPUT` format

use crate::resolve::ReleaseParameters;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Where step outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GithubOutput {
    /// Append to the file named by `GITHUB_OUTPUT`.
    File(PathBuf),
    Stdout,
}

impl GithubOutput {
    /// Pick the output file from `GITHUB_OUTPUT`, falling back to stdout.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Stdout,
        }
    }
}

/// Render release parameters as `GITHUB_OUTPUT` entries.
pub fn render(params: &ReleaseParameters) -> String {
    let publish = params.publish.to_string();
    [
        ("publish", publish.as_str()),
        ("base_branch", params.base_branch.as_str()),
        ("config_name", params.config_name.as_str()),
        ("version", params.version.as_str()),
    ]
    .iter()
    .map(|(key, value)| entry(key, value))
    .collect()
}

fn entry(key: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{key}={value}\n");
    }

    // Multi-line values need a delimiter that cannot appear in the value.
    let mut delimiter = String::from("RELEASE_CONTEXT_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{key}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Write release parameters to the given output target.
pub fn write_github_output(params: &ReleaseParameters, target: &GithubOutput) -> Result<()> {
    let rendered = render(params);
    match target {
        GithubOutput::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("Failed to open {}", path.display()))?;
            file.write_all(rendered.as_bytes())
                .context(format!("Failed to write {}", path.display()))?;
        }
        GithubOutput::Stdout => {
            io::stdout()
                .write_all(rendered.as_bytes())
                .context("Failed to write outputs to stdout")?;
        }
    }
    Ok(())
}
