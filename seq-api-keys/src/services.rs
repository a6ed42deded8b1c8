//! Services file parsing
//!
//! One `service,token` pair per line; blank lines are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("failed to read services file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: expected `service,token`, got {content:?}")]
    Malformed { line: usize, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceToken {
    pub service: String,
    pub token: String,
}

/// Parse the services file content.
///
/// A service listed twice keeps its first position but takes the last token.
pub fn parse_services(content: &str) -> Result<Vec<ServiceToken>, ServicesError> {
    let mut services: Vec<ServiceToken> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = || ServicesError::Malformed {
            line: idx + 1,
            content: line.to_string(),
        };

        let (service, token) = line.split_once(',').ok_or_else(malformed)?;
        let (service, token) = (service.trim(), token.trim());
        if service.is_empty() || token.is_empty() || token.contains(',') {
            return Err(malformed());
        }

        match services.iter_mut().find(|s| s.service == service) {
            Some(existing) => existing.token = token.to_string(),
            None => services.push(ServiceToken {
                service: service.to_string(),
                token: token.to_string(),
            }),
        }
    }

    Ok(services)
}

pub fn read_services(path: &Path) -> Result<Vec<ServiceToken>, ServicesError> {
    let content = fs::read_to_string(path).map_err(|source| ServicesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_services(&content)
}
