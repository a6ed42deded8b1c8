//! Docker Registry HTTP API v2 client

use anyhow::{anyhow, Context, Result};
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Manifest media types accepted when resolving a tag to its digest.
const MANIFEST_ACCEPT: &str = "application/vnd.docker.distribution.manifest.v2+json, \
     application/vnd.oci.image.manifest.v1+json";

const DIGEST_HEADER: &str = "Docker-Content-Digest";

#[derive(Deserialize)]
struct Catalog {
    #[serde(default)]
    repositories: Vec<String>,
}

#[derive(Deserialize)]
struct TagList {
    // The registry sends `null` for repositories without tags.
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Basic-auth client for a single registry.
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl RegistryClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all repositories, following `Link` pagination.
    pub async fn repositories(&self) -> Result<Vec<String>> {
        self.get_paginated("/v2/_catalog", |page: Catalog| page.repositories)
            .await
            .context("Failed to list repositories")
    }

    /// List all tags of a repository, following `Link` pagination.
    pub async fn tags(&self, repository: &str) -> Result<Vec<String>> {
        self.get_paginated(&format!("/v2/{}/tags/list", repository), |page: TagList| {
            page.tags.unwrap_or_default()
        })
        .await
        .context(format!("Failed to list tags of {}", repository))
    }

    /// Resolve a tag to the digest of its manifest.
    pub async fn manifest_digest(&self, repository: &str, tag: &str) -> Result<String> {
        let url = format!("{}/v2/{}/manifests/{}", self.base_url, repository, tag);
        let resp = self
            .client
            .head(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, MANIFEST_ACCEPT)
            .send()
            .await?
            .error_for_status()?;

        resp.headers()
            .get(DIGEST_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("{} header missing for {}:{}", DIGEST_HEADER, repository, tag))
    }

    /// Delete a manifest by digest and return the registry's status code.
    ///
    /// The registry answers 202 Accepted on success.
    pub async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<StatusCode> {
        let url = format!("{}/v2/{}/manifests/{}", self.base_url, repository, digest);
        let resp = self
            .client
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        Ok(resp.status())
    }

    async fn get_paginated<T, F>(&self, path: &str, extract: F) -> Result<Vec<String>>
    where
        T: DeserializeOwned,
        F: Fn(T) -> Vec<String>,
    {
        let mut items = Vec::new();
        let mut next = Some(format!("{}{}", self.base_url, path));

        while let Some(url) = next.take() {
            debug!(url = %url, "Fetching page");
            let resp = self
                .client
                .get(&url)
                .basic_auth(&self.username, Some(&self.password))
                .send()
                .await?
                .error_for_status()?;

            next = self.next_page(&resp);
            let page: T = resp.json().await?;
            items.extend(extract(page));
        }

        Ok(items)
    }

    fn next_page(&self, resp: &Response) -> Option<String> {
        let link = resp.headers().get(LINK)?.to_str().ok()?;
        let target = next_link(link)?;
        if target.starts_with('/') {
            Some(format!("{}{}", self.base_url, target))
        } else {
            Some(target)
        }
    }
}

/// Extract the `rel="next"` target from an RFC 5988 `Link` header.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| matches!(p.trim(), "rel=\"next\"" | "rel=next"));
        if !is_next {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Some(target.to_string())
    })
}
