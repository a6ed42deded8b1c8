//! Kubernetes Secret lookup
//!
//! The client is configured the way `kubectl` would be: in-cluster service
//! account when running in a pod, otherwise the local kubeconfig.

use crate::config::SecretRef;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum KubeError {
    #[error("Kubernetes API error: {0}")]
    Client(#[from] kube::Error),

    #[error("secret {namespace}/{name} has no key {key}")]
    MissingKey {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("secret value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Create a client from the in-cluster environment or kubeconfig.
pub async fn client() -> Result<Client, KubeError> {
    Ok(Client::try_default().await?)
}

/// Fetch a Secret and return one of its keys as a string.
pub async fn read_secret_value(client: Client, secret: &SecretRef) -> Result<String, KubeError> {
    debug!(namespace = %secret.namespace, name = %secret.name, "Reading Kubernetes secret");

    let api: Api<Secret> = Api::namespaced(client, &secret.namespace);
    let found = api.get(&secret.name).await?;
    secret_value(&found, secret)
}

/// Extract a key from a fetched Secret. `data` values arrive base64-decoded.
pub fn secret_value(found: &Secret, secret: &SecretRef) -> Result<String, KubeError> {
    let bytes = found
        .data
        .as_ref()
        .and_then(|data| data.get(&secret.key))
        .filter(|value| !value.0.is_empty())
        .ok_or_else(|| KubeError::MissingKey {
            namespace: secret.namespace.clone(),
            name: secret.name.clone(),
            key: secret.key.clone(),
        })?;

    Ok(String::from_utf8(bytes.0.clone())?)
}
