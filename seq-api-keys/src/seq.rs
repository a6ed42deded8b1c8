//! Seq API key client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "X-Seq-ApiKey";

/// Property attached to every event ingested with a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputSettings {
    pub applied_properties: Vec<EventProperty>,
    pub filter: Option<serde_json::Value>,
    pub minimum_level: Option<String>,
    pub use_server_timestamps: bool,
}

/// Request body for creating or updating an API key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub token: String,
    pub token_prefix: Option<String>,
    pub input_settings: InputSettings,
    pub is_default: bool,
    pub owner_id: Option<String>,
    pub assigned_permissions: Vec<String>,
}

impl ApiKey {
    /// Ingest-only key tagging events with the service and customer.
    pub fn ingest(customer: &str, service: &str, token: &str) -> Self {
        Self {
            id: None,
            title: key_title(customer, service),
            token: token.to_string(),
            token_prefix: None,
            input_settings: InputSettings {
                applied_properties: vec![
                    EventProperty {
                        name: "App".to_string(),
                        value: service.to_string(),
                    },
                    EventProperty {
                        name: "Customer".to_string(),
                        value: customer.to_string(),
                    },
                ],
                filter: None,
                minimum_level: None,
                use_server_timestamps: false,
            },
            is_default: false,
            owner_id: None,
            assigned_permissions: vec!["Ingest".to_string()],
        }
    }
}

/// The parts of a stored key this tool reads back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiKeyEntity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub token_prefix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Created,
    Updated,
}

pub fn key_title(customer: &str, service: &str) -> String {
    format!("{} - {}", customer, service)
}

pub struct SeqClient {
    client: Client,
    base_url: String,
    admin_key: String,
}

impl SeqClient {
    pub fn new(base_url: &str, admin_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key: admin_key.to_string(),
        })
    }

    pub async fn list_keys(&self) -> Result<Vec<ApiKeyEntity>> {
        let url = format!("{}/api/apikeys/", self.base_url);
        let keys = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.admin_key)
            .send()
            .await?
            .error_for_status()
            .context("Failed to list API keys")?
            .json()
            .await
            .context("Failed to parse API key list")?;
        Ok(keys)
    }

    pub async fn create_key(&self, key: &ApiKey) -> Result<ApiKeyEntity> {
        let url = format!("{}/api/apikeys/", self.base_url);
        debug!(title = %key.title, "Creating API key");
        let created = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.admin_key)
            .json(key)
            .send()
            .await?
            .error_for_status()
            .context(format!("Failed to create API key {}", key.title))?
            .json()
            .await?;
        Ok(created)
    }

    pub async fn update_key(&self, id: &str, key: &ApiKey) -> Result<ApiKeyEntity> {
        let url = format!("{}/api/apikeys/{}", self.base_url, id);
        debug!(title = %key.title, id, "Updating API key");
        let updated = self
            .client
            .put(&url)
            .header(API_KEY_HEADER, &self.admin_key)
            .json(key)
            .send()
            .await?
            .error_for_status()
            .context(format!("Failed to update API key {}", key.title))?
            .json()
            .await?;
        Ok(updated)
    }

    /// Create the service's key, or update it when one with the same title exists.
    pub async fn upsert_service_key(
        &self,
        existing: &[ApiKeyEntity],
        customer: &str,
        service: &str,
        token: &str,
    ) -> Result<(KeyAction, ApiKeyEntity)> {
        let mut key = ApiKey::ingest(customer, service, token);

        match existing.iter().find(|k| k.title == key.title) {
            Some(found) => {
                key.id = Some(found.id.clone());
                let updated = self.update_key(&found.id, &key).await?;
                Ok((KeyAction::Updated, updated))
            }
            None => {
                let created = self.create_key(&key).await?;
                Ok((KeyAction::Created, created))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_ingest_key_body() {
        let body = serde_json::to_value(ApiKey::ingest("Acme", "billing", "tok")).unwrap();
        assert_eq!(
            body,
            json!({
                "Title": "Acme - billing",
                "Token": "tok",
                "TokenPrefix": null,
                "InputSettings": {
                    "AppliedProperties": [
                        {"Name": "App", "Value": "billing"},
                        {"Name": "Customer", "Value": "Acme"}
                    ],
                    "Filter": null,
                    "MinimumLevel": null,
                    "UseServerTimestamps": false
                },
                "IsDefault": false,
                "OwnerId": null,
                "AssignedPermissions": ["Ingest"]
            })
        );
    }

    #[tokio::test]
    async fn test_existing_title_is_updated() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/api/apikeys/apikey-7")
            .match_header("x-seq-apikey", "admin")
            .match_body(Matcher::PartialJson(json!({
                "Id": "apikey-7",
                "Title": "Acme - billing",
                "Token": "tok"
            })))
            .with_status(200)
            .with_body(r#"{"Id":"apikey-7","Title":"Acme - billing","TokenPrefix":"tok"}"#)
            .create_async()
            .await;

        let client = SeqClient::new(&server.url(), "admin").unwrap();
        let existing = vec![ApiKeyEntity {
            id: "apikey-7".to_string(),
            title: "Acme - billing".to_string(),
            token_prefix: None,
        }];

        let (action, key) = client
            .upsert_service_key(&existing, "Acme", "billing", "tok")
            .await
            .unwrap();

        assert_eq!(action, KeyAction::Updated);
        assert_eq!(key.token_prefix.as_deref(), Some("tok"));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_title_is_created() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/api/apikeys/")
            .match_header("x-seq-apikey", "admin")
            .match_body(Matcher::PartialJson(json!({
                "Title": "Acme - web",
                "AssignedPermissions": ["Ingest"]
            })))
            .with_status(201)
            .with_body(r#"{"Id":"apikey-9","Title":"Acme - web","TokenPrefix":"abc"}"#)
            .create_async()
            .await;

        let client = SeqClient::new(&server.url(), "admin").unwrap();
        let existing = vec![ApiKeyEntity {
            id: "apikey-7".to_string(),
            title: "Acme - billing".to_string(),
            token_prefix: None,
        }];

        let (action, key) = client
            .upsert_service_key(&existing, "Acme", "web", "abc123")
            .await
            .unwrap();

        assert_eq!(action, KeyAction::Created);
        assert_eq!(key.id, "apikey-9");
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_keys_ignores_extra_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/apikeys/")
            .with_status(200)
            .with_body(
                r#"[{"Id":"apikey-1","Title":"Acme - api","TokenPrefix":"xy","IsDefault":false,"Links":{}}]"#,
            )
            .create_async()
            .await;

        let client = SeqClient::new(&server.url(), "admin").unwrap();
        let keys = client.list_keys().await.unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].title, "Acme - api");
    }

    #[tokio::test]
    async fn test_rejected_admin_key_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/apikeys/")
            .with_status(401)
            .create_async()
            .await;

        let client = SeqClient::new(&server.url(), "bad").unwrap();
        assert!(client.list_keys().await.is_err());
    }
}
