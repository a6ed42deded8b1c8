//! Seq API key initialization
//!
//! Reads `service,token` pairs and makes sure each service has an ingest key
//! titled "<customer> - <service>" in Seq.

use anyhow::Result;
use common::init_logging;
use seq_api_keys::{read_services, Config, KeyAction, SeqClient};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging("init-seq-api-keys");

    let config = Config::from_env()?;
    let services = read_services(Path::new(&config.services_file))?;

    info!(
        seq_url = %config.seq_url,
        customer = %config.customer_name,
        services = services.len(),
        "Provisioning Seq API keys"
    );

    let client = SeqClient::new(&config.seq_url, &config.admin_api_key)?;
    let existing = client.list_keys().await?;

    for entry in &services {
        let (action, key) = client
            .upsert_service_key(&existing, &config.customer_name, &entry.service, &entry.token)
            .await?;

        let verb = match action {
            KeyAction::Created => "Created",
            KeyAction::Updated => "Updated",
        };
        info!(
            service = %entry.service,
            id = %key.id,
            token_prefix = key.token_prefix.as_deref().unwrap_or(""),
            "{} API key",
            verb
        );
    }

    Ok(())
}
