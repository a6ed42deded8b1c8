//! Configuration from environment variables

use anyhow::Result;
use common::ConfigExt;

pub const DEFAULT_SERVICES_FILE: &str = "/app/services.txt";

pub struct Config {
    pub seq_url: String,
    pub admin_api_key: String,
    pub customer_name: String,
    pub services_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            seq_url: String::env_required("SEQ_URL")?,
            admin_api_key: String::env_required("ADMIN_API_KEY")?,
            customer_name: String::env_required("CUSTOMER_NAME")?,
            services_file: String::env_or("SEQ_SERVICES_FILE", DEFAULT_SERVICES_FILE),
        })
    }
}
