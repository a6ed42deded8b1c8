//! Seq ingest API key provisioning
//!
//! Creates one ingest key per service listed in a services file, or updates
//! the existing key with the same title.

pub mod config;
pub mod seq;
pub mod services;

pub use config::Config;
pub use seq::{ApiKey, KeyAction, SeqClient};
pub use services::{parse_services, read_services, ServiceToken, ServicesError};
