//! Command line arguments shared by the pruning binaries

use anyhow::Result;
use clap::Args;

use crate::registry::RegistryClient;

/// Registry connection and retention settings.
///
/// Every flag falls back to an environment variable so the binaries can run
/// as a scheduled job with no arguments.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// The URL of the container registry
    #[arg(long, env = "DOCKER_REGISTRY")]
    pub registry: String,

    /// The username for authentication with the registry
    #[arg(long, env = "DOCKER_USERNAME")]
    pub username: String,

    /// The password for authentication with the registry
    #[arg(long, env = "DOCKER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// The number of stable version tags to keep per repository
    #[arg(long, env = "KEEP_TAGS", default_value_t = 4)]
    pub keep: usize,
}

impl RegistryArgs {
    pub fn client(&self) -> Result<RegistryClient> {
        RegistryClient::new(&self.registry, &self.username, &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        registry: RegistryArgs,
    }

    #[test]
    fn test_flags_parse_with_default_keep() {
        let cli = TestCli::try_parse_from([
            "truncate",
            "--registry",
            "https://registry.example",
            "--username",
            "ci",
            "--password",
            "pw",
        ])
        .unwrap();

        assert_eq!(cli.registry.registry, "https://registry.example");
        assert_eq!(cli.registry.keep, 4);
    }

    #[test]
    fn test_keep_must_be_a_number() {
        let result = TestCli::try_parse_from([
            "truncate",
            "--registry",
            "r",
            "--username",
            "u",
            "--password",
            "p",
            "--keep",
            "many",
        ]);
        assert!(result.is_err());
    }
}
