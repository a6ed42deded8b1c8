//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration from environment variables.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

/// Extension trait for parsing environment variables.
///
/// Provides convenient methods for reading env vars with defaults, required values,
/// and type parsing.
pub trait ConfigExt {
    /// Get an environment variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let port = String::env_or("DB_PORT", "5432");
    /// ```
    fn env_or(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    /// Get a required environment variable, returning an error if not set or empty.
    ///
    /// # Example
    /// ```ignore
    /// let seq_url = String::env_required("SEQ_URL")?;
    /// ```
    fn env_required(name: &str) -> Result<String> {
        Self::env_opt(name).context(format!("{} must be set", name))
    }

    /// Get an environment variable, treating unset and empty the same way.
    fn env_opt(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Get an environment variable parsed as a specific type.
    ///
    /// Returns `default` when unset or empty; a value that fails to parse is an error.
    ///
    /// # Example
    /// ```ignore
    /// let port: u16 = u16::env_try_parse("DB_PORT", 5432)?;
    /// ```
    fn env_try_parse<T>(name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::env_opt(name) {
            None => Ok(default),
            Some(v) => v
                .parse()
                .map_err(|e| anyhow!("{} has invalid value {:?}: {}", name, v, e)),
        }
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(
            String::env_or("COMMON_TEST_SURELY_UNSET", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_env_required_rejects_empty() {
        env::set_var("COMMON_TEST_EMPTY_VALUE", "");
        let err = String::env_required("COMMON_TEST_EMPTY_VALUE").unwrap_err();
        assert!(err.to_string().contains("COMMON_TEST_EMPTY_VALUE must be set"));
    }

    #[test]
    fn test_env_try_parse_rejects_bad_value() {
        env::set_var("COMMON_TEST_STRICT_PORT", "6543");
        env::set_var("COMMON_TEST_STRICT_BAD_PORT", "54a2");

        assert_eq!(u16::env_try_parse("COMMON_TEST_STRICT_PORT", 5432).unwrap(), 6543);
        assert_eq!(u16::env_try_parse("COMMON_TEST_STRICT_UNSET", 5432).unwrap(), 5432);

        let err = u16::env_try_parse("COMMON_TEST_STRICT_BAD_PORT", 5432).unwrap_err();
        assert!(err.to_string().contains("COMMON_TEST_STRICT_BAD_PORT"));
        assert!(err.to_string().contains("54a2"));
    }
}
