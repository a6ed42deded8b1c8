//! Configuration from environment variables

use anyhow::Result;
use common::ConfigExt;

/// How to reach the Postgres server as an administrative user.
#[derive(Clone)]
pub struct DbConnection {
    pub host: String,
    pub port: u16,
    /// Database used for the role and database checks.
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConnection {
    /// Load connection settings; the password comes from the caller so the
    /// Kubernetes variant can source it from a Secret.
    pub fn from_env(password: String) -> Result<Self> {
        Ok(Self {
            host: String::env_or("DB_HOST", "localhost"),
            port: u16::env_try_parse("DB_PORT", 5432)?,
            dbname: String::env_or("DB_NAME", "postgres"),
            user: String::env_or("DB_USER", "postgres"),
            password,
        })
    }
}

impl std::fmt::Debug for DbConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The user, database and schema to make sure exist.
#[derive(Clone)]
pub struct ProvisionTarget {
    pub user: String,
    pub user_password: String,
    pub schema: String,
    pub database: String,
}

impl ProvisionTarget {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            user: String::env_required("USER")?,
            user_password: String::env_required("USER_PASSWORD")?,
            schema: String::env_required("SCHEMA")?,
            database: String::env_required("DATABASE")?,
        })
    }
}

impl std::fmt::Debug for ProvisionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionTarget")
            .field("user", &self.user)
            .field("user_password", &"<redacted>")
            .field("schema", &self.schema)
            .field("database", &self.database)
            .finish()
    }
}

/// Location of the superuser password inside a Kubernetes Secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    pub namespace: String,
    pub name: String,
    pub key: String,
}

impl SecretRef {
    pub fn from_env() -> Self {
        Self {
            namespace: String::env_or("POSTGRES_SECRET_NAMESPACE", "default"),
            name: String::env_or("POSTGRES_SECRET_NAME", "db-superuser"),
            key: String::env_or("POSTGRES_SECRET_KEY", "password"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_passwords() {
        let conn = DbConnection {
            host: "db".to_string(),
            port: 5432,
            dbname: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "hunter2".to_string(),
        };
        let target = ProvisionTarget {
            user: "app".to_string(),
            user_password: "s3cret".to_string(),
            schema: "app".to_string(),
            database: "appdb".to_string(),
        };

        let rendered = format!("{:?} {:?}", conn, target);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_malformed_port_is_error() {
        std::env::set_var("DB_PORT", "54a2");
        let err = DbConnection::from_env("pw".to_string()).unwrap_err();
        std::env::remove_var("DB_PORT");

        assert!(err.to_string().contains("DB_PORT"));
    }
}
