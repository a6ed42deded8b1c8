//! SQL execution through psql

use crate::config::DbConnection;
use anyhow::Result;
use common::{run_checked, Invocation};
use tracing::debug;

/// Something that can run single SQL statements against a named database.
pub trait SqlSession {
    /// Run a `SELECT 1 ... WHERE ...` query and report whether it returned a row.
    fn exists(&self, database: &str, sql: &str) -> Result<bool>;

    /// Run a statement whose output is not needed.
    fn execute(&self, database: &str, sql: &str) -> Result<()>;
}

/// Runs each statement as its own `psql -c` call, so every statement
/// autocommits (CREATE DATABASE cannot run inside a transaction).
pub struct PsqlSession {
    conn: DbConnection,
}

impl PsqlSession {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }

    fn psql(&self, database: &str, sql: &str) -> Result<String> {
        let port = self.conn.port.to_string();
        run_checked(
            "psql",
            &Invocation {
                args: vec![
                    "-X",
                    "-q",
                    "-t",
                    "-A",
                    "-v",
                    "ON_ERROR_STOP=1",
                    "-h",
                    self.conn.host.as_str(),
                    "-p",
                    port.as_str(),
                    "-U",
                    self.conn.user.as_str(),
                    "-d",
                    database,
                    "-c",
                    sql,
                ],
                envs: vec![("PGPASSWORD", self.conn.password.as_str())],
            },
        )
    }
}

impl SqlSession for PsqlSession {
    fn exists(&self, database: &str, sql: &str) -> Result<bool> {
        let out = self.psql(database, sql)?;
        Ok(out.lines().any(|line| line.trim() == "1"))
    }

    fn execute(&self, database: &str, sql: &str) -> Result<()> {
        let out = self.psql(database, sql)?;
        debug!(database, output = %out, "Statement executed");
        Ok(())
    }
}
