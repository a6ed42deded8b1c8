//! Postgres database and user initialization
//!
//! Creates (or updates) the application user, its database and schema on a
//! Postgres server reachable with the superuser credentials in `DB_PASSWORD`.

use anyhow::{Context, Result};
use common::{init_logging, ConfigExt};
use postgres_init::{provision, DbConnection, ProvisionTarget, PsqlSession};
use tracing::info;

fn main() -> Result<()> {
    let _guard = init_logging("init-database-and-user");

    let password = String::env_required("DB_PASSWORD").context("Superuser password missing")?;
    let conn = DbConnection::from_env(password)?;
    let target = ProvisionTarget::from_env()?;

    info!(
        host = %conn.host,
        port = conn.port,
        admin_db = %conn.dbname,
        user = %target.user,
        database = %target.database,
        schema = %target.schema,
        "Initializing database and user"
    );

    let admin_db = conn.dbname.clone();
    let report = provision(&PsqlSession::new(conn), &admin_db, &target)?;

    info!(?report, "Database initialization finished");

    Ok(())
}
