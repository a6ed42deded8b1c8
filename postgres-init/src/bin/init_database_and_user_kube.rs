//! Postgres database and user initialization for Kubernetes
//!
//! Same as `init-database-and-user`, but the superuser password is read from
//! a Kubernetes Secret (`POSTGRES_SECRET_NAMESPACE`/`POSTGRES_SECRET_NAME`,
//! key `POSTGRES_SECRET_KEY`).

use anyhow::{Context, Result};
use common::init_logging;
use postgres_init::{kube, provision, DbConnection, ProvisionTarget, PsqlSession, SecretRef};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging("init-database-and-user-kube");

    let target = ProvisionTarget::from_env()?;
    let secret = SecretRef::from_env();

    info!(
        namespace = %secret.namespace,
        name = %secret.name,
        key = %secret.key,
        "Fetching superuser password from Kubernetes secret"
    );

    let client = kube::client()
        .await
        .context("Failed to create Kubernetes client")?;
    let password = kube::read_secret_value(client, &secret)
        .await
        .context("Cannot retrieve PostgreSQL superuser password from Kubernetes Secret")?;

    let conn = DbConnection::from_env(password)?;

    info!(
        host = %conn.host,
        port = conn.port,
        admin_db = %conn.dbname,
        user = %target.user,
        database = %target.database,
        schema = %target.schema,
        "Initializing database and user"
    );

    // psql runs as blocking subprocesses.
    let report = tokio::task::spawn_blocking(move || {
        let admin_db = conn.dbname.clone();
        provision(&PsqlSession::new(conn), &admin_db, &target)
    })
    .await
    .context("Provisioning task panicked")??;

    info!(?report, "Database initialization finished");

    Ok(())
}
