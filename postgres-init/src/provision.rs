//! User, database and schema provisioning
//!
//! Every step checks before it creates, so reruns are safe. An existing
//! user gets its password reset to the configured one.

use crate::config::ProvisionTarget;
use crate::session::SqlSession;
use crate::sql;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Created,
    PasswordUpdated,
}

/// What a provisioning run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub role: RoleAction,
    pub database_created: bool,
    pub schema_created: bool,
}

/// Make sure the target user, database and schema exist.
///
/// Role and database checks run against `admin_db`; the schema steps run
/// inside the target database.
pub fn provision<S: SqlSession>(
    session: &S,
    admin_db: &str,
    target: &ProvisionTarget,
) -> Result<ProvisionReport> {
    let role = ensure_role(session, admin_db, target)?;
    let database_created = ensure_database(session, admin_db, target)?;
    let schema_created = ensure_schema(session, target)?;

    info!(
        user = %target.user,
        database = %target.database,
        schema = %target.schema,
        "User, schema, and database creation/check completed"
    );

    Ok(ProvisionReport {
        role,
        database_created,
        schema_created,
    })
}

fn ensure_role<S: SqlSession>(
    session: &S,
    admin_db: &str,
    target: &ProvisionTarget,
) -> Result<RoleAction> {
    let exists = session
        .exists(admin_db, &sql::role_exists(&target.user))
        .context("Failed to check for existing user")?;

    if exists {
        session
            .execute(
                admin_db,
                &sql::alter_user_password(&target.user, &target.user_password),
            )
            .context(format!("Failed to update password for user {}", target.user))?;
        info!(user = %target.user, "User already exists, password updated");
        Ok(RoleAction::PasswordUpdated)
    } else {
        session
            .execute(
                admin_db,
                &sql::create_user(&target.user, &target.user_password),
            )
            .context(format!("Failed to create user {}", target.user))?;
        info!(user = %target.user, "User created");
        Ok(RoleAction::Created)
    }
}

fn ensure_database<S: SqlSession>(
    session: &S,
    admin_db: &str,
    target: &ProvisionTarget,
) -> Result<bool> {
    let exists = session
        .exists(admin_db, &sql::database_exists(&target.database))
        .context("Failed to check for existing database")?;

    if exists {
        info!(database = %target.database, "Database already exists");
        return Ok(false);
    }

    session
        .execute(
            admin_db,
            &sql::create_database(&target.database, &target.user),
        )
        .context(format!("Failed to create database {}", target.database))?;
    info!(database = %target.database, owner = %target.user, "Database created");
    Ok(true)
}

fn ensure_schema<S: SqlSession>(session: &S, target: &ProvisionTarget) -> Result<bool> {
    let db = target.database.as_str();

    let exists = session
        .exists(db, &sql::schema_exists(&target.schema))
        .context("Failed to check for existing schema")?;

    if exists {
        info!(schema = %target.schema, "Schema already exists");
        return Ok(false);
    }

    session
        .execute(db, &sql::create_schema(&target.schema, &target.user))
        .context(format!("Failed to create schema {}", target.schema))?;
    session
        .execute(
            db,
            &sql::set_search_path(&target.user, &target.database, &target.schema),
        )
        .context("Failed to set search_path")?;
    info!(schema = %target.schema, user = %target.user, "Schema created");

    for grant in sql::grant_all(&target.user, &target.database, &target.schema) {
        session
            .execute(db, &grant)
            .context("Failed to grant privileges")?;
    }
    info!(
        database = %target.database,
        schema = %target.schema,
        user = %target.user,
        "Granted all privileges"
    );

    Ok(true)
}
