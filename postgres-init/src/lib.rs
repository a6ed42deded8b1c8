//! Idempotent Postgres user, database and schema initialization
//!
//! Shared by the generic `init-database-and-user` binary and the
//! Kubernetes-flavoured `init-database-and-user-kube`, which reads the
//! superuser password from a Kubernetes Secret instead of the environment.

pub mod config;
pub mod kube;
pub mod provision;
pub mod session;
pub mod sql;

pub use config::{DbConnection, ProvisionTarget, SecretRef};
pub use provision::{provision, ProvisionReport, RoleAction};
pub use session::{PsqlSession, SqlSession};
