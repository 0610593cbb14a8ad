//! Core logic for the contacts store.
//! The repository owns SQL and transactions; the service owns error mapping.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::ContactsConfig;
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId, ContactPatch, UNASSIGNED_CONTACT_ID};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use service::contact_service::{ContactService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
