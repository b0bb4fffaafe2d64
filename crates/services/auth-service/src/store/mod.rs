//! Credential store: durable mapping from email to user record.

pub mod entities;
mod memory;
mod postgres;

use async_trait::async_trait;

use common::StoreResult;
use domain::UserRecord;

#[cfg(test)]
use mockall::automock;

pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;

/// Credential store trait for dependency injection.
///
/// Implementations must enforce email uniqueness atomically in
/// `create_user`; the auth service relies on it under concurrent
/// registrations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new record, failing with `StoreError::DuplicateEmail` if taken
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord>;

    /// Find a record by exact email
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;
}
