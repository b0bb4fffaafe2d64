//! In-process credential store.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::CredentialStore;
use common::{StoreError, StoreResult};
use domain::{UserId, UserRecord};

/// Credential store held in memory; contents are lost on restart.
///
/// Ids are assigned sequentially from 1. The map entry is held while the
/// record is inserted, which makes the duplicate check atomic.
pub struct MemoryCredentialStore {
    users: DashMap<String, UserRecord>,
    next_id: AtomicU64,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                let record = UserRecord::new(id, email.to_string(), password_hash.to_string());
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }
}
