//! Postgres-backed credential store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::CredentialStore;
use common::{StoreError, StoreResult};
use domain::UserRecord;

/// Credential store on a SeaORM connection.
///
/// Uniqueness comes from the `users.email` unique index, so concurrent
/// inserts of one email resolve to a single winner.
pub struct PgCredentialStore {
    db: DatabaseConnection,
}

impl PgCredentialStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(StoreError::from)?;
        UserRecord::try_from(model)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(StoreError::from)?;

        result.map(UserRecord::try_from).transpose()
    }
}
