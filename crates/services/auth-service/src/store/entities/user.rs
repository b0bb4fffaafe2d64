//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::StoreError;
use domain::{UserId, UserRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl TryFrom<Model> for UserRecord {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = u64::try_from(model.id)
            .map_err(|_| StoreError::unavailable(format!("Invalid user id {}", model.id)))?;

        Ok(UserRecord {
            id: UserId::new(id),
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        })
    }
}
