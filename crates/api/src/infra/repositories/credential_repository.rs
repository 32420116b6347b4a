//! Credential repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::credential::{self, ActiveModel, Entity as CredentialEntity};
use crate::infra::Database;
use common::{AppError, AppResult};
use domain::Credential;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential persistence for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a credential by its exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>>;

    /// Store a new credential.
    ///
    /// Fails with a conflict when the username is taken, including when a
    /// concurrent registration wins the race.
    async fn create(&self, credential: Credential) -> AppResult<Credential>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of CredentialStore over a SQL database
pub struct CredentialRepository {
    db: Database,
}

impl CredentialRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for CredentialRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let result = CredentialEntity::find()
            .filter(credential::Column::Username.eq(username))
            .one(self.db.connection())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Credential::from))
    }

    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let active_model = ActiveModel {
            id: Set(credential.id),
            username: Set(credential.username),
            password_hash: Set(credential.password_hash),
            created_at: Set(credential.created_at),
        };

        let model = active_model
            .insert(self.db.connection())
            .await
            .map_err(map_insert_error)?;
        Ok(Credential::from(model))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await.map_err(AppError::from)
    }
}

/// The unique index is the final arbiter of username uniqueness.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Username"),
        _ => AppError::from(err),
    }
}
