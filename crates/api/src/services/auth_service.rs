//! Authentication service - Registration and login against the credential
//! store.
//!
//! Passwords are hashed by the domain `Password` value object; this service
//! never sees or stores plaintext beyond the call.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::info;

use common::{AppError, AppResult};
use domain::{Credential, Password};

use crate::infra::CredentialStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Real argon2 hash verified when the username is unknown, so both login
/// failure paths cost the same.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("timing-equalization-dummy").ok());

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new username/password pair
    async fn register(&self, username: String, password: String) -> AppResult<()>;

    /// Check a username/password pair
    async fn login(&self, username: String, password: String) -> AppResult<()>;
}

/// Concrete implementation of AuthService over a credential store.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, username: String, password: String) -> AppResult<()> {
        let username = Credential::normalize_username(&username)?;

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let credential = Credential::new(username, Password::new(&password)?);
        let credential = self.store.create(credential).await?;

        info!(username = %credential.username, "User registered");
        Ok(())
    }

    async fn login(&self, username: String, password: String) -> AppResult<()> {
        let username = username.trim();
        let stored = if username.is_empty() {
            None
        } else {
            self.store.find_by_username(username).await?
        };

        let password_valid = match &stored {
            Some(credential) => credential.password().verify(&password),
            None => {
                if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                    dummy.verify(&password);
                }
                false
            }
        };

        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        info!(username = %username, "User logged in");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::{InMemoryCredentialStore, MockCredentialStore};

    fn authenticator() -> Authenticator {
        Authenticator::new(Arc::new(InMemoryCredentialStore::new()))
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = authenticator();
        auth.register("alice".into(), "CorrectHorse1".into()).await.unwrap();
        auth.login("alice".into(), "CorrectHorse1".into()).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = authenticator();
        auth.register("alice".into(), "CorrectHorse1".into()).await.unwrap();

        let err = auth.login("alice".into(), "WrongHorse1".into()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let err = authenticator()
            .login("nobody".into(), "CorrectHorse1".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = authenticator();
        auth.register("alice".into(), "CorrectHorse1".into()).await.unwrap();

        let err = auth.register(" alice ".into(), "OtherHorse1".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let err = authenticator()
            .register("alice".into(), "short".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_blank_username_skips_store() {
        let mut store = MockCredentialStore::new();
        store.expect_find_by_username().times(0);
        store.expect_create().times(0);

        let err = Authenticator::new(Arc::new(store))
            .register("  ".into(), "CorrectHorse1".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_username()
            .with(eq("alice"))
            .returning(|_| Ok(None));
        store
            .expect_create()
            .withf(|c| c.username == "alice" && !c.password_hash.contains("CorrectHorse1"))
            .times(1)
            .returning(Ok);

        Authenticator::new(Arc::new(store))
            .register("alice".into(), "CorrectHorse1".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_store_race_surfaces_conflict() {
        let mut store = MockCredentialStore::new();
        store.expect_find_by_username().returning(|_| Ok(None));
        store
            .expect_create()
            .returning(|_| Err(AppError::conflict("Username")));

        let err = Authenticator::new(Arc::new(store))
            .register("alice".into(), "CorrectHorse1".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
