//! In-memory credential store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CredentialStore;
use common::{AppError, AppResult};
use domain::Credential;

/// Credential store held in process memory, keyed by username.
///
/// Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        Ok(self.credentials.read().await.get(username).cloned())
    }

    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&credential.username) {
            return Err(AppError::conflict("Username"));
        }
        credentials.insert(credential.username.clone(), credential.clone());
        Ok(credential)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
