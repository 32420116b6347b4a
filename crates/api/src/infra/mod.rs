//! Infrastructure layer - Database access and credential storage.

pub mod db;
pub mod repositories;

pub use db::Database;
pub use repositories::{CredentialRepository, CredentialStore, InMemoryCredentialStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockCredentialStore;
