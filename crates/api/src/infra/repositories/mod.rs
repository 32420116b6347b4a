//! Credential storage.
//!
//! [`CredentialStore`] is the seam: the SeaORM repository backs production,
//! the in-memory store backs tests and database-less local runs.

pub(crate) mod entities;
mod credential_repository;
mod in_memory;

pub use credential_repository::{CredentialRepository, CredentialStore};
pub use in_memory::InMemoryCredentialStore;

#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialStore;
