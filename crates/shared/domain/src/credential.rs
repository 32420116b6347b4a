//! Credential entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::MAX_USERNAME_LENGTH;
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// One stored login: a unique username and its salted hash. Plaintext
/// passwords never reach this type.
#[derive(Clone, PartialEq)]
pub struct Credential {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Credential {
    /// Create a credential for a freshly hashed password
    pub fn new(username: String, password: Password) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash: password.into_string(),
            created_at: Utc::now(),
        }
    }

    /// Stored hash as a verifiable password
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }

    /// Trim and check a username before it is stored or looked up.
    pub fn normalize_username(username: &str) -> DomainResult<String> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        Ok(username.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(Credential::normalize_username("  alice ").unwrap(), "alice");
        assert!(Credential::normalize_username("   ").is_err());
        assert!(Credential::normalize_username(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_credential_verifies_its_password() {
        let credential = Credential::new("alice".into(), Password::new("CorrectHorse1").unwrap());
        assert!(credential.password().verify("CorrectHorse1"));
        assert!(!credential.password().verify("WrongHorse1"));
        assert!(!format!("{:?}", credential).contains("argon2"));
    }
}
