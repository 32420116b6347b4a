//! Application services - Use cases orchestrating domain logic and
//! collaborators.
//!
//! Services depend on traits (classifiers, credential store) that are
//! constructed once at startup and injected, never reached through globals.

mod auth_service;
mod dispatcher;

pub use auth_service::{AuthService, Authenticator};
pub use dispatcher::{ChatResponse, Dispatcher, ImageStressResponse, TextStressResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
