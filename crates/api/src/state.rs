//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::CredentialStore;
use crate::services::{AuthService, Dispatcher};

/// Application state shared across handlers.
///
/// Everything here is built once at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub auth_service: Arc<dyn AuthService>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        auth_service: Arc<dyn AuthService>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            dispatcher,
            auth_service,
            credentials,
        }
    }
}
