//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Basic-Auth credentials accepted on the `/url` routes.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub user: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns true if the supplied pair matches exactly.
    pub fn matches(&self, user: &str, password: &str) -> bool {
        self.user == user && self.password == password
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub credentials: Arc<BasicCredentials>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, credentials: BasicCredentials) -> Self {
        Self {
            link_service,
            credentials: Arc::new(credentials),
        }
    }
}
