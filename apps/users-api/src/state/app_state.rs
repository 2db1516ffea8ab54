use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::users::UserRepo;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// User store collaborator
    pub users: Arc<dyn UserRepo>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given user store and security config
    pub fn new(users: Arc<dyn UserRepo>, security: SecurityConfig) -> Self {
        Self { users, security }
    }

    pub fn users(&self) -> &dyn UserRepo {
        self.users.as_ref()
    }
}
