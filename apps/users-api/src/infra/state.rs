use std::sync::Arc;

use crate::adapters::users_sea::UserRepoSea;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::repos::users::UserRepo;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    database_url: Option<String>,
    users: Option<Arc<dyn UserRepo>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    /// Back the user store with a SeaORM connection to `url`.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Use an already constructed user store. Takes precedence over a database URL.
    pub fn with_users(mut self, users: Arc<dyn UserRepo>) -> Self {
        self.users = Some(users);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("security configuration is required"))?;

        let users: Arc<dyn UserRepo> = match (self.users, self.database_url) {
            (Some(users), _) => users,
            (None, Some(url)) => Arc::new(UserRepoSea::new(connect_db(&url).await?)),
            (None, None) => return Err(AppError::config("no user store configured")),
        };

        Ok(AppState::new(users, security))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
