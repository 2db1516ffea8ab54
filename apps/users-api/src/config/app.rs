//! Process configuration, read once at startup.
//!
//! | Variable               | Default                                     |
//! |------------------------|---------------------------------------------|
//! | `JWT_SECRET`           | required, non-empty                         |
//! | `DATABASE_URL`         | required                                    |
//! | `USERS_API_HOST`       | `0.0.0.0`                                   |
//! | `SERVER_PORT`          | `8083`                                      |
//! | `CORS_ALLOWED_ORIGINS` | `http://localhost:3000,http://127.0.0.1:3000` |

use std::env;
use std::fmt;

use crate::error::AppError;
use crate::infra::db::sanitize_db_url;
use crate::state::security_config::SecurityConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8083;

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Raw comma-separated entries; filtered by `cors_middleware`
    pub cors_allowed_origins: Vec<String>,
    jwt_secret: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = must_var(&lookup, "JWT_SECRET")?;
        let database_url = must_var(&lookup, "DATABASE_URL")?;

        let host = lookup("USERS_API_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("SERVER_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("SERVER_PORT must be a valid port number, got '{raw}'"))
            })?,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| raw.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            cors_allowed_origins,
            jwt_secret,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &sanitize_db_url(&self.database_url))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}

/// Required, non-blank variable.
fn must_var<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
