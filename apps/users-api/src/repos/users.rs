//! User repository contract.
//!
//! The user store is an external collaborator; the service only needs these
//! three read operations from it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            firstname: None,
            lastname: None,
            role: None,
        }
    }

    pub fn with_name(mut self, firstname: &str, lastname: &str) -> Self {
        self.firstname = Some(firstname.to_string());
        self.lastname = Some(lastname.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

/// Read access to stored user records.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Every stored user record.
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Number of stored records; doubles as the liveness check.
    async fn count(&self) -> Result<u64, DomainError>;
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            username: model.username,
            firstname: model.firstname,
            lastname: model.lastname,
            role: model.role,
        }
    }
}
