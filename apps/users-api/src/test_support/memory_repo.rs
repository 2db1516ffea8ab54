use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::users::{User, UserRepo};

/// In-memory user store that records how often it is called.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: Vec<User>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl InMemoryUserRepo {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A store whose every call fails as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of repository calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "connection refused (os error 111) at 10.0.0.5:5432",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.record_call()?;
        Ok(self.users.clone())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.record_call()?;
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.record_call()?;
        Ok(self.users.len() as u64)
    }
}
