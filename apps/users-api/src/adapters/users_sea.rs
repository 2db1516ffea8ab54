//! SeaORM adapter for the user repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{User, UserRepo};

/// SeaORM implementation of UserRepo.
#[derive(Debug)]
pub struct UserRepoSea {
    db: DatabaseConnection,
}

impl UserRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for UserRepoSea {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = users::Entity::find()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(User::from))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        users::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
