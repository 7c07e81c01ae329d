use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::RepositoryError,
    models::permission::{group_by_category, Permission, PermissionsByCategory},
};

#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn group_by_category(&self) -> Result<PermissionsByCategory, RepositoryError>;
}

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn group_by_category(&self) -> Result<PermissionsByCategory, RepositoryError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT id, name, category, description FROM permissions ORDER BY category, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(group_by_category(permissions))
    }
}
