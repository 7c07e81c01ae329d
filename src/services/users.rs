use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::RepositoryError,
    models::{auth::Session, user::User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `None` for anonymous sessions and for unknown or deactivated users.
    async fn get_current_user(&self, session: &Session) -> Result<Option<User>, RepositoryError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_current_user(&self, session: &Session) -> Result<Option<User>, RepositoryError> {
        let Some(user_id) = session.user_id() else {
            return Ok(None);
        };

        let row: Option<(Uuid, String, String, String)> = sqlx::query_as(
            "SELECT id, email, first_name, last_name
             FROM users
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, email, first_name, last_name)) = row else {
            tracing::debug!("session user {user_id} not found or inactive");
            return Ok(None);
        };

        let permissions: Vec<String> = sqlx::query_scalar(
            "SELECT p.name FROM permissions p
             JOIN group_permissions gp ON gp.permission_id = p.id
             JOIN user_groups ug ON ug.group_id = gp.group_id
             WHERE ug.user_id = $1
             UNION
             SELECT p.name FROM permissions p
             JOIN user_permissions up ON up.permission_id = p.id
             WHERE up.user_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(User {
            id,
            email,
            first_name,
            last_name,
            permissions: permissions.into_iter().collect::<BTreeSet<_>>(),
        }))
    }
}
