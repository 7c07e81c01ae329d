use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::RepositoryError,
    models::{
        datatable::{DatatablePage, DatatableQuery},
        group::{Group, GroupColumn, GroupForm},
    },
};

/// Persistence contract for groups. Each call is atomic on its own.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Filter, order and page groups for a data-table draw.
    async fn datatable(
        &self,
        query: &DatatableQuery<GroupColumn>,
    ) -> Result<DatatablePage<Group>, RepositoryError>;

    async fn create(&self, form: &GroupForm) -> Result<Group, RepositoryError>;

    /// Absent form fields keep their stored value.
    async fn update(&self, id: Uuid, form: &GroupForm) -> Result<Group, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Group, RepositoryError>;
}

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn datatable(
        &self,
        query: &DatatableQuery<GroupColumn>,
    ) -> Result<DatatablePage<Group>, RepositoryError> {
        let records_total: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM groups")
            .fetch_one(&self.pool)
            .await?;

        let pattern = query.search.as_deref().map(like_pattern);
        let filter = search_clause(&query.columns, pattern.is_some());

        let records_filtered: i64 = match &pattern {
            Some(p) if !filter.is_empty() => {
                sqlx::query_scalar(&format!("SELECT COUNT(*)::BIGINT FROM groups {filter}"))
                    .bind(p)
                    .fetch_one(&self.pool)
                    .await?
            }
            _ => records_total,
        };

        let paging = match query.limit {
            Some(limit) => format!("LIMIT {limit} OFFSET {}", query.offset),
            None => format!("OFFSET {}", query.offset),
        };
        let sql = format!(
            "SELECT * FROM groups {filter}
             ORDER BY {} {}, id
             {paging}",
            query.order_by.as_sql(),
            query.direction.as_sql(),
        );
        let mut select = sqlx::query_as::<_, Group>(&sql);
        if let Some(p) = &pattern {
            if !filter.is_empty() {
                select = select.bind(p);
            }
        }
        let rows = select.fetch_all(&self.pool).await?;

        Ok(DatatablePage {
            records_total,
            records_filtered,
            rows,
        })
    }

    async fn create(&self, form: &GroupForm) -> Result<Group, RepositoryError> {
        let name = form
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| RepositoryError::Validation("The group name is required".into()))?;

        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (name, description)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(name)
        .bind(&form.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, name))
    }

    async fn update(&self, id: Uuid, form: &GroupForm) -> Result<Group, RepositoryError> {
        let name = form.name.as_deref().map(str::trim);
        if name == Some("") {
            return Err(RepositoryError::Validation("The group name cannot be empty".into()));
        }

        sqlx::query_as::<_, Group>(
            "UPDATE groups
             SET name = COALESCE($1, name),
                 description = COALESCE($2, description),
                 updated_at = NOW()
             WHERE id = $3
             RETURNING *",
        )
        .bind(name)
        .bind(&form.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, name.unwrap_or_default()))?
        .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Group, RepositoryError> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "Group",
        id: id.to_string(),
    }
}

fn write_error(e: sqlx::Error, name: &str) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(format!("A group named '{name}' already exists"))
        }
        _ => RepositoryError::Database(e),
    }
}

/// `WHERE` over the searchable selected columns, bound to `$1`.
fn search_clause(columns: &[GroupColumn], searching: bool) -> String {
    if !searching {
        return String::new();
    }
    let terms: Vec<String> = columns
        .iter()
        .filter(|c| c.is_searchable())
        .map(|c| format!("{} ILIKE $1", c.as_sql()))
        .collect();
    if terms.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", terms.join(" OR "))
    }
}

/// Substring pattern with LIKE wildcards in the input taken literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_covers_only_text_columns() {
        let clause = search_clause(
            &[GroupColumn::Name, GroupColumn::Description, GroupColumn::Id],
            true,
        );
        assert_eq!(clause, "WHERE name ILIKE $1 OR description ILIKE $1");
        assert_eq!(search_clause(&[GroupColumn::Id], true), "");
        assert_eq!(search_clause(&[GroupColumn::Name], false), "");
    }

    #[test]
    fn wildcards_in_search_are_literal() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("ops"), "%ops%");
    }
}
