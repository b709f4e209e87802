//! Project repository
//!
//! Database operations for projects. The `progress` column is only ever
//! written through `update_progress`; the regular update path cannot touch
//! it.

use chrono::{DateTime, Utc};
use mc_core::traits::Id;
use sqlx::{FromRow, PgPool};

use crate::repository::{PaginatedResult, Pagination, RepositoryResult};

/// Project database entity
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub planning: Option<String>,
    pub progress: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    /// Progress as surfaced to callers; NULL means "never computed", i.e. 0.
    pub fn progress_or_zero(&self) -> i32 {
        self.progress.unwrap_or(0)
    }
}

/// DTO for creating a project
#[derive(Debug, Clone)]
pub struct CreateProjectDto {
    pub name: String,
    pub planning: Option<String>,
}

/// DTO for updating a project (progress is deliberately absent)
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectDto {
    pub name: Option<String>,
    pub planning: Option<String>,
}

/// Project repository implementation
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ProjectRow>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, planning, progress, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResult<ProjectRow>> {
        let items = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, planning, progress, created_at, updated_at
            FROM projects
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(PaginatedResult::new(items, total, pagination))
    }

    pub async fn create(&self, dto: CreateProjectDto) -> RepositoryResult<ProjectRow> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, planning, progress, created_at, updated_at)
            VALUES ($1, $2, 0, NOW(), NOW())
            RETURNING id, name, planning, progress, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.planning)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, dto: UpdateProjectDto) -> RepositoryResult<Option<ProjectRow>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                planning = COALESCE($3, planning),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, planning, progress, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.planning)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Persist a newly computed progress value. Returns whether a row was
    /// actually updated.
    pub async fn update_progress(&self, id: Id, progress: i32) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET progress = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(progress)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_row(progress: Option<i32>) -> ProjectRow {
        ProjectRow {
            id: 1,
            name: "Chat App".into(),
            planning: Some("Build a chat app with auth and messaging".into()),
            progress,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_progress_defaults_to_zero() {
        assert_eq!(sample_row(None).progress_or_zero(), 0);
        assert_eq!(sample_row(Some(45)).progress_or_zero(), 45);
    }

    #[test]
    fn test_update_dto_cannot_carry_progress() {
        // Compile-time contract: UpdateProjectDto has no progress field.
        let dto = UpdateProjectDto {
            name: Some("Renamed".into()),
            planning: None,
        };
        assert!(dto.planning.is_none());
    }
}
