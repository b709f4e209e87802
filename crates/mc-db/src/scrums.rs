//! Scrum entry repository
//!
//! Daily scrum notes per project: what was done, what is planned, and
//! optional extra notes. One entry per project per calendar day is the
//! expected cadence; listings are always ordered by entry date ascending.

use chrono::{DateTime, NaiveDate, Utc};
use mc_core::traits::Id;
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

/// Scrum entry database entity
#[derive(Debug, Clone, FromRow)]
pub struct ScrumRow {
    pub id: i64,
    pub project_id: i64,
    pub entry_date: NaiveDate,
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a scrum entry
#[derive(Debug, Clone)]
pub struct CreateScrumDto {
    pub project_id: i64,
    pub entry_date: NaiveDate,
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
}

/// DTO for updating a scrum entry
#[derive(Debug, Clone, Default)]
pub struct UpdateScrumDto {
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
}

/// Scrum entry repository implementation
pub struct ScrumRepository {
    pool: PgPool,
}

impl ScrumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ScrumRow>> {
        let row = sqlx::query_as::<_, ScrumRow>(
            r#"
            SELECT id, project_id, entry_date, done, plan, others, created_at, updated_at
            FROM scrum_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All entries for a project, oldest first.
    pub async fn list_for_project(&self, project_id: Id) -> RepositoryResult<Vec<ScrumRow>> {
        let rows = sqlx::query_as::<_, ScrumRow>(
            r#"
            SELECT id, project_id, entry_date, done, plan, others, created_at, updated_at
            FROM scrum_entries
            WHERE project_id = $1
            ORDER BY entry_date ASC, id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, dto: CreateScrumDto) -> RepositoryResult<ScrumRow> {
        let row = sqlx::query_as::<_, ScrumRow>(
            r#"
            INSERT INTO scrum_entries (project_id, entry_date, done, plan, others, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, project_id, entry_date, done, plan, others, created_at, updated_at
            "#,
        )
        .bind(dto.project_id)
        .bind(dto.entry_date)
        .bind(&dto.done)
        .bind(&dto.plan)
        .bind(&dto.others)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, dto: UpdateScrumDto) -> RepositoryResult<Option<ScrumRow>> {
        let row = sqlx::query_as::<_, ScrumRow>(
            r#"
            UPDATE scrum_entries
            SET done = COALESCE($2, done),
                plan = COALESCE($3, plan),
                others = COALESCE($4, others),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, entry_date, done, plan, others, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.done)
        .bind(&dto.plan)
        .bind(&dto.others)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

impl mc_core::traits::ProjectScoped for ScrumRow {
    fn project_id(&self) -> Id {
        self.project_id
    }
}
