//! Progress store
//!
//! The narrow persistence surface the calculator needs: read one project,
//! list its scrum entries oldest-first, and write back the computed
//! progress. Behind a trait so tests run against an in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use mc_db::{ProjectRepository, ScrumRepository};
use sqlx::PgPool;

/// Store failure; the calculator maps these onto its own error taxonomy
/// depending on which step failed.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<mc_db::RepositoryError> for StoreError {
    fn from(err: mc_db::RepositoryError) -> Self {
        StoreError(err.to_string())
    }
}

/// The slice of a project the calculator reads
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub id: i64,
    pub name: String,
    pub planning: Option<String>,
    pub progress: Option<i32>,
}

/// The slice of a scrum entry the calculator reads
#[derive(Debug, Clone)]
pub struct ScrumSnapshot {
    pub entry_date: NaiveDate,
    pub done: Option<String>,
    pub plan: Option<String>,
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the project, or None if it does not exist.
    async fn get_project(&self, project_id: i64) -> Result<Option<ProjectSnapshot>, StoreError>;

    /// All scrum entries for the project ordered by entry date ascending.
    async fn list_scrums(&self, project_id: i64) -> Result<Vec<ScrumSnapshot>, StoreError>;

    /// Persist the computed progress on the project row.
    async fn store_progress(&self, project_id: i64, progress: i32) -> Result<(), StoreError>;
}

/// Postgres-backed store over the mc-db repositories
pub struct DbProgressStore {
    projects: ProjectRepository,
    scrums: ScrumRepository,
}

impl DbProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            scrums: ScrumRepository::new(pool),
        }
    }
}

#[async_trait]
impl ProgressStore for DbProgressStore {
    async fn get_project(&self, project_id: i64) -> Result<Option<ProjectSnapshot>, StoreError> {
        let row = self.projects.find_by_id(project_id).await?;
        Ok(row.map(|p| ProjectSnapshot {
            id: p.id,
            name: p.name,
            planning: p.planning,
            progress: p.progress,
        }))
    }

    async fn list_scrums(&self, project_id: i64) -> Result<Vec<ScrumSnapshot>, StoreError> {
        let rows = self.scrums.list_for_project(project_id).await?;
        Ok(rows
            .into_iter()
            .map(|s| ScrumSnapshot {
                entry_date: s.entry_date,
                done: s.done,
                plan: s.plan,
            })
            .collect())
    }

    async fn store_progress(&self, project_id: i64, progress: i32) -> Result<(), StoreError> {
        let updated = self.projects.update_progress(project_id, progress).await?;
        if !updated {
            return Err(StoreError(format!(
                "project {} vanished before progress write",
                project_id
            )));
        }
        Ok(())
    }
}
