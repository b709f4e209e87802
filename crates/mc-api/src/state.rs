//! Application state shared by the API handlers

use std::sync::Arc;

use mc_db::{ProjectRepository, ScrumRepository};
use mc_progress::ProgressCalculator;
use sqlx::PgPool;

/// Application state: the connection pool plus the shared progress
/// calculator. Repositories are constructed per call; they only wrap the
/// pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub calculator: Arc<ProgressCalculator>,
}

impl AppState {
    pub fn new(pool: PgPool, calculator: Arc<ProgressCalculator>) -> Self {
        Self { pool, calculator }
    }

    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.pool.clone())
    }

    pub fn scrums(&self) -> ScrumRepository {
        ScrumRepository::new(self.pool.clone())
    }
}
