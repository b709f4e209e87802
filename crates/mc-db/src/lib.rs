//! # mc-db
//!
//! Database layer for Madcamp RS: PostgreSQL pool management and the
//! project / scrum-entry repositories.

pub mod pool;
pub mod projects;
pub mod repository;
pub mod scrums;

pub use pool::{Database, DatabaseConfig};
pub use projects::{CreateProjectDto, ProjectRepository, ProjectRow, UpdateProjectDto};
pub use repository::{PaginatedResult, Pagination, RepositoryError, RepositoryResult};
pub use scrums::{CreateScrumDto, ScrumRepository, ScrumRow, UpdateScrumDto};
