//! API route definitions

use axum::{
    routing::{get, patch},
    Router,
};

use crate::handlers::{projects, scrums};
use crate::state::AppState;

/// Build the `/api/v1` router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/:id",
            get(projects::get_project).patch(projects::update_project),
        )
        .route(
            "/projects/:id/scrums",
            get(scrums::list_scrums).post(scrums::create_scrum),
        )
        .route("/scrums/:id", patch(scrums::update_scrum))
        .with_state(state)
}
