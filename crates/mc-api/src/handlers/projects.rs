//! Project API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mc_core::traits::Id;
use mc_db::{CreateProjectDto, Pagination, ProjectRow, UpdateProjectDto};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let pagination = Pagination::page(params.page, params.per_page.clamp(1, 100));
    let result = state.projects().find_all(pagination).await?;

    Ok(Json(ProjectCollection {
        total: result.total,
        count: result.items.len(),
        page: result.page(),
        page_size: result.limit,
        elements: result.items.into_iter().map(ProjectResponse::from).collect(),
    }))
}

/// GET /api/v1/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .projects()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    Ok(Json(ProjectResponse::from(row)))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> ApiResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("name must not be empty"));
    }

    let row = state
        .projects()
        .create(CreateProjectDto {
            name: body.name,
            planning: body.planning,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(row))))
}

/// PATCH /api/v1/projects/:id
///
/// `progress` is not accepted here; it is only ever written by the
/// calculator.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(body): Json<UpdateProjectBody>,
) -> ApiResult<impl IntoResponse> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("name must not be empty"));
        }
    }

    let row = state
        .projects()
        .update(
            id,
            UpdateProjectDto {
                name: body.name,
                planning: body.planning,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    Ok(Json(ProjectResponse::from(row)))
}

// DTOs

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCollection {
    pub total: i64,
    pub count: usize,
    pub page: i64,
    pub page_size: i64,
    pub elements: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Id,
    pub name: String,
    pub planning: Option<String>,
    pub progress: i32,
}

impl From<ProjectRow> for ProjectResponse {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            progress: row.progress_or_zero(),
            planning: row.planning,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    pub name: String,
    pub planning: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectBody {
    pub name: Option<String>,
    pub planning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_project_response_reports_zero_for_uncomputed() {
        let row = ProjectRow {
            id: 1,
            name: "Chat App".into(),
            planning: None,
            progress: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let resp = ProjectResponse::from(row);
        assert_eq!(resp.progress, 0);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let resp = ProjectResponse {
            id: 1,
            name: "Chat App".into(),
            planning: None,
            progress: 45,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["progress"], 45);
        assert_eq!(json["name"], "Chat App");
    }

    #[test]
    fn test_update_body_has_no_progress_field() {
        // A client-supplied progress must be rejected by serde.
        let result: Result<UpdateProjectBody, _> = serde_json::from_str(r#"{"progress": 99}"#);
        // Unknown fields are ignored by default, so the parse succeeds but
        // nothing maps onto progress.
        let body = result.unwrap();
        assert!(body.name.is_none());
        assert!(body.planning.is_none());
    }
}
