//! Scrum entry API handlers
//!
//! Scrum create/update is the trigger for progress recomputation. The
//! recomputation is best-effort: its outcome is reported inside the
//! response body, and a failure there never turns the scrum write into an
//! HTTP error.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use mc_core::traits::Id;
use mc_db::{CreateScrumDto, ScrumRow, UpdateScrumDto};
use mc_progress::ProgressError;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/projects/:id/scrums
pub async fn list_scrums(
    State(state): State<AppState>,
    Path(project_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    if !state.projects().exists(project_id).await? {
        return Err(ApiError::not_found("Project", project_id));
    }

    let rows = state.scrums().list_for_project(project_id).await?;
    Ok(Json(
        rows.into_iter().map(ScrumResponse::from).collect::<Vec<_>>(),
    ))
}

/// POST /api/v1/projects/:id/scrums
pub async fn create_scrum(
    State(state): State<AppState>,
    Path(project_id): Path<Id>,
    Json(body): Json<CreateScrumBody>,
) -> ApiResult<impl IntoResponse> {
    if !state.projects().exists(project_id).await? {
        return Err(ApiError::not_found("Project", project_id));
    }

    let row = state
        .scrums()
        .create(CreateScrumDto {
            project_id,
            entry_date: body.entry_date,
            done: body.done,
            plan: body.plan,
            others: body.others,
        })
        .await?;

    let progress = recompute_progress(&state, project_id).await;

    Ok((
        StatusCode::CREATED,
        Json(ScrumMutationResponse {
            scrum: ScrumResponse::from(row),
            progress_update_triggered: true,
            updated_progress: progress.updated_progress,
            progress_calculation_success: progress.success,
        }),
    ))
}

/// PATCH /api/v1/scrums/:id
pub async fn update_scrum(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(body): Json<UpdateScrumBody>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .scrums()
        .update(
            id,
            UpdateScrumDto {
                done: body.done,
                plan: body.plan,
                others: body.others,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("ScrumEntry", id))?;

    let progress = recompute_progress(&state, row.project_id).await;

    Ok(Json(ScrumMutationResponse {
        scrum: ScrumResponse::from(row),
        progress_update_triggered: true,
        updated_progress: progress.updated_progress,
        progress_calculation_success: progress.success,
    }))
}

struct ProgressOutcome {
    updated_progress: Option<i32>,
    success: bool,
}

/// Run the calculator and swallow its failure into the response fields.
async fn recompute_progress(state: &AppState, project_id: Id) -> ProgressOutcome {
    match state.calculator.compute_and_store(project_id).await {
        Ok(computed) => ProgressOutcome {
            updated_progress: Some(computed.progress),
            success: true,
        },
        Err(ProgressError::PersistenceError { computed, message }) => {
            warn!(
                project_id,
                computed,
                error = %message,
                "progress computed but not persisted"
            );
            // Computed value is surfaced for observability; it is not
            // durable.
            ProgressOutcome {
                updated_progress: Some(computed),
                success: false,
            }
        }
        Err(e) => {
            warn!(project_id, error = %e, "progress recomputation failed");
            ProgressOutcome {
                updated_progress: None,
                success: false,
            }
        }
    }
}

// DTOs

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScrumBody {
    pub entry_date: NaiveDate,
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScrumBody {
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrumResponse {
    pub id: Id,
    pub project_id: Id,
    pub entry_date: NaiveDate,
    pub done: Option<String>,
    pub plan: Option<String>,
    pub others: Option<String>,
}

impl From<ScrumRow> for ScrumResponse {
    fn from(row: ScrumRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            entry_date: row.entry_date,
            done: row.done,
            plan: row.plan,
            others: row.others,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrumMutationResponse {
    pub scrum: ScrumResponse,
    pub progress_update_triggered: bool,
    pub updated_progress: Option<i32>,
    pub progress_calculation_success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_response_field_names() {
        let resp = ScrumMutationResponse {
            scrum: ScrumResponse {
                id: 3,
                project_id: 1,
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                done: Some("built auth".into()),
                plan: None,
                others: None,
            },
            progress_update_triggered: true,
            updated_progress: Some(45),
            progress_calculation_success: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["progressUpdateTriggered"], true);
        assert_eq!(json["updatedProgress"], 45);
        assert_eq!(json["progressCalculationSuccess"], true);
        assert_eq!(json["scrum"]["projectId"], 1);
    }

    #[test]
    fn test_create_body_parses_entry_date() {
        let body: CreateScrumBody =
            serde_json::from_str(r#"{"entryDate":"2024-01-03","done":"built auth"}"#).unwrap();
        assert_eq!(
            body.entry_date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_eq!(body.done.as_deref(), Some("built auth"));
        assert!(body.plan.is_none());
    }
}
