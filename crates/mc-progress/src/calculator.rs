//! Progress calculation pipeline
//!
//! One operation: [`ProgressCalculator::compute_and_store`]. Invoked by the
//! scrum create/update handlers after every write. The caller logs failures
//! and keeps serving its own response; recomputation is best-effort, never
//! transactional with the scrum write.

use std::sync::Arc;

use tracing::{debug, info};

use crate::completion::{CompletionClient, CompletionRequest};
use crate::parse::{clamp_progress, extract_digit_run};
use crate::prompt::{build_progress_prompt, PromptLimits, SYSTEM_INSTRUCTION};
use crate::store::ProgressStore;

/// Tagged failure modes of one calculation pass
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Stale identifier; not retryable.
    #[error("project {project_id} not found")]
    ProjectNotFound { project_id: i64 },

    /// Transient store read failure; the whole calculation is safe to
    /// retry later.
    #[error("failed to read scrum history: {0}")]
    ScrumFetchFailed(String),

    /// Completion call failed (transport, timeout, non-2xx, empty body).
    /// The stored progress keeps its previous value.
    #[error("completion API unavailable: {0}")]
    LlmUnavailable(String),

    /// The value was computed but could not be written back. `computed` is
    /// carried for logging; callers must not assume it is durable.
    #[error("failed to persist progress {computed}: {message}")]
    PersistenceError { computed: i32, message: String },
}

/// Successful result of one calculation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedProgress {
    pub progress: i32,
}

/// Derives and persists a project's completion percentage.
pub struct ProgressCalculator {
    store: Arc<dyn ProgressStore>,
    client: Arc<dyn CompletionClient>,
    limits: PromptLimits,
}

impl ProgressCalculator {
    pub fn new(
        store: Arc<dyn ProgressStore>,
        client: Arc<dyn CompletionClient>,
        limits: PromptLimits,
    ) -> Self {
        Self {
            store,
            client,
            limits,
        }
    }

    /// Recompute the project's progress from its planning text and scrum
    /// history and persist the result. Idempotent per call when the
    /// completion backend is deterministic.
    pub async fn compute_and_store(
        &self,
        project_id: i64,
    ) -> Result<ComputedProgress, ProgressError> {
        let project = self
            .store
            .get_project(project_id)
            .await
            .map_err(|e| ProgressError::ScrumFetchFailed(e.to_string()))?
            .ok_or(ProgressError::ProjectNotFound { project_id })?;

        let scrums = self
            .store
            .list_scrums(project_id)
            .await
            .map_err(|e| ProgressError::ScrumFetchFailed(e.to_string()))?;

        let prompt = build_progress_prompt(
            &project.name,
            project.planning.as_deref(),
            &scrums,
            self.limits,
        );
        debug!(
            project_id,
            scrum_count = scrums.len(),
            prompt_chars = prompt.len(),
            "built progress prompt"
        );

        let reply = self
            .client
            .complete(CompletionRequest {
                system: SYSTEM_INSTRUCTION.to_string(),
                user: prompt,
            })
            .await
            .map_err(|e| ProgressError::LlmUnavailable(e.to_string()))?;

        let raw = extract_digit_run(&reply);
        let progress = clamp_progress(raw);

        self.store
            .store_progress(project_id, progress)
            .await
            .map_err(|e| ProgressError::PersistenceError {
                computed: progress,
                message: e.to_string(),
            })?;

        info!(
            project_id,
            progress,
            previous = project.progress.unwrap_or(0),
            "project progress updated"
        );

        Ok(ComputedProgress { progress })
    }
}
