//! # mc-progress
//!
//! Derives a 0-100 completion estimate for a project from its planning
//! document and cumulative scrum history, using an external chat-completion
//! API, and persists the result on the project row.
//!
//! The pipeline is a single sequential pass: read project, read scrums,
//! build a prompt, call the completion API, extract the first digit run
//! from the reply, clamp to [0, 100], write it back. Every failure mode is
//! reported as a tagged [`ProgressError`] so callers can log and move on;
//! a failed recomputation must never fail the scrum write that triggered
//! it.

pub mod calculator;
pub mod completion;
pub mod parse;
pub mod prompt;
pub mod store;

pub use calculator::{ComputedProgress, ProgressCalculator, ProgressError};
pub use completion::{CompletionClient, CompletionError, CompletionRequest, HttpCompletionClient};
pub use prompt::PromptLimits;
pub use store::{DbProgressStore, ProgressStore, ProjectSnapshot, ScrumSnapshot, StoreError};
