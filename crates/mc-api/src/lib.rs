//! # mc-api
//!
//! REST API for Madcamp RS: project and scrum-entry endpoints. Scrum
//! mutations trigger the progress calculator best-effort; a calculation
//! failure is logged and reported in the response body, never as an HTTP
//! error for the scrum write itself.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::api_routes;
pub use state::AppState;
