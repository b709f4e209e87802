//! # mc-core
//!
//! Core types and utilities shared across the Madcamp RS crates:
//! - Common error types
//! - Result type alias
//! - Core traits (Identifiable, Timestamped)
//! - Configuration types

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use config::*;
pub use error::*;
pub use result::*;
pub use traits::*;
