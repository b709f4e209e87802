//! API handlers

pub mod projects;
pub mod scrums;
