//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `DashboardError`, so functions can simply return `Result<T>`.
use crate::error::DashboardError;

/// Workspace-wide `Result` alias with `DashboardError` as the default error.
pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
