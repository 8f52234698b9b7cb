//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use adherence_core::{PortError, ReportError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a report that could not be generated from the submitted streams.
    #[error("Report Error: {0}")]
    Report(#[from] ReportError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Report(ReportError::MissingStartDay { .. })
            | ApiError::Report(ReportError::StartDayMismatch { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Report(ReportError::Port(_)) | ApiError::Port(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Config(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!("Request failed with {}: {}", status, self);
        // Contract violations are the caller's to fix, so they get the detail.
        let message = if status == StatusCode::UNPROCESSABLE_ENTITY {
            self.to_string()
        } else {
            "Failed to generate weekly report".to_string()
        };
        (status, message).into_response()
    }
}
