//! crates/adherence_core/src/error.rs
//!
//! Defines the error type for weekly report generation.

use crate::ports::PortError;

/// Failures of `WeeklyReportGenerator::generate`.
///
/// The pipeline itself is total over well-formed input. Every variant other than
/// `Port` describes an event stream that broke its producer's contract.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A DayEntry arrived without the day offset it was scheduled on.
    #[error("Day entry {entry_id} for session '{session_id}' in stream '{event_id}' has no start day")]
    MissingStartDay {
        event_id: String,
        session_id: String,
        entry_id: uuid::Uuid,
    },

    /// A DayEntry was filed under a different offset than its own start day.
    #[error("Day entry for session '{session_id}' in stream '{event_id}' starts on day {start_day} but is filed under day {offset}")]
    StartDayMismatch {
        event_id: String,
        session_id: String,
        offset: i32,
        start_day: i32,
    },

    /// The event-stream collaborator failed.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),
}

/// A convenience type alias for `Result<T, ReportError>`.
pub type ReportResult<T> = Result<T, ReportError>;
