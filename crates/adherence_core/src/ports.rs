//! crates/adherence_core/src/ports.rs
//!
//! Defines the service contracts (traits) the weekly generator depends on.
//! These traits form the boundary of the hexagonal architecture: the event-stream
//! generator and the percentage calculator live outside the core and are plugged
//! in by whoever constructs a `WeeklyReportGenerator`.
//!
//! The contracts are synchronous. Report generation is pure computation over
//! in-memory inputs.

use crate::domain::{AdherenceState, EventStream, EventStreamReport, TimeWindow, WeeklyStream};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Window Sources
//=========================================================================================

/// Anything whose scheduled time windows can be scored.
pub trait WindowSource {
    fn time_windows(&self) -> Box<dyn Iterator<Item = &TimeWindow> + '_>;
}

impl WindowSource for EventStream {
    fn time_windows(&self) -> Box<dyn Iterator<Item = &TimeWindow> + '_> {
        Box::new(self.entries().flat_map(|entry| entry.time_windows.values()))
    }
}

impl WindowSource for WeeklyStream {
    fn time_windows(&self) -> Box<dyn Iterator<Item = &TimeWindow> + '_> {
        Box::new(
            self.by_day_entries
                .values()
                .flatten()
                .flat_map(|cell| cell.time_windows.values()),
        )
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

pub trait EventStreamReportService: Send + Sync {
    /// Computes the per-event schedules for the participant described by `state`.
    fn generate(&self, state: &AdherenceState) -> PortResult<EventStreamReport>;
}

pub trait AdherencePercentCalculator: Send + Sync {
    /// Scores the windows of `sources` as a whole percentage in `0..=100`.
    fn calculate_percent(&self, sources: &[&dyn WindowSource]) -> u8;
}
