//! services/api/src/adapters/submitted_streams.rs
//!
//! This module contains the adapter that serves event streams submitted with a
//! request. It implements the `EventStreamReportService` port from the `core` crate.

use adherence_core::{AdherenceState, EventStreamReport, EventStreamReportService, PortResult};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `EventStreamReportService` over streams the caller
/// has already computed.
#[derive(Clone, Debug)]
pub struct SubmittedStreamsAdapter {
    report: EventStreamReport,
}

impl SubmittedStreamsAdapter {
    /// Creates a new `SubmittedStreamsAdapter`.
    pub fn new(report: EventStreamReport) -> Self {
        Self { report }
    }
}

//=========================================================================================
// `EventStreamReportService` Trait Implementation
//=========================================================================================

impl EventStreamReportService for SubmittedStreamsAdapter {
    /// Returns the submitted streams. They were computed by the caller for this
    /// participant, so `state` is not consulted.
    fn generate(&self, state: &AdherenceState) -> PortResult<EventStreamReport> {
        debug!(
            streams = self.report.streams.len(),
            client_time_zone = %state.client_time_zone,
            "Serving submitted event streams"
        );
        Ok(self.report.clone())
    }
}
