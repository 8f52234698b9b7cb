pub mod domain;
pub mod error;
pub mod percent;
pub mod ports;
pub mod weekly;

pub use domain::{
    AdherenceState, DayEntry, EntryId, EventStream, EventStreamReport, GridCell, NextActivity,
    ReportRow, SessionCompletionState, TimeWindow, WeeklyAdherenceReport, WeeklyStream,
};
pub use error::{ReportError, ReportResult};
pub use percent::CompletionStateCalculator;
pub use ports::{
    AdherencePercentCalculator, EventStreamReportService, PortError, PortResult, WindowSource,
};
pub use weekly::WeeklyReportGenerator;
