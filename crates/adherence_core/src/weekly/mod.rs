//! crates/adherence_core/src/weekly/mod.rs
//!
//! The weekly adherence report pipeline.
//!
//! Each event stream is windowed to the participant's current week, the
//! selections are merged into one sparse week, display metadata is hoisted into
//! rows, the week is padded to a dense 7 x rows grid, and finally the report is
//! scored and given a lookahead when nothing is active.

mod generator;
mod lookahead;
mod padding;
mod rows;
mod selection;

pub use generator::WeeklyReportGenerator;

use crate::domain::{DayEntry, GridCell};
use std::collections::BTreeMap;

/// Number of day-of-week columns in a weekly report.
pub const DAYS_PER_WEEK: u8 = 7;

/// A DayEntry chosen for the current week, with its 1-based week number.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectedEntry<'a> {
    pub entry: &'a DayEntry,
    pub week: u32,
}

/// Day of week → selected entries, in selection order. Days may be missing.
pub(crate) type SparseWeek<'a> = BTreeMap<u8, Vec<SelectedEntry<'a>>>;

/// A grid cell tagged with the index of the row it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlacedCell {
    pub row: usize,
    pub cell: GridCell,
}

/// Day of week → placed cells.
pub(crate) type PlacedWeek = BTreeMap<u8, Vec<PlacedCell>>;

/// 1-based week number for a count of elapsed days, or `None` before the event.
pub(crate) fn week_number(days_since_event: i32) -> Option<u32> {
    u32::try_from(days_since_event).ok().map(|days| days / 7 + 1)
}
