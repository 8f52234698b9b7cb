//! Week selection: picks the entries of one event stream that are open during
//! the participant's current week of that stream.

use super::{week_number, SelectedEntry, DAYS_PER_WEEK};
use crate::domain::{DayEntry, EventStream};
use crate::error::{ReportError, ReportResult};
use std::collections::HashSet;
use tracing::debug;

/// Checks that every entry has a start day equal to the offset it is filed under.
pub(crate) fn validate_stream(stream: &EventStream) -> ReportResult<()> {
    for (&offset, entries) in &stream.by_day_entries {
        for entry in entries {
            let start_day = start_day_of(stream, entry)?;
            if start_day != offset {
                return Err(ReportError::StartDayMismatch {
                    event_id: stream.start_event_id.clone(),
                    session_id: entry.session_id.clone(),
                    offset,
                    start_day,
                });
            }
        }
    }
    Ok(())
}

fn start_day_of(stream: &EventStream, entry: &DayEntry) -> ReportResult<i32> {
    entry.start_day.ok_or_else(|| ReportError::MissingStartDay {
        event_id: stream.start_event_id.clone(),
        session_id: entry.session_id.clone(),
        entry_id: entry.id.0,
    })
}

/// Returns `(day_of_week, entry)` pairs for every entry of `stream` with a
/// window open during the current week.
///
/// `days_since_event` of `None` or below zero means the anchor event has not
/// happened yet, and the stream contributes nothing. Entries that started in an
/// earlier week but are still open are placed on day 0.
pub(crate) fn select_current_week(
    stream: &EventStream,
    days_since_event: Option<i32>,
) -> ReportResult<Vec<(u8, SelectedEntry<'_>)>> {
    let Some((days, week)) =
        days_since_event.and_then(|days| week_number(days).map(|week| (days, week)))
    else {
        debug!(event_id = %stream.start_event_id, "Event not yet reached; skipping stream");
        return Ok(Vec::new());
    };
    // Offsets span the whole i32 range; widen so week bounds cannot overflow.
    let week_start = i64::from(days / 7) * 7;
    let week_end = week_start + i64::from(DAYS_PER_WEEK) - 1;

    let mut seen = HashSet::new();
    let mut selected = Vec::new();
    for entry in stream.entries() {
        let start_day = i64::from(start_day_of(stream, entry)?);
        let overlaps = start_day <= week_end
            && entry
                .time_windows
                .values()
                .any(|window| i64::from(window.end_day) >= week_start);
        if !overlaps || !seen.insert(entry.id) {
            continue;
        }
        // start_day <= week_end keeps this within 0..=6.
        let day_of_week = u8::try_from((start_day - week_start).max(0)).unwrap_or(0);
        selected.push((day_of_week, SelectedEntry { entry, week }));
    }

    debug!(
        event_id = %stream.start_event_id,
        week,
        selected = selected.len(),
        "Selected entries for current week"
    );
    Ok(selected)
}
