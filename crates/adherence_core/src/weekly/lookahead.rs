//! Lookahead: when nothing is active this week, finds the participant's next
//! scheduled activity.

use super::week_number;
use crate::domain::{AdherenceState, EventStream, NextActivity, WeeklyStream};

/// Returns the first future activity across `streams`, or `None` when the
/// dense week already has an active cell.
///
/// Streams are scanned in order, each by ascending offset. Entries without a
/// start date or without windows are not applicable to the participant and are
/// never returned.
pub(crate) fn find_next_activity(
    state: &AdherenceState,
    week: &WeeklyStream,
    streams: &[EventStream],
) -> Option<NextActivity> {
    let has_activity = week.by_day_entries.values().flatten().any(|cell| cell.is_active());
    if has_activity {
        return None;
    }

    let today = state.today();
    for stream in streams {
        for entry in stream.entries() {
            let Some(start_date) = entry.start_date else {
                continue;
            };
            if !entry.has_windows() || start_date <= today {
                continue;
            }
            return Some(NextActivity {
                session_id: entry.session_id.clone(),
                session_name: entry.session_name.clone(),
                session_symbol: entry.session_symbol.clone(),
                week: state
                    .days_since_event_by_id(&stream.start_event_id)
                    .and_then(week_number),
                study_burst_id: stream.study_burst_id.clone(),
                study_burst_num: stream.study_burst_num,
                start_date,
            });
        }
    }
    None
}
