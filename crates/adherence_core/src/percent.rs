//! crates/adherence_core/src/percent.rs
//!
//! The default `AdherencePercentCalculator`, scoring windows by completion state.

use crate::domain::SessionCompletionState;
use crate::ports::{AdherencePercentCalculator, WindowSource};

/// Scores completed windows against every window whose outcome counts.
///
/// `NotApplicable` and `NotYetAvailable` windows are left out entirely. With no
/// counted windows the participant is considered fully adherent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionStateCalculator;

impl AdherencePercentCalculator for CompletionStateCalculator {
    fn calculate_percent(&self, sources: &[&dyn WindowSource]) -> u8 {
        let mut compliant: u64 = 0;
        let mut counted: u64 = 0;
        for window in sources.iter().flat_map(|source| source.time_windows()) {
            match window.state {
                SessionCompletionState::Completed => {
                    compliant += 1;
                    counted += 1;
                }
                SessionCompletionState::Abandoned
                | SessionCompletionState::Expired
                | SessionCompletionState::Declined
                | SessionCompletionState::Started
                | SessionCompletionState::Unstarted => counted += 1,
                SessionCompletionState::NotApplicable | SessionCompletionState::NotYetAvailable => {}
            }
        }
        if counted == 0 {
            return 100;
        }
        // compliant <= counted, so the quotient is at most 100.
        u8::try_from(compliant * 100 / counted).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayEntry, EventStream, TimeWindow};

    fn stream_with_states(states: &[SessionCompletionState]) -> EventStream {
        let mut entry = DayEntry::new("session", "Session", 0);
        for (i, state) in states.iter().enumerate() {
            entry.add_time_window(TimeWindow {
                window_id: format!("win{i}"),
                end_day: 0,
                end_date: None,
                state: *state,
            });
        }
        let mut stream = EventStream::new("enrollment");
        stream.add_entry(0, entry);
        stream
    }

    #[test]
    fn test_no_windows_is_fully_adherent() {
        let stream = EventStream::new("enrollment");
        assert_eq!(CompletionStateCalculator.calculate_percent(&[&stream]), 100);
    }

    #[test]
    fn test_ignored_states_do_not_count() {
        let stream = stream_with_states(&[
            SessionCompletionState::NotApplicable,
            SessionCompletionState::NotYetAvailable,
        ]);
        assert_eq!(CompletionStateCalculator.calculate_percent(&[&stream]), 100);
    }

    #[test]
    fn test_percentage_rounds_down() {
        let stream = stream_with_states(&[
            SessionCompletionState::Completed,
            SessionCompletionState::Expired,
            SessionCompletionState::Unstarted,
            SessionCompletionState::NotApplicable,
        ]);
        assert_eq!(CompletionStateCalculator.calculate_percent(&[&stream]), 33);
    }

    #[test]
    fn test_counts_across_sources() {
        let done = stream_with_states(&[SessionCompletionState::Completed]);
        let missed = stream_with_states(&[SessionCompletionState::Declined]);
        assert_eq!(CompletionStateCalculator.calculate_percent(&[&done, &missed]), 50);
    }
}
