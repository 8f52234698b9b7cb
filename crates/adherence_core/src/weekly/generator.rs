//! The weekly report generator, wiring the pipeline stages together.

use super::{lookahead, padding, rows, selection, SparseWeek};
use crate::domain::{AdherenceState, EventStreamReport, WeeklyAdherenceReport, WeeklyStream};
use crate::error::ReportResult;
use crate::ports::{AdherencePercentCalculator, EventStreamReportService};
use std::sync::Arc;
use tracing::info;

/// Builds weekly adherence reports from the streams of an
/// `EventStreamReportService`.
///
/// Holds no per-report state, so one instance can serve any number of
/// concurrent callers.
#[derive(Clone)]
pub struct WeeklyReportGenerator {
    event_streams: Arc<dyn EventStreamReportService>,
    calculator: Arc<dyn AdherencePercentCalculator>,
}

impl WeeklyReportGenerator {
    /// Creates a new `WeeklyReportGenerator`.
    pub fn new(
        event_streams: Arc<dyn EventStreamReportService>,
        calculator: Arc<dyn AdherencePercentCalculator>,
    ) -> Self {
        Self {
            event_streams,
            calculator,
        }
    }

    /// Generates the participant's report for their current week.
    ///
    /// Fails only if the event-stream service fails or returns a malformed stream.
    pub fn generate(&self, state: &AdherenceState) -> ReportResult<WeeklyAdherenceReport> {
        // Active windows are never requested for the weekly view.
        let stream_state = state.clone().with_show_active(false);
        let streams = self.event_streams.generate(&stream_state)?;
        assemble(state, &streams, self.calculator.as_ref())
    }
}

fn assemble(
    state: &AdherenceState,
    report: &EventStreamReport,
    calculator: &dyn AdherencePercentCalculator,
) -> ReportResult<WeeklyAdherenceReport> {
    for stream in &report.streams {
        selection::validate_stream(stream)?;
    }

    let mut sparse = SparseWeek::new();
    for stream in &report.streams {
        let days_since = state.days_since_event_by_id(&stream.start_event_id);
        for (day_of_week, selected) in selection::select_current_week(stream, days_since)? {
            sparse.entry(day_of_week).or_default().push(selected);
        }
    }

    let rows::RowExtraction { rows, week } = rows::extract_rows(&sparse);
    let dense = padding::densify(week, rows.len());
    let weekly = WeeklyStream {
        by_day_entries: padding::into_cells(dense),
    };

    let next_activity = lookahead::find_next_activity(state, &weekly, &report.streams);
    let weekly_adherence_percent = calculator.calculate_percent(&[&weekly]);
    let labels = rows.iter().map(|row| row.searchable_label.clone()).collect();

    info!(
        streams = report.streams.len(),
        rows = rows.len(),
        percent = weekly_adherence_percent,
        has_next_activity = next_activity.is_some(),
        "Generated weekly adherence report"
    );

    Ok(WeeklyAdherenceReport {
        by_day_entries: weekly.by_day_entries,
        created_on: state.now,
        client_time_zone: state.client_time_zone.clone(),
        weekly_adherence_percent,
        next_activity,
        rows,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventStream;
    use crate::ports::{PortError, PortResult, WindowSource};
    use chrono::DateTime;
    use std::sync::Mutex;

    /// Records the state it was asked for and returns a fixed report.
    struct RecordingStreams {
        report: EventStreamReport,
        seen: Mutex<Vec<bool>>,
    }

    impl EventStreamReportService for RecordingStreams {
        fn generate(&self, state: &AdherenceState) -> PortResult<EventStreamReport> {
            self.seen.lock().unwrap().push(state.show_active);
            Ok(self.report.clone())
        }
    }

    struct FailingStreams;

    impl EventStreamReportService for FailingStreams {
        fn generate(&self, _state: &AdherenceState) -> PortResult<EventStreamReport> {
            Err(PortError::NotFound("participant".to_string()))
        }
    }

    /// Reports how many windows it was given.
    struct CountingCalculator;

    impl AdherencePercentCalculator for CountingCalculator {
        fn calculate_percent(&self, sources: &[&dyn WindowSource]) -> u8 {
            assert_eq!(sources.len(), 1);
            sources[0].time_windows().count() as u8
        }
    }

    fn state() -> AdherenceState {
        let now = DateTime::parse_from_rfc3339("2024-03-10T09:00:00+00:00").unwrap();
        AdherenceState::new(now, "UTC")
            .with_days_since_event("enrollment", 3)
            .with_show_active(true)
    }

    #[test]
    fn test_streams_are_requested_without_active_flag() {
        let streams = Arc::new(RecordingStreams {
            report: EventStreamReport::default(),
            seen: Mutex::new(Vec::new()),
        });
        let generator = WeeklyReportGenerator::new(streams.clone(), Arc::new(CountingCalculator));

        let report = generator.generate(&state()).unwrap();

        assert_eq!(*streams.seen.lock().unwrap(), vec![false]);
        assert_eq!(report.client_time_zone, "UTC");
        assert_eq!(report.created_on, state().now);
        assert!(report.rows.is_empty());
        assert_eq!(report.by_day_entries.len(), 7);
    }

    #[test]
    fn test_port_failure_is_propagated() {
        let generator = WeeklyReportGenerator::new(Arc::new(FailingStreams), Arc::new(CountingCalculator));
        assert!(matches!(
            generator.generate(&state()),
            Err(crate::error::ReportError::Port(PortError::NotFound(_)))
        ));
    }

    #[test]
    fn test_percent_is_computed_over_the_weekly_grid_only() {
        use crate::domain::{DayEntry, SessionCompletionState, TimeWindow};

        let mut stream = EventStream::new("enrollment");
        for offset in [0, 20, 30] {
            let mut entry = DayEntry::new("s", "Survey", offset);
            entry.add_time_window(TimeWindow {
                window_id: format!("w{offset}"),
                end_day: offset,
                end_date: None,
                state: SessionCompletionState::Completed,
            });
            stream.add_entry(offset, entry);
        }
        let streams = Arc::new(RecordingStreams {
            report: EventStreamReport { streams: vec![stream] },
            seen: Mutex::new(Vec::new()),
        });
        let generator = WeeklyReportGenerator::new(streams, Arc::new(CountingCalculator));

        let report = generator.generate(&state()).unwrap();
        assert_eq!(report.weekly_adherence_percent, 1);
    }
}
