//! Shared fixtures for the weekly report tests.
#![allow(dead_code)]

use adherence_core::{
    AdherenceState, CompletionStateCalculator, DayEntry, EventStream, EventStreamReport,
    EventStreamReportService, PortResult, SessionCompletionState, TimeWindow, WeeklyReportGenerator,
};
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;

/// Serves the same pre-computed streams for every participant.
pub struct FixedStreams(pub Vec<EventStream>);

impl EventStreamReportService for FixedStreams {
    fn generate(&self, _state: &AdherenceState) -> PortResult<EventStreamReport> {
        Ok(EventStreamReport {
            streams: self.0.clone(),
        })
    }
}

pub fn generator(streams: Vec<EventStream>) -> WeeklyReportGenerator {
    WeeklyReportGenerator::new(
        Arc::new(FixedStreams(streams)),
        Arc::new(CompletionStateCalculator),
    )
}

/// 2024-03-10 in the participant's offset.
pub fn state() -> AdherenceState {
    let now = DateTime::parse_from_rfc3339("2024-03-10T09:00:00-05:00").unwrap();
    AdherenceState::new(now, "America/Chicago")
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn window(id: &str, end_day: i32, state: SessionCompletionState) -> TimeWindow {
    TimeWindow {
        window_id: id.to_string(),
        end_day,
        end_date: None,
        state,
    }
}

/// An entry for `session` on `start_day` with one unstarted window ending on `end_day`.
pub fn entry(session: &str, start_day: i32, end_day: i32, start_date: Option<NaiveDate>) -> DayEntry {
    let mut entry = DayEntry::new(format!("{session}-guid"), session, start_day);
    entry.start_date = start_date;
    entry.add_time_window(window(
        &format!("{session}-{start_day}"),
        end_day,
        SessionCompletionState::Unstarted,
    ));
    entry
}

pub fn stream(event_id: &str, entries: Vec<DayEntry>) -> EventStream {
    let mut stream = EventStream::new(event_id);
    for entry in entries {
        let offset = entry.start_day.unwrap_or_default();
        stream.add_entry(offset, entry);
    }
    stream
}
