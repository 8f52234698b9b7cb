//! crates/adherence_core/src/domain.rs
//!
//! Defines the pure, core data structures for adherence reporting.
//! These structs are independent of any database or serialization format.
//!
//! The types fall into two phases. `DayEntry` and `EventStream` are produced by
//! the event-stream collaborator and are never mutated here. `GridCell`,
//! `ReportRow` and `WeeklyAdherenceReport` are what the weekly generator builds
//! out of them.

use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

//=========================================================================================
// Collaborator-Produced Types
//=========================================================================================

/// The participant's progress through a single time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCompletionState {
    NotApplicable,
    NotYetAvailable,
    Unstarted,
    Started,
    Completed,
    Abandoned,
    Expired,
    Declined,
}

/// A single scheduled occurrence of an activity within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub window_id: String,
    /// Last day offset (inclusive) on which the window is open, relative to the anchor event.
    pub end_day: i32,
    pub end_date: Option<NaiveDate>,
    pub state: SessionCompletionState,
}

/// Identity token issued to a `DayEntry` when it is created.
///
/// Two entries with identical content but different tokens are different
/// occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// One day's worth of scheduled activity for one session, as produced upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub id: EntryId,
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    /// Day offset from the anchor event. Required; see `ReportError::MissingStartDay`.
    pub start_day: Option<i32>,
    /// `None` when the activity is not applicable to the participant.
    pub start_date: Option<NaiveDate>,
    /// Keyed by window id.
    pub time_windows: BTreeMap<String, TimeWindow>,
}

impl DayEntry {
    pub fn new(session_id: impl Into<String>, session_name: impl Into<String>, start_day: i32) -> Self {
        Self {
            id: EntryId::new(),
            session_id: session_id.into(),
            session_name: session_name.into(),
            session_symbol: None,
            study_burst_id: None,
            study_burst_num: None,
            start_day: Some(start_day),
            start_date: None,
            time_windows: BTreeMap::new(),
        }
    }

    /// Adds a window, replacing any existing window with the same id.
    pub fn add_time_window(&mut self, window: TimeWindow) {
        self.time_windows.insert(window.window_id.clone(), window);
    }

    pub fn has_windows(&self) -> bool {
        !self.time_windows.is_empty()
    }
}

/// One anchor event's sparse schedule of day offset → activities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStream {
    pub start_event_id: String,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    /// Ascending by offset. Offsets may be negative.
    pub by_day_entries: BTreeMap<i32, Vec<DayEntry>>,
}

impl EventStream {
    pub fn new(start_event_id: impl Into<String>) -> Self {
        Self {
            start_event_id: start_event_id.into(),
            ..Default::default()
        }
    }

    /// Appends an entry to the bucket for its own start day.
    pub fn add_entry(&mut self, offset: i32, entry: DayEntry) {
        self.by_day_entries.entry(offset).or_default().push(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &DayEntry> {
        self.by_day_entries.values().flatten()
    }
}

/// The event-stream collaborator's output: one stream per tracked event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStreamReport {
    pub streams: Vec<EventStream>,
}

/// Participant-specific inputs to report generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdherenceState {
    /// Current time in the participant's offset.
    pub now: DateTime<FixedOffset>,
    pub client_time_zone: String,
    /// Days elapsed since each anchor event, keyed by event id.
    pub days_since_event: HashMap<String, i32>,
    pub show_active: bool,
}

impl AdherenceState {
    pub fn new(now: DateTime<FixedOffset>, client_time_zone: impl Into<String>) -> Self {
        Self {
            now,
            client_time_zone: client_time_zone.into(),
            days_since_event: HashMap::new(),
            show_active: false,
        }
    }

    pub fn with_days_since_event(mut self, event_id: impl Into<String>, days: i32) -> Self {
        self.days_since_event.insert(event_id.into(), days);
        self
    }

    pub fn with_show_active(mut self, show_active: bool) -> Self {
        self.show_active = show_active;
        self
    }

    /// Days since the named event, or `None` if the event has not been recorded.
    pub fn days_since_event_by_id(&self, event_id: &str) -> Option<i32> {
        self.days_since_event.get(event_id).copied()
    }

    /// The participant's current local date.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

//=========================================================================================
// Report Types
//=========================================================================================

/// A DayEntry after its display metadata has moved onto its `ReportRow`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridCell {
    /// `None` for padding placeholders.
    pub session_id: Option<String>,
    pub start_day: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub time_windows: BTreeMap<String, TimeWindow>,
}

impl GridCell {
    /// An empty cell standing in for a row with nothing scheduled that day.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// True when the cell has a known date and at least one window.
    pub fn is_active(&self) -> bool {
        self.start_date.is_some() && !self.time_windows.is_empty()
    }
}

/// Labels and orders one row of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportRow {
    pub label: String,
    /// Colon-delimited so substring searches cannot match across label parts.
    pub searchable_label: String,
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    pub week: u32,
}

/// The upcoming activity shown when nothing is active this week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextActivity {
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub week: Option<u32>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    pub start_date: NaiveDate,
}

/// The merged, dense week: day of week (0-6) → one cell per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyStream {
    pub by_day_entries: BTreeMap<u8, Vec<GridCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAdherenceReport {
    pub by_day_entries: BTreeMap<u8, Vec<GridCell>>,
    pub created_on: DateTime<FixedOffset>,
    pub client_time_zone: String,
    pub weekly_adherence_percent: u8,
    pub next_activity: Option<NextActivity>,
    pub rows: Vec<ReportRow>,
    /// Searchable labels in row order. Kept for clients that still search on them.
    pub labels: Vec<String>,
}
