//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged with clients of the report API, and
//! their conversions to and from the core domain types.

use adherence_core::{
    AdherenceState, DayEntry, EntryId, EventStream, EventStreamReport, GridCell, NextActivity,
    ReportRow, SessionCompletionState, TimeWindow, WeeklyAdherenceReport,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Request Payloads
//=========================================================================================

/// The participant state and the event streams already computed for them.
#[derive(Deserialize, Debug, ToSchema)]
pub struct WeeklyReportRequest {
    pub state: AdherenceStateDto,
    pub streams: Vec<EventStreamDto>,
}

impl WeeklyReportRequest {
    pub fn into_domain(self) -> (AdherenceState, EventStreamReport) {
        let report = EventStreamReport {
            streams: self.streams.into_iter().map(EventStreamDto::into_domain).collect(),
        };
        (self.state.into_domain(), report)
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceStateDto {
    /// Current time with the participant's UTC offset.
    #[schema(value_type = String, format = DateTime)]
    pub now: DateTime<FixedOffset>,
    pub client_time_zone: String,
    /// Days since each anchor event, keyed by event id. Missing events have not occurred.
    #[serde(default)]
    pub days_since_event: HashMap<String, i32>,
    #[serde(default)]
    pub show_active: bool,
}

impl AdherenceStateDto {
    fn into_domain(self) -> AdherenceState {
        AdherenceState {
            now: self.now,
            client_time_zone: self.client_time_zone,
            days_since_event: self.days_since_event,
            show_active: self.show_active,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventStreamDto {
    pub start_event_id: String,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    #[serde(default)]
    pub by_day_entries: BTreeMap<i32, Vec<DayEntryDto>>,
}

impl EventStreamDto {
    fn into_domain(self) -> EventStream {
        EventStream {
            start_event_id: self.start_event_id,
            study_burst_id: self.study_burst_id,
            study_burst_num: self.study_burst_num,
            by_day_entries: self
                .by_day_entries
                .into_iter()
                .map(|(offset, entries)| {
                    (offset, entries.into_iter().map(DayEntryDto::into_domain).collect())
                })
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryDto {
    /// Identity of this occurrence. A fresh id is issued when omitted.
    pub id: Option<Uuid>,
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    pub start_day: Option<i32>,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_windows: Vec<TimeWindowDto>,
}

impl DayEntryDto {
    fn into_domain(self) -> DayEntry {
        let mut entry = DayEntry {
            id: self.id.map(EntryId).unwrap_or_default(),
            session_id: self.session_id,
            session_name: self.session_name,
            session_symbol: self.session_symbol,
            study_burst_id: self.study_burst_id,
            study_burst_num: self.study_burst_num,
            start_day: self.start_day,
            start_date: self.start_date,
            time_windows: BTreeMap::new(),
        };
        for window in self.time_windows {
            entry.add_time_window(window.into());
        }
        entry
    }
}

//=========================================================================================
// Payloads Shared by Requests and Responses
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindowDto {
    pub window_id: String,
    pub end_day: i32,
    pub end_date: Option<NaiveDate>,
    pub state: SessionCompletionStateDto,
}

impl From<TimeWindowDto> for TimeWindow {
    fn from(dto: TimeWindowDto) -> Self {
        Self {
            window_id: dto.window_id,
            end_day: dto.end_day,
            end_date: dto.end_date,
            state: dto.state.into(),
        }
    }
}

impl From<TimeWindow> for TimeWindowDto {
    fn from(window: TimeWindow) -> Self {
        Self {
            window_id: window.window_id,
            end_day: window.end_day,
            end_date: window.end_date,
            state: window.state.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionCompletionStateDto {
    NotApplicable,
    NotYetAvailable,
    Unstarted,
    Started,
    Completed,
    Abandoned,
    Expired,
    Declined,
}

impl From<SessionCompletionStateDto> for SessionCompletionState {
    fn from(dto: SessionCompletionStateDto) -> Self {
        match dto {
            SessionCompletionStateDto::NotApplicable => Self::NotApplicable,
            SessionCompletionStateDto::NotYetAvailable => Self::NotYetAvailable,
            SessionCompletionStateDto::Unstarted => Self::Unstarted,
            SessionCompletionStateDto::Started => Self::Started,
            SessionCompletionStateDto::Completed => Self::Completed,
            SessionCompletionStateDto::Abandoned => Self::Abandoned,
            SessionCompletionStateDto::Expired => Self::Expired,
            SessionCompletionStateDto::Declined => Self::Declined,
        }
    }
}

impl From<SessionCompletionState> for SessionCompletionStateDto {
    fn from(state: SessionCompletionState) -> Self {
        match state {
            SessionCompletionState::NotApplicable => Self::NotApplicable,
            SessionCompletionState::NotYetAvailable => Self::NotYetAvailable,
            SessionCompletionState::Unstarted => Self::Unstarted,
            SessionCompletionState::Started => Self::Started,
            SessionCompletionState::Completed => Self::Completed,
            SessionCompletionState::Abandoned => Self::Abandoned,
            SessionCompletionState::Expired => Self::Expired,
            SessionCompletionState::Declined => Self::Declined,
        }
    }
}

//=========================================================================================
// Response Payloads
//=========================================================================================

/// The weekly adherence report as sent to clients.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportResponse {
    /// Day of week (0-6) → one cell per row, in row order.
    pub by_day_entries: BTreeMap<u8, Vec<GridCellDto>>,
    #[schema(value_type = String, format = DateTime)]
    pub created_on: DateTime<FixedOffset>,
    pub client_time_zone: String,
    pub weekly_adherence_percent: u8,
    pub next_activity: Option<NextActivityDto>,
    pub rows: Vec<ReportRowDto>,
    pub labels: Vec<String>,
}

impl From<WeeklyAdherenceReport> for WeeklyReportResponse {
    fn from(report: WeeklyAdherenceReport) -> Self {
        Self {
            by_day_entries: report
                .by_day_entries
                .into_iter()
                .map(|(day, cells)| (day, cells.into_iter().map(GridCellDto::from).collect()))
                .collect(),
            created_on: report.created_on,
            client_time_zone: report.client_time_zone,
            weekly_adherence_percent: report.weekly_adherence_percent,
            next_activity: report.next_activity.map(NextActivityDto::from),
            rows: report.rows.into_iter().map(ReportRowDto::from).collect(),
            labels: report.labels,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridCellDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_day: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub time_windows: Vec<TimeWindowDto>,
}

impl From<GridCell> for GridCellDto {
    fn from(cell: GridCell) -> Self {
        Self {
            session_id: cell.session_id,
            start_day: cell.start_day,
            start_date: cell.start_date,
            time_windows: cell.time_windows.into_values().map(TimeWindowDto::from).collect(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRowDto {
    pub label: String,
    pub searchable_label: String,
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    pub week: u32,
}

impl From<ReportRow> for ReportRowDto {
    fn from(row: ReportRow) -> Self {
        Self {
            label: row.label,
            searchable_label: row.searchable_label,
            session_id: row.session_id,
            session_name: row.session_name,
            session_symbol: row.session_symbol,
            study_burst_id: row.study_burst_id,
            study_burst_num: row.study_burst_num,
            week: row.week,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextActivityDto {
    pub session_id: String,
    pub session_name: String,
    pub session_symbol: Option<String>,
    pub week: Option<u32>,
    pub study_burst_id: Option<String>,
    pub study_burst_num: Option<u32>,
    pub start_date: NaiveDate,
}

impl From<NextActivity> for NextActivityDto {
    fn from(next: NextActivity) -> Self {
        Self {
            session_id: next.session_id,
            session_name: next.session_name,
            session_symbol: next.session_symbol,
            week: next.week,
            study_burst_id: next.study_burst_id,
            study_burst_num: next.study_burst_num,
            start_date: next.start_date,
        }
    }
}

/// Response body of the health check.
#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_camel_case_payload() {
        let json = r#"{
            "state": {
                "now": "2024-03-10T09:00:00-05:00",
                "clientTimeZone": "America/Chicago",
                "daysSinceEvent": { "enrollment": 3 }
            },
            "streams": [{
                "startEventId": "enrollment",
                "byDayEntries": {
                    "-2": [{
                        "sessionId": "s1",
                        "sessionName": "Survey",
                        "startDay": -2,
                        "startDate": "2024-03-05",
                        "timeWindows": [
                            { "windowId": "w1", "endDay": 1, "state": "completed" },
                            { "windowId": "w1", "endDay": 1, "state": "completed" }
                        ]
                    }]
                }
            }]
        }"#;

        let request: WeeklyReportRequest = serde_json::from_str(json).unwrap();
        let (state, report) = request.into_domain();

        assert!(!state.show_active);
        assert_eq!(state.days_since_event_by_id("enrollment"), Some(3));
        let entries = &report.streams[0].by_day_entries[&-2];
        assert_eq!(entries[0].start_day, Some(-2));
        assert_eq!(entries[0].time_windows.len(), 1);
        assert_eq!(
            entries[0].time_windows["w1"].state,
            SessionCompletionState::Completed
        );
    }

    #[test]
    fn test_client_ids_are_kept_and_missing_ids_are_issued() {
        let id = Uuid::new_v4();
        let with_id = DayEntryDto {
            id: Some(id),
            session_id: "s1".to_string(),
            session_name: "Survey".to_string(),
            session_symbol: None,
            study_burst_id: None,
            study_burst_num: None,
            start_day: Some(0),
            start_date: None,
            time_windows: Vec::new(),
        };
        let first = DayEntryDto { id: None, ..with_id.clone() }.into_domain();
        let second = DayEntryDto { id: None, ..with_id.clone() }.into_domain();

        assert_eq!(with_id.into_domain().id, EntryId(id));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_placeholder_cells_serialize_without_identity() {
        let json = serde_json::to_value(GridCellDto::from(GridCell::placeholder())).unwrap();
        assert_eq!(json, serde_json::json!({ "timeWindows": [] }));
    }
}
