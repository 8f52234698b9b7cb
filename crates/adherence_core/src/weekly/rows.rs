//! Row extraction: moves each selected entry's display metadata onto a
//! `ReportRow` and leaves a bare `GridCell` in the week.

use super::{PlacedCell, PlacedWeek, SelectedEntry, SparseWeek};
use crate::domain::{GridCell, ReportRow};

pub(crate) struct RowExtraction {
    /// Distinct rows in first-seen order.
    pub rows: Vec<ReportRow>,
    /// Still sparse; every cell points into `rows`.
    pub week: PlacedWeek,
}

/// Builds the rows of the report and projects every selected entry to a cell.
///
/// Rows whose searchable labels match collapse into the first one seen.
pub(crate) fn extract_rows(sparse: &SparseWeek<'_>) -> RowExtraction {
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut week = PlacedWeek::new();

    for (&day_of_week, selections) in sparse {
        for selected in selections {
            let candidate = row_for(selected);
            let row = match rows
                .iter()
                .position(|row| row.searchable_label == candidate.searchable_label)
            {
                Some(index) => index,
                None => {
                    rows.push(candidate);
                    rows.len() - 1
                }
            };
            week.entry(day_of_week).or_default().push(PlacedCell {
                row,
                cell: cell_for(selected),
            });
        }
    }

    RowExtraction { rows, week }
}

fn row_for(selected: &SelectedEntry<'_>) -> ReportRow {
    let entry = selected.entry;
    let burst = burst_label(entry.study_burst_id.as_deref(), entry.study_burst_num);
    let (label, searchable_label) = match burst {
        Some(burst) => (
            format!("{burst} / Week {} / {}", selected.week, entry.session_name),
            format!(":{burst}:Week {}:{}:", selected.week, entry.session_name),
        ),
        None => (
            format!("Week {} / {}", selected.week, entry.session_name),
            format!(":Week {}:{}:", selected.week, entry.session_name),
        ),
    };
    ReportRow {
        label,
        searchable_label,
        session_id: entry.session_id.clone(),
        session_name: entry.session_name.clone(),
        session_symbol: entry.session_symbol.clone(),
        study_burst_id: entry.study_burst_id.clone(),
        study_burst_num: entry.study_burst_num,
        week: selected.week,
    }
}

fn burst_label(id: Option<&str>, num: Option<u32>) -> Option<String> {
    match (id, num) {
        (Some(id), Some(num)) => Some(format!("{id} {num}")),
        (Some(id), None) => Some(id.to_string()),
        (None, _) => None,
    }
}

fn cell_for(selected: &SelectedEntry<'_>) -> GridCell {
    let entry = selected.entry;
    GridCell {
        session_id: Some(entry.session_id.clone()),
        start_day: entry.start_day,
        start_date: entry.start_date,
        time_windows: entry.time_windows.clone(),
    }
}
