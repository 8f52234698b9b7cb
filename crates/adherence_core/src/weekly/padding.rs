//! Densification: pads the week so that every day holds exactly one cell per
//! row, in row order.

use super::{PlacedCell, PlacedWeek, DAYS_PER_WEEK};
use crate::domain::GridCell;
use std::collections::BTreeMap;
use tracing::debug;

/// Returns a week with keys `0..7`, each holding `row_count` cells ordered by row.
///
/// A row with no cell on a day gets an empty placeholder. If a day holds more
/// than one cell for a row, the first one is kept.
pub(crate) fn densify(mut week: PlacedWeek, row_count: usize) -> PlacedWeek {
    (0..DAYS_PER_WEEK)
        .map(|day_of_week| {
            let mut cells = week.remove(&day_of_week).unwrap_or_default();
            let padded: Vec<PlacedCell> = (0..row_count)
                .map(|row| match cells.iter().position(|placed| placed.row == row) {
                    Some(index) => cells.remove(index),
                    None => PlacedCell {
                        row,
                        cell: GridCell::placeholder(),
                    },
                })
                .collect();
            if !cells.is_empty() {
                debug!(day_of_week, dropped = cells.len(), "Dropped duplicate cells");
            }
            (day_of_week, padded)
        })
        .collect()
}

/// Drops the row tags of a dense week.
pub(crate) fn into_cells(week: PlacedWeek) -> BTreeMap<u8, Vec<GridCell>> {
    week.into_iter()
        .map(|(day, cells)| (day, cells.into_iter().map(|placed| placed.cell).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn real_cell(row: usize, session: &str) -> PlacedCell {
        PlacedCell {
            row,
            cell: GridCell {
                session_id: Some(session.to_string()),
                start_day: Some(0),
                ..GridCell::default()
            },
        }
    }

    #[test]
    fn test_empty_week_has_seven_empty_days() {
        let dense = densify(PlacedWeek::new(), 0);

        assert_eq!(dense.keys().copied().collect::<Vec<_>>(), (0..7u8).collect::<Vec<_>>());
        assert!(dense.values().all(Vec::is_empty));
    }

    #[test]
    fn test_missing_cells_are_padded_in_row_order() {
        let mut week = PlacedWeek::new();
        week.insert(2, vec![real_cell(1, "b"), real_cell(0, "a")]);
        week.insert(5, vec![real_cell(1, "b")]);
        let dense = densify(week, 2);

        let day2: Vec<Option<&str>> = dense[&2].iter().map(|p| p.cell.session_id.as_deref()).collect();
        assert_eq!(day2, vec![Some("a"), Some("b")]);
        assert_eq!(dense[&5][0].cell, GridCell::placeholder());
        assert_eq!(dense[&5][1].cell.session_id.as_deref(), Some("b"));
        assert!(dense[&0].iter().all(|p| p.cell == GridCell::placeholder()));
    }

    #[test]
    fn test_duplicate_cells_keep_the_first() {
        let mut week = PlacedWeek::new();
        week.insert(0, vec![real_cell(0, "first"), real_cell(0, "second")]);
        let dense = densify(week, 1);

        assert_eq!(dense[&0].len(), 1);
        assert_eq!(dense[&0][0].cell.session_id.as_deref(), Some("first"));
    }

    fn arb_week() -> impl Strategy<Value = (PlacedWeek, usize)> {
        (1usize..5).prop_flat_map(|row_count| {
            let cells = prop::collection::vec((0u8..7, 0..row_count), 0..12);
            cells.prop_map(move |cells| {
                let mut week = PlacedWeek::new();
                for (day, row) in cells {
                    week.entry(day).or_default().push(real_cell(row, &format!("s{row}")));
                }
                (week, row_count)
            })
        })
    }

    proptest! {
        #[test]
        fn densify_is_idempotent((week, row_count) in arb_week()) {
            let once = densify(week, row_count);
            let twice = densify(once.clone(), row_count);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn densify_fills_every_coordinate((week, row_count) in arb_week()) {
            let dense = densify(week, row_count);
            prop_assert_eq!(dense.len(), 7);
            for cells in dense.values() {
                let rows: Vec<usize> = cells.iter().map(|p| p.row).collect();
                prop_assert_eq!(rows, (0..row_count).collect::<Vec<_>>());
            }
        }
    }
}
