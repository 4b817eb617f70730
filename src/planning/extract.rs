// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use super::{RawGrid, SheetLayout, cell};
use crate::utils::PlannerError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROJECT_TYPE_COLUMN: usize = 0;
const PROJECT_COLUMN: usize = 1;
const PERSON_COLUMN: usize = 2;

/// One planned assignment for the selected week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningRecord {
    pub project_type: String,
    pub project: String,
    pub person: String,
    /// Hours as written in the sheet; parsed by the pivot
    pub hours: String,
    /// 1-based row in the source sheet
    pub row: usize,
}

/// Extracts the planning records for `week_column` from the grid.
///
/// Data starts after the first fully empty row at or below the week header row.
/// Project type and project labels are only written once per group in the
/// sheet, so both columns are forward-filled before incomplete rows are dropped.
/// Zero-hour entries and persons starting with `?` are left out.
///
/// # Errors
///
/// * `Layout` if the grid has no empty separator row below the header row
pub fn extract(
    grid: &RawGrid,
    layout: &SheetLayout,
    week_column: usize,
) -> Result<Vec<PlanningRecord>, PlannerError> {
    let separator = find_separator_row(grid, layout.header_row)?;
    let first_data_row = separator + 1;
    debug!(
        "📐 Separator row at {}, planning data starts at row {}",
        separator, first_data_row
    );

    let mut last_project_type = String::new();
    let mut last_project = String::new();
    let mut records = Vec::new();
    let mut incomplete = 0usize;
    let mut zero_hours = 0usize;
    let mut placeholders = 0usize;

    for (index, row) in grid.iter().enumerate().skip(first_data_row) {
        let project_type = cell(row, PROJECT_TYPE_COLUMN);
        if !project_type.is_empty() {
            last_project_type = project_type.to_string();
        }
        let project = cell(row, PROJECT_COLUMN);
        if !project.is_empty() {
            last_project = project.to_string();
        }

        let person = cell(row, PERSON_COLUMN);
        let hours = cell(row, week_column);

        if last_project_type.is_empty()
            || last_project.is_empty()
            || person.is_empty()
            || hours.is_empty()
        {
            incomplete += 1;
            continue;
        }

        if hours == "0" {
            zero_hours += 1;
            continue;
        }

        if person.starts_with('?') {
            placeholders += 1;
            continue;
        }

        records.push(PlanningRecord {
            project_type: last_project_type.clone(),
            project: last_project.clone(),
            person: person.to_string(),
            hours: hours.to_string(),
            row: index + 1,
        });
    }

    debug!(
        "📋 Extracted {} records ({} incomplete, {} zero-hour, {} placeholder rows dropped)",
        records.len(),
        incomplete,
        zero_hours,
        placeholders
    );

    Ok(records)
}

/// Index of the first row at or below `start` whose cells are all empty.
fn find_separator_row(grid: &RawGrid, start: usize) -> Result<usize, PlannerError> {
    grid.iter()
        .enumerate()
        .skip(start)
        .find(|(_, row)| row.iter().all(|value| value.is_empty()))
        .map(|(index, _)| index)
        .ok_or_else(|| {
            PlannerError::Layout(format!(
                "no empty separator row found below week header row {} ({} rows in sheet)",
                start,
                grid.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn layout(header_row: usize) -> SheetLayout {
        SheetLayout {
            header_row,
            leading_columns: 0,
        }
    }

    fn summary(records: &[PlanningRecord]) -> Vec<(&str, &str, &str, &str)> {
        records
            .iter()
            .map(|r| {
                (
                    r.project_type.as_str(),
                    r.project.as_str(),
                    r.person.as_str(),
                    r.hours.as_str(),
                )
            })
            .collect()
    }

    #[test]
    fn forward_fills_project_type_and_project_independently() {
        let grid = grid(&[
            &["", "", "", "1"],
            &[],
            &["A", "X", "alice", "4"],
            &["", "Y", "bob", "6"],
            &["", "", "carol", "2"],
        ]);

        let records = extract(&grid, &layout(0), 3).unwrap();

        assert_eq!(
            summary(&records),
            vec![
                ("A", "X", "alice", "4"),
                ("A", "Y", "bob", "6"),
                ("A", "Y", "carol", "2"),
            ]
        );
        assert_eq!(
            records.iter().map(|r| r.row).collect::<Vec<_>>(),
            vec![3, 4, 5]
        );
    }

    #[test]
    fn filters_zero_hours_placeholders_and_incomplete_rows() {
        let grid = grid(&[
            &["", "", "", "1"],
            &["", "", ""],
            &["Dev", "App", "alice", "0"],
            &["", "", "?bob", "3"],
            &["", "", "", "5"],
            &["", "", "carol"],
            &["", "", "dave", "00"],
        ]);

        let records = extract(&grid, &layout(0), 3).unwrap();

        assert_eq!(summary(&records), vec![("Dev", "App", "dave", "00")]);
    }

    #[test]
    fn rows_before_first_label_are_dropped() {
        let grid = grid(&[
            &["", "", "", "1"],
            &[],
            &["", "", "alice", "5"],
            &["Ops", "", "bob", "5"],
            &["", "Infra", "carol", "5"],
        ]);

        let records = extract(&grid, &layout(0), 3).unwrap();

        assert_eq!(summary(&records), vec![("Ops", "Infra", "carol", "5")]);
    }

    #[test]
    fn separator_search_starts_at_header_row() {
        let grid = grid(&[
            &[],
            &["title"],
            &["", "", "", "7"],
            &[],
            &["Dev", "App", "alice", "8"],
        ]);

        let records = extract(&grid, &layout(2), 3).unwrap();

        assert_eq!(summary(&records), vec![("Dev", "App", "alice", "8")]);
        assert_eq!(records[0].row, 5);
    }

    #[test]
    fn missing_separator_row_is_a_layout_error() {
        let grid = grid(&[&["", "", "", "1"], &["Dev", "App", "alice", "8"]]);

        let result = extract(&grid, &layout(0), 3);

        assert!(matches!(result, Err(PlannerError::Layout(_))));
    }

    #[test]
    fn separator_after_last_row_yields_no_records() {
        let grid = grid(&[&["", "", "", "1"], &["", ""]]);

        let records = extract(&grid, &layout(0), 3).unwrap();

        assert!(records.is_empty());
    }
}
