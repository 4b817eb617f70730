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


use super::{RawGrid, SheetLayout, columns};
use crate::utils::PlannerError;
use tracing::debug;

/// How the column holding the week's hours is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekSelector {
    /// Find the header cell equal to this week token (e.g. "42")
    Token(String),
    /// Use an explicit source sheet column (e.g. "G")
    ColumnLetter(String),
}

impl WeekSelector {
    /// Explicit column letters win over week-number detection.
    pub fn resolve(column_letter: Option<&str>, week_number: u32) -> Self {
        match column_letter {
            Some(letter) => WeekSelector::ColumnLetter(letter.to_string()),
            None => WeekSelector::Token(week_number.to_string()),
        }
    }
}

/// Determines which column of the (trimmed) grid holds the selected week's hours.
///
/// # Errors
///
/// * `WeekNotFound` if no header cell matches the week token
/// * `InvalidColumnName` if an explicit column letter cannot be decoded
/// * `Layout` if the header row is missing or the column letter names a
///   dropped leading column
pub fn locate(
    grid: &RawGrid,
    layout: &SheetLayout,
    selector: &WeekSelector,
) -> Result<usize, PlannerError> {
    match selector {
        WeekSelector::Token(token) => {
            let header = grid.get(layout.header_row).ok_or_else(|| {
                PlannerError::Layout(format!(
                    "week header row {} is beyond the {} rows of the sheet",
                    layout.header_row,
                    grid.len()
                ))
            })?;

            let column = header
                .iter()
                .position(|value| value == token)
                .ok_or_else(|| PlannerError::WeekNotFound {
                    token: token.clone(),
                    row: layout.header_row,
                    cells: header.clone(),
                })?;

            debug!("📅 Week {} found in column {}", token, column);
            Ok(column)
        }
        WeekSelector::ColumnLetter(letter) => {
            let sheet_column = columns::decode(letter)?;
            let column = sheet_column
                .checked_sub(layout.leading_columns)
                .ok_or_else(|| {
                    PlannerError::Layout(format!(
                        "week column {} is one of the {} leading columns without data",
                        letter.to_uppercase(),
                        layout.leading_columns
                    ))
                })?;

            debug!(
                "📅 Using configured week column {} (grid column {})",
                letter.to_uppercase(),
                column
            );
            Ok(column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn layout(header_row: usize, leading_columns: usize) -> SheetLayout {
        SheetLayout {
            header_row,
            leading_columns,
        }
    }

    #[test]
    fn finds_week_token_in_header_row() {
        let grid = grid(&[&["Planning"], &["", "", "", "41", "42", "43"]]);

        let column = locate(
            &grid,
            &layout(1, 0),
            &WeekSelector::Token("42".to_string()),
        )
        .unwrap();

        assert_eq!(column, 4);
    }

    #[test]
    fn ignores_tokens_outside_header_row() {
        let grid = grid(&[&["", "42"], &["", "41", "43"]]);

        let result = locate(&grid, &layout(1, 0), &WeekSelector::Token("42".to_string()));

        match result {
            Err(PlannerError::WeekNotFound { token, row, cells }) => {
                assert_eq!(token, "42");
                assert_eq!(row, 1);
                assert_eq!(cells, vec!["", "41", "43"]);
            }
            other => panic!("expected WeekNotFound, got {other:?}"),
        }
    }

    #[test]
    fn token_must_match_exactly() {
        let grid = grid(&[&["", "12", " 2", "2 "]]);

        let result = locate(&grid, &layout(0, 0), &WeekSelector::Token("2".to_string()));

        assert!(matches!(result, Err(PlannerError::WeekNotFound { .. })));
    }

    #[test]
    fn missing_header_row_is_a_layout_error() {
        let grid = grid(&[&["", "1"]]);

        let result = locate(&grid, &layout(3, 0), &WeekSelector::Token("1".to_string()));

        assert!(matches!(result, Err(PlannerError::Layout(_))));
    }

    #[test]
    fn column_letter_is_shifted_past_leading_columns() {
        let grid = grid(&[&[""]]);

        let column = locate(
            &grid,
            &layout(0, 1),
            &WeekSelector::ColumnLetter("g".to_string()),
        )
        .unwrap();

        assert_eq!(column, 5);
    }

    #[test]
    fn column_letter_inside_leading_columns_is_rejected() {
        let result = locate(
            &Vec::new(),
            &layout(0, 1),
            &WeekSelector::ColumnLetter("A".to_string()),
        );

        assert!(matches!(result, Err(PlannerError::Layout(_))));
    }

    #[test]
    fn invalid_column_letter_is_rejected() {
        let result = locate(
            &Vec::new(),
            &layout(0, 0),
            &WeekSelector::ColumnLetter("G7".to_string()),
        );

        assert!(matches!(result, Err(PlannerError::InvalidColumnName(_))));
    }

    #[test]
    fn explicit_column_overrides_week_number() {
        assert_eq!(
            WeekSelector::resolve(Some("H"), 42),
            WeekSelector::ColumnLetter("H".to_string())
        );
        assert_eq!(
            WeekSelector::resolve(None, 7),
            WeekSelector::Token("7".to_string())
        );
    }
}
