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


//! Reshaping of the weekly planning sheet into the per-person overview.
//!
//! The pipeline is pure: a [`RawGrid`] goes in, the week column is located,
//! records are extracted and finally pivoted into an [`OverviewMatrix`].

pub mod columns;
pub mod extract;
pub mod pivot;
pub mod week;

pub use extract::{PlanningRecord, extract};
pub use pivot::{OverviewMatrix, TOTAL_LABEL, pivot};
pub use week::{WeekSelector, locate};

use serde::{Deserialize, Serialize};

/// Rows of cell strings as returned by the sheet store. Rows may be ragged.
pub type RawGrid = Vec<Vec<String>>;

/// Where things live in the planning sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Zero-based grid row holding the week numbers
    pub header_row: usize,
    /// Leading sheet columns without data, dropped before any processing
    pub leading_columns: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_row: 3,
            leading_columns: 1,
        }
    }
}

impl SheetLayout {
    /// Drops the leading columns from every row of the grid.
    pub fn trim(&self, grid: RawGrid) -> RawGrid {
        if self.leading_columns == 0 {
            return grid;
        }

        grid.into_iter()
            .map(|row| row.into_iter().skip(self.leading_columns).collect())
            .collect()
    }
}

/// Returns the cell at `column`, treating cells past the end of a ragged row as empty.
pub(crate) fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_drops_leading_columns_of_ragged_rows() {
        let layout = SheetLayout {
            header_row: 0,
            leading_columns: 1,
        };
        let grid = vec![
            vec!["".to_string(), "Dev".to_string(), "App".to_string()],
            vec![],
            vec!["x".to_string()],
        ];

        let trimmed = layout.trim(grid);

        assert_eq!(
            trimmed,
            vec![vec!["Dev".to_string(), "App".to_string()], vec![], vec![]]
        );
    }

    #[test]
    fn cell_is_empty_past_row_end() {
        let row = vec!["a".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 5), "");
    }
}
