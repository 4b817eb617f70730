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


use super::format::{self, GridSize, HEADER_ROWS, Presentation};
use super::store::{SheetStore, WorksheetHandle};
use crate::planning::OverviewMatrix;
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

/// Writes the overview matrix into a fresh worksheet and formats it.
pub struct SheetWriter<'a> {
    presentation: &'a Presentation,
}

impl<'a> SheetWriter<'a> {
    pub fn new(presentation: &'a Presentation) -> Self {
        Self { presentation }
    }

    /// Publishes the overview as worksheet `worksheet_name` of `spreadsheet_id`.
    ///
    /// An existing worksheet with the same name is replaced, never merged into.
    ///
    /// # Returns
    ///
    /// The handle of the newly created worksheet.
    pub async fn publish<S: SheetStore>(
        &self,
        store: &mut S,
        matrix: &OverviewMatrix,
        spreadsheet_id: &str,
        worksheet_name: &str,
    ) -> Result<WorksheetHandle> {
        let size = self.worksheet_size(matrix);
        let worksheet = store
            .replace_worksheet(spreadsheet_id, worksheet_name, size)
            .await
            .with_context(|| format!("Failed to create worksheet '{}'", worksheet_name))?;

        let [types, projects] = matrix.header_rows();
        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(matrix.rows().len() + HEADER_ROWS);
        rows.push(types.iter().cloned().map(Value::String).collect());
        rows.push(projects.into_iter().map(Value::String).collect());
        rows.extend(matrix.to_rows());

        info!(
            "✍️  Writing {} people × {} projects to '{}'",
            matrix.rows().len(),
            matrix.columns().len(),
            worksheet_name
        );
        store
            .write_rows(&worksheet, &rows)
            .await
            .with_context(|| format!("Failed to write overview to '{}'", worksheet_name))?;

        info!("🎨 Applying formatting to worksheet");
        let plan = format::plan(&types, size, self.presentation);
        store
            .apply_formatting(&worksheet, &plan)
            .await
            .with_context(|| format!("Failed to format worksheet '{}'", worksheet_name))?;

        Ok(worksheet)
    }

    /// The configured size, grown when the overview would not fit.
    fn worksheet_size(&self, matrix: &OverviewMatrix) -> GridSize {
        let minimum = self.presentation.worksheet_size;
        GridSize {
            rows: minimum.rows.max(matrix.rows().len() + HEADER_ROWS),
            columns: minimum.columns.max(matrix.width()),
        }
    }
}
