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


//! The seam between the overview pipeline and the spreadsheet backend.

use super::format::{FormattingPlan, GridSize};
use crate::planning::RawGrid;
use anyhow::Result;
use serde_json::Value;

/// A worksheet created by [`SheetStore::replace_worksheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetHandle {
    pub spreadsheet_id: String,
    pub sheet_id: i32,
    pub title: String,
}

/// Spreadsheet backend the overview is read from and written to.
///
/// Every call is one blocking round trip; callers await them one at a time.
#[allow(async_fn_in_trait)]
pub trait SheetStore {
    /// Reads a sheet name or A1 range as rows of formatted cell strings.
    async fn read_range(&mut self, spreadsheet_id: &str, range: &str) -> Result<RawGrid>;

    /// Deletes the worksheet called `title` if present and creates it anew.
    async fn replace_worksheet(
        &mut self,
        spreadsheet_id: &str,
        title: &str,
        size: GridSize,
    ) -> Result<WorksheetHandle>;

    /// Writes `rows` starting at the top-left cell of the worksheet.
    async fn write_rows(&mut self, worksheet: &WorksheetHandle, rows: &[Vec<Value>]) -> Result<()>;

    /// Applies the formatting plan, replacing existing conditional format rules.
    async fn apply_formatting(
        &mut self,
        worksheet: &WorksheetHandle,
        plan: &FormattingPlan,
    ) -> Result<()>;
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::collections::HashMap;

    /// A worksheet kept in memory by [`MemoryStore`].
    #[derive(Debug, Default)]
    pub struct MemoryWorksheet {
        pub sheet_id: i32,
        pub size: Option<GridSize>,
        pub rows: Vec<Vec<Value>>,
        pub plan: Option<FormattingPlan>,
    }

    /// In-memory [`SheetStore`] for tests.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        pub sources: HashMap<(String, String), RawGrid>,
        pub worksheets: HashMap<(String, String), MemoryWorksheet>,
        pub deleted: Vec<String>,
        next_sheet_id: i32,
    }

    impl MemoryStore {
        pub fn with_source(spreadsheet_id: &str, range: &str, grid: RawGrid) -> Self {
            let mut store = Self::default();
            store
                .sources
                .insert((spreadsheet_id.to_string(), range.to_string()), grid);
            store
        }

        pub fn worksheet(&self, spreadsheet_id: &str, title: &str) -> Option<&MemoryWorksheet> {
            self.worksheets
                .get(&(spreadsheet_id.to_string(), title.to_string()))
        }
    }

    impl SheetStore for MemoryStore {
        async fn read_range(&mut self, spreadsheet_id: &str, range: &str) -> Result<RawGrid> {
            Ok(self
                .sources
                .get(&(spreadsheet_id.to_string(), range.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        async fn replace_worksheet(
            &mut self,
            spreadsheet_id: &str,
            title: &str,
            size: GridSize,
        ) -> Result<WorksheetHandle> {
            let key = (spreadsheet_id.to_string(), title.to_string());
            if self.worksheets.remove(&key).is_some() {
                self.deleted.push(title.to_string());
            }

            self.next_sheet_id += 1;
            self.worksheets.insert(
                key,
                MemoryWorksheet {
                    sheet_id: self.next_sheet_id,
                    size: Some(size),
                    ..Default::default()
                },
            );

            Ok(WorksheetHandle {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet_id: self.next_sheet_id,
                title: title.to_string(),
            })
        }

        async fn write_rows(
            &mut self,
            worksheet: &WorksheetHandle,
            rows: &[Vec<Value>],
        ) -> Result<()> {
            let sheet = self
                .worksheets
                .get_mut(&(worksheet.spreadsheet_id.clone(), worksheet.title.clone()))
                .ok_or_else(|| anyhow::anyhow!("Worksheet '{}' not found", worksheet.title))?;
            sheet.rows = rows.to_vec();
            Ok(())
        }

        async fn apply_formatting(
            &mut self,
            worksheet: &WorksheetHandle,
            plan: &FormattingPlan,
        ) -> Result<()> {
            let sheet = self
                .worksheets
                .get_mut(&(worksheet.spreadsheet_id.clone(), worksheet.title.clone()))
                .ok_or_else(|| anyhow::anyhow!("Worksheet '{}' not found", worksheet.title))?;
            sheet.plan = Some(plan.clone());
            Ok(())
        }
    }
}
