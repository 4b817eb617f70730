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


use super::store::SheetStore;
use crate::planning::RawGrid;
use crate::utils::PlannerError;
use anyhow::Result;
use tracing::info;

/// Pulls the raw planning grid out of the source spreadsheet.
pub struct SheetReader;

impl SheetReader {
    pub fn new() -> Self {
        Self
    }

    /// Fetches `range` (a worksheet name or A1 range) from `spreadsheet_id`.
    ///
    /// # Errors
    ///
    /// * `NoDataFound` if the range yields no rows
    /// * Any error raised by the store
    pub async fn fetch<S: SheetStore>(
        &self,
        store: &mut S,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<RawGrid> {
        let grid = store.read_range(spreadsheet_id, range).await?;

        if grid.is_empty() {
            return Err(PlannerError::NoDataFound {
                spreadsheet_id: spreadsheet_id.to_string(),
                range: range.to_string(),
            }
            .into());
        }

        info!("📥 Data collected: {} rows from '{}'", grid.len(), range);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::store::memory::MemoryStore;

    #[tokio::test]
    async fn returns_grid_from_store() {
        let grid = vec![vec!["a".to_string()], vec![]];
        let mut store = MemoryStore::with_source("source", "Planning", grid.clone());

        let fetched = SheetReader::new()
            .fetch(&mut store, "source", "Planning")
            .await
            .unwrap();

        assert_eq!(fetched, grid);
    }

    #[tokio::test]
    async fn empty_range_is_no_data_found() {
        let mut store = MemoryStore::with_source("source", "Planning", Vec::new());

        let err = SheetReader::new()
            .fetch(&mut store, "source", "Planning")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PlannerError>(),
            Some(PlannerError::NoDataFound { .. })
        ));
    }
}
