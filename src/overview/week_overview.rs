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


use crate::config::Config;
use crate::planning::{self, WeekSelector};
use crate::sheets::{SheetReader, SheetStore, SheetWriter, WorksheetHandle};
use anyhow::Result;
use tracing::info;

/// Builds the per-person overview of one planning week and publishes it.
pub struct WeekOverviewJob;

impl WeekOverviewJob {
    pub fn new() -> Self {
        Self
    }

    /// Runs the whole pipeline against `store`.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated run configuration
    /// * `store` - Spreadsheet backend for both source and target
    /// * `current_week` - ISO week number of today
    ///
    /// # Returns
    ///
    /// The handle of the overview worksheet that was written.
    pub async fn execute<S: SheetStore>(
        &self,
        config: &Config,
        store: &mut S,
        current_week: u32,
    ) -> Result<WorksheetHandle> {
        info!("🔄 Building planning overview (current week {})", current_week);

        let grid = SheetReader::new()
            .fetch(
                store,
                &config.source_spreadsheet_id,
                &config.source_worksheet,
            )
            .await?;
        let grid = config.layout.trim(grid);

        let selector = config.week_selector(current_week);
        let week_column = planning::locate(&grid, &config.layout, &selector)?;
        match &selector {
            WeekSelector::Token(token) => {
                info!("📅 Week {} found in planning column {}", token, week_column)
            }
            WeekSelector::ColumnLetter(letter) => {
                info!("📅 Reading hours from configured column {}", letter)
            }
        }

        let records = planning::extract(&grid, &config.layout, week_column)?;
        info!("📋 {} planning entries for this week", records.len());

        let matrix = planning::pivot(&records);

        let worksheet_name = config.worksheet_name(current_week);
        info!("📤 Writing to target sheet as '{}'", worksheet_name);
        let worksheet = SheetWriter::new(&config.presentation)
            .publish(
                store,
                &matrix,
                &config.target_spreadsheet_id,
                &worksheet_name,
            )
            .await?;

        Ok(worksheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::RawGrid;
    use crate::sheets::store::memory::MemoryStore;
    use crate::utils::PlannerError;
    use serde_json::json;

    const CONFIG: &str = "\
SOURCE_SPREADSHEET_ID: source
SOURCE_WORKSHEET: Planning
TARGET_SPREADSHEET_ID: target
WEEK_ROW_NUMBER: 1
";

    fn planning_grid() -> RawGrid {
        let rows: &[&[&str]] = &[
            &["", "Planning"],
            &["", "", "", "", "1", "2", "3"],
            &[],
            &["", "Dev", "App", "alice", "4", "5", "1"],
            &["", "", "App", "bob", "2", "3", "2"],
            &["", "Ops", "Infra", "alice", "8", "0", "4"],
            &["", "", "", "?carol", "1", "6"],
            &["", "", "Web", "bob", "", "x"],
            &["", "", "Infra", "dave", "", "7"],
        ];
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn store() -> MemoryStore {
        MemoryStore::with_source("source", "Planning", planning_grid())
    }

    #[tokio::test]
    async fn builds_overview_for_detected_week() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let mut store = store();

        let worksheet = WeekOverviewJob::new()
            .execute(&config, &mut store, 2)
            .await
            .unwrap();

        assert_eq!(worksheet.title, "Week 2");
        let sheet = store.worksheet("target", "Week 2").unwrap();
        assert_eq!(
            sheet.rows,
            vec![
                vec![json!(""), json!("Dev"), json!("Ops"), json!("Ops"), json!("Total")],
                vec![json!(""), json!("App"), json!("Web"), json!("Infra"), json!("")],
                vec![json!("alice"), json!(5), json!(""), json!(""), json!(5)],
                vec![json!("bob"), json!(3), json!(""), json!(""), json!(3)],
                vec![json!("dave"), json!(""), json!(""), json!(7), json!(7)],
            ]
        );

        let plan = sheet.plan.as_ref().unwrap();
        let spans: Vec<_> = plan
            .merges
            .iter()
            .map(|m| (m.start_column, m.end_column))
            .collect();
        assert_eq!(spans, vec![(2, 2), (3, 4)]);
    }

    #[tokio::test]
    async fn configured_column_and_week_number_override_detection() {
        let yaml = format!("{CONFIG}WEEK_COLUMN: f\nTARGET_WEEK_NUMBER: 9\n");
        let config = Config::from_yaml_str(&yaml).unwrap();
        let mut store = store();

        let worksheet = WeekOverviewJob::new()
            .execute(&config, &mut store, 30)
            .await
            .unwrap();

        assert_eq!(worksheet.title, "Week 9");
        let sheet = store.worksheet("target", "Week 9").unwrap();
        assert_eq!(
            sheet.rows[2],
            vec![json!("alice"), json!(5), json!(""), json!(""), json!(5)]
        );
    }

    #[tokio::test]
    async fn unknown_week_fails_without_writing() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let mut store = store();

        let err = WeekOverviewJob::new()
            .execute(&config, &mut store, 40)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PlannerError>(),
            Some(PlannerError::WeekNotFound { .. })
        ));
        assert!(store.worksheets.is_empty());
    }

    #[tokio::test]
    async fn empty_source_is_no_data_found() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let mut store = MemoryStore::default();

        let err = WeekOverviewJob::new()
            .execute(&config, &mut store, 2)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PlannerError>(),
            Some(PlannerError::NoDataFound { .. })
        ));
    }
}
