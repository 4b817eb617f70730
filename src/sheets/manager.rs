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


use super::format::{FormattingPlan, GridSize};
use super::store::{SheetStore, WorksheetHandle};
use crate::auth::AuthManager;
use crate::planning::RawGrid;
use anyhow::{Context, Result};
use google_sheets4::{
    Sheets,
    api::{
        AddSheetRequest, BatchUpdateSpreadsheetRequest, DeleteSheetRequest, GridProperties,
        Request, Sheet, SheetProperties, ValueRange,
    },
    hyper_rustls,
};
use hyper_util::{client::legacy::connect::HttpConnector, rt::TokioExecutor};
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info};

type Hub = Sheets<hyper_rustls::HttpsConnector<HttpConnector>>;

/// [`SheetStore`] backed by the Google Sheets v4 API.
pub struct SheetsManager {
    auth_manager: AuthManager,
    hub: Option<Hub>,
}

impl SheetsManager {
    /// Creates a manager; the API connection is established on first use.
    pub fn new(auth_manager: AuthManager) -> Self {
        Self {
            auth_manager,
            hub: None,
        }
    }

    async fn call<T, Fut>(description: &str, operation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T, google_sheets4::Error>>,
    {
        operation
            .await
            .map_err(|err| anyhow::anyhow!("{} failed: {}", description, err))
    }

    async fn init_hub(&mut self) -> Result<()> {
        if self.hub.is_some() {
            return Ok(());
        }

        info!("🔑 Initializing Google Sheets API connection...");

        let auth = self
            .auth_manager
            .authenticator()
            .await
            .context("Failed to create Google Sheets authenticator")?;

        let client = hyper_util::client::legacy::Client::builder(TokioExecutor::new()).build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()?
                .https_or_http()
                .enable_http1()
                .build(),
        );

        self.hub = Some(Sheets::new(client, auth));

        info!("✅ Google Sheets API connection established");
        Ok(())
    }

    async fn get_hub(&mut self) -> Result<&Hub> {
        self.init_hub().await?;
        self.hub
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Failed to initialize Google Sheets hub"))
    }

    /// Finds a worksheet by title or by id.
    async fn find_worksheet(
        hub: &Hub,
        spreadsheet_id: &str,
        matches: impl Fn(&SheetProperties) -> bool,
    ) -> Result<Option<Sheet>> {
        let (_, spreadsheet) = Self::call(
            "fetch spreadsheet metadata",
            hub.spreadsheets().get(spreadsheet_id).doit(),
        )
        .await
        .with_context(|| {
            format!(
                "Failed to access Google Sheet with ID '{}'. Please verify:\n\
                • The sheet ID is correct\n\
                • The sheet exists and is not deleted\n\
                • The credentials have access to the sheet",
                spreadsheet_id
            )
        })?;

        Ok(spreadsheet.sheets.unwrap_or_default().into_iter().find(|sheet| {
            sheet
                .properties
                .as_ref()
                .map(|properties| matches(properties))
                .unwrap_or(false)
        }))
    }

    async fn batch_update(
        hub: &Hub,
        description: &str,
        spreadsheet_id: &str,
        requests: Vec<Request>,
    ) -> Result<google_sheets4::api::BatchUpdateSpreadsheetResponse> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(requests),
            ..Default::default()
        };

        let (_, response) = Self::call(
            description,
            hub.spreadsheets().batch_update(request, spreadsheet_id).doit(),
        )
        .await?;
        Ok(response)
    }

    /// Quotes a worksheet title for use in A1 notation.
    fn quoted_title(title: &str) -> String {
        format!("'{}'", title.replace('\'', "''"))
    }

    fn json_value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(num) => num.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl SheetStore for SheetsManager {
    async fn read_range(&mut self, spreadsheet_id: &str, range: &str) -> Result<RawGrid> {
        info!("📊 Reading '{}' from spreadsheet {}", range, spreadsheet_id);

        let hub = self.get_hub().await?;
        let (_, value_range) = Self::call(
            "read source range",
            hub.spreadsheets()
                .values_get(spreadsheet_id, range)
                .value_render_option("FORMATTED_VALUE")
                .doit(),
        )
        .await?;

        Ok(value_range
            .values
            .unwrap_or_default()
            .iter()
            .map(|row| row.iter().map(Self::json_value_to_string).collect())
            .collect())
    }

    async fn replace_worksheet(
        &mut self,
        spreadsheet_id: &str,
        title: &str,
        size: GridSize,
    ) -> Result<WorksheetHandle> {
        let hub = self.get_hub().await?;

        let existing = Self::find_worksheet(hub, spreadsheet_id, |properties| {
            properties.title.as_deref() == Some(title)
        })
        .await?;

        if let Some(existing_id) = existing
            .and_then(|sheet| sheet.properties)
            .and_then(|properties| properties.sheet_id)
        {
            Self::batch_update(
                hub,
                "delete worksheet",
                spreadsheet_id,
                vec![Request {
                    delete_sheet: Some(DeleteSheetRequest {
                        sheet_id: Some(existing_id),
                    }),
                    ..Default::default()
                }],
            )
            .await?;
            info!("♻️  Worksheet '{}' already exists. Replacing.", title);
        }

        let response = Self::batch_update(
            hub,
            "create worksheet",
            spreadsheet_id,
            vec![Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(title.to_string()),
                        index: Some(0),
                        grid_properties: Some(GridProperties {
                            row_count: Some(size.rows as i32),
                            column_count: Some(size.columns as i32),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            }],
        )
        .await?;

        if let Some(replies) = response.replies
            && let Some(reply) = replies.first()
            && let Some(add_sheet) = &reply.add_sheet
            && let Some(properties) = &add_sheet.properties
            && let Some(sheet_id) = properties.sheet_id
        {
            info!("✅ Worksheet '{}' created with ID: {}", title, sheet_id);
            return Ok(WorksheetHandle {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet_id,
                title: title.to_string(),
            });
        }

        Err(anyhow::anyhow!(
            "Failed to get sheet ID from create response for '{}'",
            title
        ))
    }

    async fn write_rows(&mut self, worksheet: &WorksheetHandle, rows: &[Vec<Value>]) -> Result<()> {
        let hub = self.get_hub().await?;
        let range = format!("{}!A1", Self::quoted_title(&worksheet.title));

        let value_range = ValueRange {
            range: Some(range.clone()),
            values: Some(rows.to_vec()),
            major_dimension: Some("ROWS".to_string()),
        };

        let (_, response) = Self::call(
            "write worksheet values",
            hub.spreadsheets()
                .values_update(value_range, &worksheet.spreadsheet_id, &range)
                .value_input_option("RAW")
                .doit(),
        )
        .await?;

        debug!(
            "💾 Updated {} rows ({} cells) in '{}'",
            response.updated_rows.unwrap_or(0),
            response.updated_cells.unwrap_or(0),
            worksheet.title
        );
        Ok(())
    }

    async fn apply_formatting(
        &mut self,
        worksheet: &WorksheetHandle,
        plan: &FormattingPlan,
    ) -> Result<()> {
        let hub = self.get_hub().await?;

        let existing_rules = Self::find_worksheet(hub, &worksheet.spreadsheet_id, |properties| {
            properties.sheet_id == Some(worksheet.sheet_id)
        })
        .await?
        .and_then(|sheet| sheet.conditional_formats)
        .map(|rules| rules.len())
        .unwrap_or(0);

        if existing_rules > 0 {
            debug!(
                "🧹 Removing {} existing conditional format rules from '{}'",
                existing_rules, worksheet.title
            );
        }

        let requests = plan.requests(worksheet.sheet_id, existing_rules);
        debug!(
            "🎨 Sending {} formatting requests for '{}'",
            requests.len(),
            worksheet.title
        );
        Self::batch_update(
            hub,
            "apply worksheet formatting",
            &worksheet.spreadsheet_id,
            requests,
        )
        .await?;

        Ok(())
    }
}
