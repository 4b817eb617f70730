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


use thiserror::Error;

/// Fatal failures of a planning overview run.
///
/// Per-row problems (unparseable hours) are not represented here: those are
/// logged and the record is skipped.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No data found in spreadsheet {spreadsheet_id} for range '{range}'")]
    NoDataFound {
        spreadsheet_id: String,
        range: String,
    },

    #[error("Week '{token}' not found in header row {row}: {cells:?}")]
    WeekNotFound {
        token: String,
        row: usize,
        cells: Vec<String>,
    },

    #[error("Unexpected sheet layout: {0}")]
    Layout(String),

    #[error("Invalid column name '{0}'")]
    InvalidColumnName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
