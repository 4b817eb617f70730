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


//! Configuration management for the planning overview.
//!
//! Settings are read from a YAML file (by default the gspread configuration
//! at `~/.config/gspread/config.yml`) using upper-case keys.

use crate::auth::CredentialsConfig;
use crate::planning::{SheetLayout, WeekSelector};
use crate::sheets::{Presentation, Rgb};
use crate::utils::PlannerError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".config/gspread";
const CONFIG_FILE: &str = "config.yml";

/// The configuration file as written by the user; every key is optional here
/// so that missing required keys can be reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ConfigFile {
    source_spreadsheet_id: Option<String>,
    source_worksheet: Option<String>,
    target_spreadsheet_id: Option<String>,
    week_column: Option<String>,
    target_week_number: Option<u32>,
    week_row_number: Option<usize>,
    leading_columns: Option<usize>,
    palette: Option<Vec<Rgb>>,
    #[serde(flatten)]
    credentials: CredentialsConfig,
}

/// Validated runtime settings for one overview run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet holding the weekly planning
    pub source_spreadsheet_id: String,
    /// Worksheet name or A1 range of the planning data
    pub source_worksheet: String,
    /// Spreadsheet the overview worksheet is written to
    pub target_spreadsheet_id: String,
    /// Explicit week column letter, replacing week number detection
    pub week_column: Option<String>,
    /// Week number used in the overview worksheet name
    pub target_week_number: Option<u32>,
    pub layout: SheetLayout,
    pub presentation: Presentation,
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Directory holding the configuration file and default credential files.
    pub fn default_dir() -> Result<PathBuf, PlannerError> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                PlannerError::Config(
                    "Cannot determine home directory. Use --config to specify the configuration file."
                        .to_string(),
                )
            })?;

        Ok(PathBuf::from(home_dir).join(CONFIG_DIR))
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, PlannerError> {
        Ok(Self::default_dir()?.join(CONFIG_FILE))
    }

    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// * `Config` if the file cannot be read or a required key is missing
    /// * `Yaml` if the file is not valid YAML for the expected keys
    pub fn load(path: &Path) -> Result<Self, PlannerError> {
        let content = fs::read_to_string(path).map_err(|err| {
            PlannerError::Config(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                err
            ))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, PlannerError> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let defaults = SheetLayout::default();
        let mut presentation = Presentation::default();
        if let Some(palette) = file.palette {
            if palette.is_empty() {
                return Err(PlannerError::Config(
                    "PALETTE must contain at least one color".to_string(),
                ));
            }
            presentation.palette = palette;
        }

        let config = Self {
            source_spreadsheet_id: required(file.source_spreadsheet_id, "SOURCE_SPREADSHEET_ID")?,
            source_worksheet: required(file.source_worksheet, "SOURCE_WORKSHEET")?,
            target_spreadsheet_id: required(file.target_spreadsheet_id, "TARGET_SPREADSHEET_ID")?,
            week_column: file
                .week_column
                .map(|column| column.trim().to_string())
                .filter(|column| !column.is_empty()),
            target_week_number: file.target_week_number,
            layout: SheetLayout {
                header_row: file.week_row_number.unwrap_or(defaults.header_row),
                leading_columns: file.leading_columns.unwrap_or(defaults.leading_columns),
            },
            presentation,
            credentials: file.credentials,
        };

        Ok(config)
    }

    /// Week column strategy: the configured column letter, else the week number.
    pub fn week_selector(&self, current_week: u32) -> WeekSelector {
        WeekSelector::resolve(self.week_column.as_deref(), current_week)
    }

    /// Title of the overview worksheet for this run.
    pub fn worksheet_name(&self, current_week: u32) -> String {
        self.presentation
            .worksheet_name(self.target_week_number.unwrap_or(current_week))
    }
}

fn required(value: Option<String>, key: &str) -> Result<String, PlannerError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PlannerError::Config(format!(
            "Missing required configuration key {}",
            key
        ))),
    }
}
