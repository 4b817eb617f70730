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


use super::PlanningRecord;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Label of the synthetic trailing column holding each person's week total.
pub const TOTAL_LABEL: &str = "Total";

/// Column key of the overview: a project within its project type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey {
    pub project_type: String,
    pub project: String,
}

/// One person's hours per project column, plus the week total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewRow {
    pub person: String,
    pub hours: Vec<Option<u32>>,
    pub total: u64,
}

/// Person × project matrix of planned hours for one week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewMatrix {
    columns: Vec<ProjectKey>,
    rows: Vec<OverviewRow>,
}

impl OverviewMatrix {
    /// Project columns in first-seen order (the `Total` column is not included).
    pub fn columns(&self) -> &[ProjectKey] {
        &self.columns
    }

    /// Person rows, sorted by name.
    pub fn rows(&self) -> &[OverviewRow] {
        &self.rows
    }

    /// Width of a written row: person column, project columns and total.
    pub fn width(&self) -> usize {
        self.columns.len() + 2
    }

    /// The two header rows: project types, then project names.
    pub fn header_rows(&self) -> [Vec<String>; 2] {
        let mut types = Vec::with_capacity(self.width());
        let mut projects = Vec::with_capacity(self.width());
        types.push(String::new());
        projects.push(String::new());

        for key in &self.columns {
            types.push(key.project_type.clone());
            projects.push(key.project.clone());
        }

        types.push(TOTAL_LABEL.to_string());
        projects.push(String::new());
        [types, projects]
    }

    /// One row per person: name, hours per project (empty when unplanned), total.
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut values = Vec::with_capacity(self.width());
                values.push(Value::String(row.person.clone()));
                values.extend(row.hours.iter().map(|cell| match cell {
                    Some(hours) => Value::from(*hours),
                    None => Value::String(String::new()),
                }));
                values.push(Value::from(row.total));
                values
            })
            .collect()
    }
}

/// Pivots planning records into the overview matrix.
///
/// Every project and person seen in `records` gets a column or row, even when
/// all of their hours fail to parse. When the same person is planned on the same
/// project more than once, the record that comes last in the sheet wins.
pub fn pivot(records: &[PlanningRecord]) -> OverviewMatrix {
    let mut columns: Vec<ProjectKey> = Vec::new();
    let mut column_index: HashMap<ProjectKey, usize> = HashMap::new();
    for record in records {
        let key = ProjectKey {
            project_type: record.project_type.clone(),
            project: record.project.clone(),
        };
        if !column_index.contains_key(&key) {
            column_index.insert(key.clone(), columns.len());
            columns.push(key);
        }
    }

    let mut people: BTreeMap<&str, Vec<Option<u32>>> = records
        .iter()
        .map(|record| (record.person.as_str(), vec![None; columns.len()]))
        .collect();

    let mut overwritten = 0usize;
    for record in records {
        let hours = match record.hours.trim().parse::<u32>() {
            Ok(hours) => hours,
            Err(_) => {
                warn!(
                    "⚠️  Ignoring invalid hours value \"{}\" for project ({}, {}) in row {}",
                    record.hours, record.project_type, record.project, record.row
                );
                continue;
            }
        };

        let key = ProjectKey {
            project_type: record.project_type.clone(),
            project: record.project.clone(),
        };
        let (Some(&column), Some(cells)) = (
            column_index.get(&key),
            people.get_mut(record.person.as_str()),
        ) else {
            continue;
        };

        if cells[column].replace(hours).is_some() {
            overwritten += 1;
            debug!(
                "🔁 {} planned twice on ({}, {}); keeping {} from row {}",
                record.person, record.project_type, record.project, hours, record.row
            );
        }
    }

    let rows: Vec<OverviewRow> = people
        .into_iter()
        .map(|(person, hours)| {
            let total = hours.iter().flatten().map(|&h| u64::from(h)).sum();
            OverviewRow {
                person: person.to_string(),
                hours,
                total,
            }
        })
        .collect();

    debug!(
        "📊 Pivoted into {} people × {} projects ({} duplicate entries overwritten)",
        rows.len(),
        columns.len(),
        overwritten
    );

    OverviewMatrix { columns, rows }
}
