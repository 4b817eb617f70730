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


//! Presentation of the overview worksheet: merged and colored project type
//! headers, bold/frozen header rows and the hours gradient.

use crate::planning::TOTAL_LABEL;
use google_sheets4::{
    FieldMask,
    api::{
        AddConditionalFormatRuleRequest, CellData, CellFormat, Color, ColorStyle,
        ConditionalFormatRule, DeleteConditionalFormatRuleRequest, GradientRule, GridProperties,
        GridRange, InterpolationPoint, MergeCellsRequest, RepeatCellRequest, Request,
        SheetProperties, TextFormat, UpdateSheetPropertiesRequest,
    },
};
use serde::{Deserialize, Serialize};

/// Number of header rows above the person rows.
pub const HEADER_ROWS: usize = 2;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels scaled to 0–1 the way the Sheets API expects them (divided by 256).
    pub fn normalized(&self) -> [f32; 3] {
        [
            f32::from(self.red) / 256.0,
            f32::from(self.green) / 256.0,
            f32::from(self.blue) / 256.0,
        ]
    }

    fn to_api_color(self) -> Color {
        let [red, green, blue] = self.normalized();
        Color {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            ..Default::default()
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.red, rgb.green, rgb.blue]
    }
}

/// Project type header colors, used in order and then cycled.
pub const DEFAULT_PALETTE: [Rgb; 9] = [
    Rgb::new(224, 187, 228),
    Rgb::new(149, 125, 173),
    Rgb::new(210, 145, 188),
    Rgb::new(254, 200, 216),
    Rgb::new(255, 223, 211),
    Rgb::new(193, 231, 227),
    Rgb::new(249, 240, 194),
    Rgb::new(177, 212, 236),
    Rgb::new(143, 193, 169),
];

/// Static presentation settings for the overview worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub palette: Vec<Rgb>,
    /// Hours value mapped to the sheet background color
    pub gradient_min: i32,
    /// Hours value mapped to `gradient_color`
    pub gradient_max: i32,
    pub gradient_color: Rgb,
    /// Minimum size of a newly created worksheet
    pub worksheet_size: GridSize,
    pub worksheet_prefix: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            gradient_min: -7,
            gradient_max: 40,
            gradient_color: Rgb::new(102, 205, 170),
            worksheet_size: GridSize {
                rows: 100,
                columns: 100,
            },
            worksheet_prefix: "Week ".to_string(),
        }
    }
}

impl Presentation {
    /// Title of the overview worksheet for a week.
    pub fn worksheet_name(&self, week_number: u32) -> String {
        format!("{}{}", self.worksheet_prefix, week_number)
    }
}

/// Row and column count of a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

/// A run of equal project type headers, 1-based inclusive columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderMerge {
    pub start_column: usize,
    pub end_column: usize,
    pub color: Rgb,
}

/// Two-point gradient over the hour cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursGradient {
    pub min_value: i32,
    pub max_value: i32,
    pub max_color: Rgb,
    /// Covered region, zero-based and end-exclusive
    pub first_row: usize,
    pub first_column: usize,
    pub size: GridSize,
}

/// Everything that is applied to a freshly written overview worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingPlan {
    pub merges: Vec<HeaderMerge>,
    pub frozen_rows: usize,
    pub frozen_columns: usize,
    pub gradient: HoursGradient,
}

/// Builds the formatting plan from the project type header row.
///
/// The walk starts at the second cell (the first one sits above the person
/// column) and ends at the `Total` label.
pub fn plan(header_row: &[String], size: GridSize, presentation: &Presentation) -> FormattingPlan {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut previous: Option<&str> = None;

    for (column, label) in header_row.iter().enumerate().skip(1) {
        if label == TOTAL_LABEL {
            break;
        }
        let column = column + 1;
        match ranges.last_mut() {
            Some(range) if previous == Some(label.as_str()) => range.1 = column,
            _ => ranges.push((column, column)),
        }
        previous = Some(label.as_str());
    }

    let merges = ranges
        .into_iter()
        .zip(presentation.palette.iter().cycle())
        .map(|((start_column, end_column), color)| HeaderMerge {
            start_column,
            end_column,
            color: *color,
        })
        .collect();

    FormattingPlan {
        merges,
        frozen_rows: HEADER_ROWS,
        frozen_columns: 1,
        gradient: HoursGradient {
            min_value: presentation.gradient_min,
            max_value: presentation.gradient_max,
            max_color: presentation.gradient_color,
            first_row: HEADER_ROWS,
            first_column: 1,
            size,
        },
    }
}

impl FormattingPlan {
    /// Translates the plan into Sheets API batch requests for one worksheet.
    ///
    /// `existing_rules` conditional format rules are deleted first so the
    /// gradient replaces whatever the worksheet had before.
    pub fn requests(&self, sheet_id: i32, existing_rules: usize) -> Vec<Request> {
        let mut requests = Vec::new();

        for index in (0..existing_rules).rev() {
            requests.push(Request {
                delete_conditional_format_rule: Some(DeleteConditionalFormatRuleRequest {
                    index: Some(index as i32),
                    sheet_id: Some(sheet_id),
                }),
                ..Default::default()
            });
        }

        for merge in &self.merges {
            let range = grid_range(
                sheet_id,
                Some((0, 1)),
                Some((merge.start_column - 1, merge.end_column)),
            );

            if merge.end_column > merge.start_column {
                requests.push(Request {
                    merge_cells: Some(MergeCellsRequest {
                        merge_type: Some("MERGE_ALL".to_string()),
                        range: Some(range.clone()),
                    }),
                    ..Default::default()
                });
            }

            requests.push(repeat_cell(
                range,
                CellFormat {
                    background_color: Some(merge.color.to_api_color()),
                    ..Default::default()
                },
                &["userEnteredFormat.backgroundColor"],
            ));
        }

        requests.push(repeat_cell(
            grid_range(sheet_id, Some((0, HEADER_ROWS)), None),
            CellFormat {
                horizontal_alignment: Some("CENTER".to_string()),
                text_format: Some(bold()),
                ..Default::default()
            },
            &[
                "userEnteredFormat.horizontalAlignment",
                "userEnteredFormat.textFormat.bold",
            ],
        ));

        requests.push(repeat_cell(
            grid_range(sheet_id, None, Some((0, 1))),
            CellFormat {
                text_format: Some(bold()),
                ..Default::default()
            },
            &["userEnteredFormat.textFormat.bold"],
        ));

        requests.push(Request {
            update_sheet_properties: Some(UpdateSheetPropertiesRequest {
                properties: Some(SheetProperties {
                    sheet_id: Some(sheet_id),
                    grid_properties: Some(GridProperties {
                        frozen_row_count: Some(self.frozen_rows as i32),
                        frozen_column_count: Some(self.frozen_columns as i32),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                fields: Some(FieldMask::new(&[
                    "gridProperties.frozenRowCount",
                    "gridProperties.frozenColumnCount",
                ])),
                ..Default::default()
            }),
            ..Default::default()
        });

        requests.push(repeat_cell(
            grid_range(sheet_id, Some((1, 2)), None),
            CellFormat {
                wrap_strategy: Some("WRAP".to_string()),
                ..Default::default()
            },
            &["userEnteredFormat.wrapStrategy"],
        ));

        requests.push(self.gradient_request(sheet_id));
        requests
    }

    fn gradient_request(&self, sheet_id: i32) -> Request {
        let gradient = &self.gradient;
        let range = grid_range(
            sheet_id,
            Some((gradient.first_row, gradient.size.rows)),
            Some((gradient.first_column, gradient.size.columns)),
        );

        let rule = ConditionalFormatRule {
            ranges: Some(vec![range]),
            gradient_rule: Some(GradientRule {
                minpoint: Some(InterpolationPoint {
                    color_style: Some(ColorStyle {
                        theme_color: Some("BACKGROUND".to_string()),
                        ..Default::default()
                    }),
                    type_: Some("NUMBER".to_string()),
                    value: Some(gradient.min_value.to_string()),
                    ..Default::default()
                }),
                maxpoint: Some(InterpolationPoint {
                    color_style: Some(ColorStyle {
                        rgb_color: Some(gradient.max_color.to_api_color()),
                        ..Default::default()
                    }),
                    type_: Some("NUMBER".to_string()),
                    value: Some(gradient.max_value.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        Request {
            add_conditional_format_rule: Some(AddConditionalFormatRuleRequest {
                index: Some(0),
                rule: Some(rule),
            }),
            ..Default::default()
        }
    }
}

fn bold() -> TextFormat {
    TextFormat {
        bold: Some(true),
        ..Default::default()
    }
}

/// Zero-based, end-exclusive range; `None` leaves that dimension unbounded.
fn grid_range(
    sheet_id: i32,
    rows: Option<(usize, usize)>,
    columns: Option<(usize, usize)>,
) -> GridRange {
    GridRange {
        sheet_id: Some(sheet_id),
        start_row_index: rows.map(|(start, _)| start as i32),
        end_row_index: rows.map(|(_, end)| end as i32),
        start_column_index: columns.map(|(start, _)| start as i32),
        end_column_index: columns.map(|(_, end)| end as i32),
    }
}

fn repeat_cell(range: GridRange, format: CellFormat, fields: &[&str]) -> Request {
    Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(range),
            cell: Some(CellData {
                user_entered_format: Some(format),
                ..Default::default()
            }),
            fields: Some(FieldMask::new(fields)),
        }),
        ..Default::default()
    }
}
