//! Column write commands
//!
//! `set` takes a value as typed on the command line and turns it into the payload the
//! target column expects, based on the column's type on the board. Status and dropdown
//! columns are written by label.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use monday::{Column, ColumnInput, ColumnKind, ColumnValues, FileUpload, Monday, Service};
use monday_core::values::{
    build_checkbox, build_country, build_date, build_date_time, build_item_links, build_people,
    build_status_index,
};

use super::boards::{find_column, label_settings};
use crate::prelude::*;

#[derive(Debug, clap::Args, Clone)]
pub struct SetOptions {
    /// Board ID
    #[clap(env = "MONDAY_BOARD_ID")]
    pub board_id: u64,

    /// Item ID
    pub item_id: u64,

    /// Column ID
    pub column_id: String,

    /// New value. Labels for status and dropdown columns, YYYY-MM-DD[ HH:MM:SS] for
    /// dates, true/false for checkboxes, comma separated IDs for people and connected
    /// items, CODE:Name for countries.
    pub value: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct UploadOptions {
    /// Item ID
    pub item_id: u64,

    /// File column ID
    pub column_id: String,

    /// File to upload
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn set_handler(monday: &Monday, options: SetOptions) -> Result<()> {
    let board = monday.get_board(options.board_id).await?;
    let column = find_column(&board, &options.column_id)?;
    let input = column_input(column, &options.value)?;

    log::debug!("Setting {} to {:?}", column.id, input);

    let values = ColumnValues::new().set(column.id.as_str(), input);
    let id = monday
        .change_multiple_column_values(options.board_id, options.item_id, &values)
        .await?;

    super::print_id(options.json, "Updated item", &id)
}

pub async fn upload_handler(monday: &Monday, options: UploadOptions) -> Result<()> {
    if !options.file.is_file() {
        return Err(eyre!("File not found: {}", options.file.display()));
    }

    let file_name = options
        .file
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let bytes = tokio::fs::read(&options.file)
        .await
        .wrap_err_with(|| format!("Failed to read {}", options.file.display()))?;

    let id = monday
        .add_file_to_column(
            options.item_id,
            &options.column_id,
            FileUpload::new(file_name, bytes),
        )
        .await?;

    super::print_id(options.json, "Uploaded asset", &id)
}

/// Builds the write payload for `value` according to the column's type.
pub fn column_input(column: &Column, value: &str) -> Result<ColumnInput> {
    let input = match column.column_type.kind() {
        ColumnKind::Color => {
            let labels = label_settings(column)?;
            let index = labels
                .index_of(value)
                .ok_or_else(|| eyre!("Column {} has no label {value:?}", column.id))?;
            ColumnInput::Status(build_status_index(index.parse()?))
        }
        ColumnKind::Dropdown => {
            let labels = label_settings(column)?;
            let ids = split_list(value)
                .map(|label| {
                    labels
                        .index_of(label)
                        .ok_or_else(|| eyre!("Column {} has no label {label:?}", column.id))?
                        .parse::<u64>()
                        .wrap_err("Dropdown ids are numeric")
                })
                .collect::<Result<Vec<_>>>()?;
            ColumnInput::Raw(serde_json::json!({ "ids": ids }))
        }
        ColumnKind::Date => ColumnInput::Date(parse_date(value)?),
        ColumnKind::Checkbox => {
            let checked: bool = value
                .trim()
                .parse()
                .wrap_err_with(|| format!("Expected true or false, got {value:?}"))?;
            ColumnInput::Checkbox(build_checkbox(checked))
        }
        ColumnKind::People => ColumnInput::People(build_people(parse_ids(value)?)),
        ColumnKind::BoardRelation => {
            ColumnInput::ConnectBoards(build_item_links(parse_ids(value)?))
        }
        ColumnKind::Country => {
            let (code, name) = value
                .split_once(':')
                .ok_or_eyre("Countries are written as CODE:Name (e.g., US:United States)")?;
            ColumnInput::Country(build_country(code.trim(), name.trim()))
        }
        ColumnKind::Text => ColumnInput::Text(value.to_string()),
        ColumnKind::Other => match serde_json::from_str(value) {
            Ok(json) => ColumnInput::Raw(json),
            Err(_) => ColumnInput::Text(value.to_string()),
        },
    };

    Ok(input)
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_ids(value: &str) -> Result<Vec<u64>> {
    split_list(value)
        .map(|id| id.parse().wrap_err_with(|| format!("Invalid ID {id:?}")))
        .collect()
}

fn parse_date(value: &str) -> Result<monday_core::values::DateTime> {
    let value = value.trim();

    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(build_date_time(date_time.date(), date_time.time()));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .wrap_err_with(|| format!("Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS, got {value:?}"))?;

    Ok(build_date(date))
}
