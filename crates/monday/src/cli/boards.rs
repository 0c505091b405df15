//! Board metadata commands

use colored::Colorize;
use monday::{Board, Column, LabelSettings, Monday, Service};
use prettytable::row;

use crate::prelude::*;

#[derive(Debug, clap::Args, Clone)]
pub struct BoardsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ColumnsOptions {
    /// Board ID
    #[clap(env = "MONDAY_BOARD_ID")]
    pub board_id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct LabelsOptions {
    /// Board ID
    #[clap(env = "MONDAY_BOARD_ID")]
    pub board_id: u64,

    /// Column ID (e.g., "status")
    pub column_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn boards_handler(monday: &Monday, options: BoardsOptions) -> Result<()> {
    let boards = monday.get_boards().await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&boards)?);
        return Ok(());
    }

    if boards.is_empty() {
        std::println!("No boards found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(row!["ID".bold().cyan(), "Name".bold().cyan()]);
    for board in &boards {
        table.add_row(row![
            board.id.green().to_string(),
            board.name.bright_white().to_string()
        ]);
    }
    table.printstd();

    Ok(())
}

pub async fn columns_handler(monday: &Monday, options: ColumnsOptions) -> Result<()> {
    let board = monday.get_board(options.board_id).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&board.columns)?);
        return Ok(());
    }

    std::println!(
        "\n{} - {}\n",
        board.id.bold().cyan(),
        board.name.bright_white()
    );

    let mut table = new_table();
    table.add_row(row![
        "ID".bold().cyan(),
        "Title".bold().cyan(),
        "Type".bold().cyan()
    ]);
    for column in &board.columns {
        table.add_row(row![
            column.id.green().to_string(),
            column.title.bright_white().to_string(),
            column.column_type.to_string().bright_blue().to_string()
        ]);
    }
    table.printstd();

    Ok(())
}

pub async fn labels_handler(monday: &Monday, options: LabelsOptions) -> Result<()> {
    let board = monday.get_board(options.board_id).await?;
    let column = find_column(&board, &options.column_id)?;
    let labels = label_settings(column)?;
    let entries = labels.entries();

    if options.json {
        let entries: Vec<serde_json::Value> = entries
            .iter()
            .map(|(key, label)| serde_json::json!({ "key": key, "label": label }))
            .collect();
        std::println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(row!["Key".bold().cyan(), "Label".bold().cyan()]);
    for (key, label) in &entries {
        table.add_row(row![
            key.bright_yellow().to_string(),
            label.bright_white().to_string()
        ]);
    }
    table.printstd();

    Ok(())
}

pub fn find_column<'a>(board: &'a Board, column_id: &str) -> Result<&'a Column> {
    board
        .column_map()
        .get(column_id)
        .ok_or_else(|| eyre!("Column {column_id} not found on board {}", board.id))
}

pub fn label_settings(column: &Column) -> Result<LabelSettings> {
    LabelSettings::parse(&column.column_type, &column.settings)?.ok_or_else(|| {
        eyre!(
            "Column {} is of type {} and has no labels",
            column.id,
            column.column_type
        )
    })
}
