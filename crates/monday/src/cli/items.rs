//! Item commands

use colored::Colorize;
use monday::{ColumnValues, DecodeOptions, Decoded, Item, Monday, Service};
use monday_core::decode::Problem;
use prettytable::row;

use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Args, Clone)]
pub struct ItemsOptions {
    /// Board ID
    #[clap(env = "MONDAY_BOARD_ID")]
    pub board_id: u64,

    /// Only items whose column has the given value (requires --value)
    #[arg(long, requires = "value")]
    pub column: Option<String>,

    /// Value to match in --column
    #[arg(long, requires = "column")]
    pub value: Option<String>,

    /// Fail if a status or dropdown value cannot be resolved
    #[arg(long)]
    pub strict: bool,

    /// Separator for multi-select dropdown labels
    #[arg(long, default_value = ", ")]
    pub separator: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct AddItemOptions {
    /// Board ID
    #[clap(env = "MONDAY_BOARD_ID")]
    pub board_id: u64,

    /// Item name
    pub name: String,

    /// Column values as a JSON object keyed by column ID
    /// (e.g., '{"status":{"index":1},"text":"hello"}')
    #[arg(long)]
    pub values: Option<String>,

    /// Create a subitem under this item instead
    #[arg(long)]
    pub parent: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct UpdateOptions {
    /// Item ID
    pub item_id: String,

    /// Update body
    pub body: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct DeleteOptions {
    /// Item ID
    pub item_id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn items_handler(monday: &Monday, options: ItemsOptions) -> Result<()> {
    let board = monday.get_board(options.board_id).await?;

    let mut decode_options = if options.strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };
    decode_options.dropdown_separator = options.separator;

    let decoded = match (options.column, options.value) {
        (Some(column), Some(value)) => {
            monday
                .get_decoded_items_by_column_values(&board, &column, &value, &decode_options)
                .await?
        }
        _ => monday.get_decoded_items(&board, &decode_options).await?,
    };

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&decoded.items)?);
    } else if decoded.items.is_empty() {
        std::println!("No items found.");
    } else {
        for item in &decoded.items {
            display_item(item);
        }
    }

    report_diagnostics(&decoded);

    Ok(())
}

fn display_item(item: &Item) {
    let group = item
        .group
        .as_ref()
        .map(|g| format!(" [{}]", g.title))
        .unwrap_or_default();

    std::println!(
        "\n{} - {}{}",
        item.id.bold().cyan(),
        item.name.bright_white(),
        group.bright_black()
    );

    let mut table = new_table();
    for value in &item.column_values {
        table.add_row(row![
            value.title.bold().cyan(),
            value.value.green().to_string()
        ]);
    }
    table.printstd();

    if !item.assets.is_empty() {
        std::println!("{}", "Assets:".bold());
        for asset in &item.assets {
            std::println!("  - {} ({})", asset.name.bright_white(), asset.public_url);
        }
    }
}

fn report_diagnostics(decoded: &Decoded) {
    for diagnostic in &decoded.diagnostics {
        let problem = match &diagnostic.problem {
            Problem::UnknownColumn => "column not on board".to_string(),
            Problem::Unresolved(err) => err.to_string(),
        };
        eprintln!(
            "{} item {} column {}: {}",
            "warning:".yellow().bold(),
            diagnostic.item_id,
            diagnostic.column_id,
            problem
        );
    }
}

pub async fn add_item_handler(monday: &Monday, options: AddItemOptions) -> Result<()> {
    let values = options
        .values
        .as_deref()
        .map(parse_column_values)
        .transpose()?;

    let id = match options.parent {
        Some(parent) => {
            let values = values.unwrap_or_default();
            monday.add_subitem(parent, &options.name, &values).await?
        }
        None => {
            monday
                .add_item(options.board_id, &options.name, values.as_ref())
                .await?
        }
    };

    super::print_id(options.json, "Created item", &id)
}

pub async fn update_handler(monday: &Monday, options: UpdateOptions) -> Result<()> {
    monday
        .add_item_update(&options.item_id, &options.body)
        .await?;

    std::println!(
        "{} {}",
        "Posted update on item".green().bold(),
        options.item_id.bright_white()
    );

    Ok(())
}

pub async fn delete_handler(monday: &Monday, options: DeleteOptions) -> Result<()> {
    let id = monday.delete_item(options.item_id).await?;

    super::print_id(options.json, "Deleted item", &id)
}

/// Parses a JSON object into raw column values.
pub fn parse_column_values(json: &str) -> Result<ColumnValues> {
    let value: serde_json::Value =
        serde_json::from_str(json).wrap_err("--values is not valid JSON")?;

    let object = value
        .as_object()
        .ok_or_eyre("--values must be a JSON object keyed by column ID")?;

    Ok(object
        .iter()
        .fold(ColumnValues::new(), |values, (column_id, value)| {
            values.raw(column_id.as_str(), value.clone())
        }))
}
