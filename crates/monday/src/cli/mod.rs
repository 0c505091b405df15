pub mod boards;
pub mod items;
pub mod set;

use crate::prelude::*;

/// monday commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all boards
    #[clap(name = "boards")]
    Boards(boards::BoardsOptions),

    /// Show the columns of a board
    #[clap(name = "columns")]
    Columns(boards::ColumnsOptions),

    /// List the labels of a status or dropdown column
    #[clap(name = "labels")]
    Labels(boards::LabelsOptions),

    /// List the items of a board, with labels resolved
    #[clap(name = "items")]
    Items(items::ItemsOptions),

    /// Create an item or subitem
    #[clap(name = "add-item")]
    AddItem(items::AddItemOptions),

    /// Post an update on an item
    #[clap(name = "update")]
    Update(items::UpdateOptions),

    /// Write one column of an item
    #[clap(name = "set")]
    Set(set::SetOptions),

    /// Delete an item
    #[clap(name = "delete")]
    Delete(items::DeleteOptions),

    /// Upload a file to a file column
    #[clap(name = "upload")]
    Upload(set::UploadOptions),
}

/// Run monday commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let monday = global.monday()?;

    match cmd {
        Commands::Boards(options) => boards::boards_handler(&monday, options).await,
        Commands::Columns(options) => boards::columns_handler(&monday, options).await,
        Commands::Labels(options) => boards::labels_handler(&monday, options).await,
        Commands::Items(options) => items::items_handler(&monday, options).await,
        Commands::AddItem(options) => items::add_item_handler(&monday, options).await,
        Commands::Update(options) => items::update_handler(&monday, options).await,
        Commands::Set(options) => set::set_handler(&monday, options).await,
        Commands::Delete(options) => items::delete_handler(&monday, options).await,
        Commands::Upload(options) => set::upload_handler(&monday, options).await,
    }
}

/// Prints `{"id": ...}` or a success line.
fn print_id(json: bool, message: &str, id: &str) -> Result<()> {
    use colored::Colorize;

    if json {
        std::println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "id": id }))?
        );
    } else {
        std::println!("{} {}", message.green().bold(), id.bright_white());
    }

    Ok(())
}
