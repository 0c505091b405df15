use clap::Parser;
use monday::{Monday, MondayConfig};

use crate::prelude::{eprintln, *};

mod cli;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Read and write monday.com boards from the command line"
)]
pub struct App {
    #[command(subcommand)]
    pub command: cli::Commands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// monday API token
    #[clap(long, env = "MONDAY_API_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// GraphQL endpoint
    #[clap(long, env = "MONDAY_API_URL", global = true)]
    api_url: Option<String>,

    /// GraphQL endpoint for file uploads
    #[clap(long, env = "MONDAY_FILE_URL", global = true)]
    file_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "MONDAY_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Builds the service from flags and environment.
    pub fn monday(&self) -> Result<Monday> {
        let token = self
            .token
            .clone()
            .ok_or_eyre("MONDAY_API_TOKEN is not set (use --token or the environment)")?;

        let config = MondayConfig::new(token).with_overrides(
            self.api_url.clone(),
            self.file_url.clone(),
            None,
        );

        if self.verbose {
            eprintln!("Using {} ({})", config.api_url, config.file_url);
        }

        Ok(Monday::new(&config)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    cli::run(app.command, app.global)
        .await
        .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
