use crate::prelude::*;
use clap::Parser;

mod error;
mod loc;
mod mcp;
mod params;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search the Library of Congress catalog and tabulate the results"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Library of Congress search endpoint
    #[clap(
        long,
        env = "LOC_BASE_URL",
        global = true,
        default_value = locsearch_core::search::BASE_URL
    )]
    base_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "LOCSEARCH_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search the catalog and print the results as a table
    Search(crate::loc::SearchOptions),

    /// Inspect and upgrade stored search parameters
    Params(crate::params::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(options) => crate::loc::run(options, app.global).await,
        SubCommands::Params(sub_app) => crate::params::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
