//! Command-line interface.

mod commands;
mod events;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "Page enhancement toolkit: navigation toggle, site search and carousel")]
#[command(version)]
pub struct Cli {
    /// Config file (TOML, YAML or JSON); discovered automatically if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Report which features a page's markup enables
    Inspect {
        /// HTML file of the host page
        page: PathBuf,
    },

    /// Search the site index
    Search {
        /// Text to look for
        query: String,
        /// Index URL or file (overrides config)
        #[arg(short, long)]
        index: Option<String>,
        /// Print the rendered results panel instead of a listing
        #[arg(long)]
        html: bool,
    },

    /// Run the page lifecycle headlessly against a sequence of events
    ///
    /// Events: nav, next, prev, goto:N, input:TEXT, key:KEY, enter, click,
    /// search:TEXT (input + enter), dismiss
    Simulate {
        /// HTML file of the host page
        page: PathBuf,
        /// Index URL or file (overrides config). Site-relative paths such as
        /// `/search-index.json` are looked up next to the page when no
        /// `base_url` is configured
        #[arg(short, long)]
        index: Option<String>,
        /// Events to dispatch, in order
        events: Vec<String>,
    },

    /// Serve a built site directory with the search API
    Serve {
        /// Site root containing search-index.json
        site_dir: PathBuf,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "1313")]
        port: u16,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(&path).await?,
        None => Config::load().await,
    };

    match cli.command {
        Commands::Inspect { page } => commands::cmd_inspect(&config, &page).await,
        Commands::Search { query, index, html } => {
            commands::cmd_search(&with_index(config, index), &query, html).await
        }
        Commands::Simulate {
            page,
            index,
            events,
        } => commands::cmd_simulate(&with_index(config, index), &page, &events).await,
        Commands::Serve {
            site_dir,
            host,
            port,
        } => commands::cmd_serve(&config, site_dir, &host, port).await,
    }
}

fn with_index(mut config: Config, index: Option<String>) -> Config {
    if let Some(index) = index {
        config.index_url = index;
        // Relative paths given on the command line resolve against the cwd.
        config.source_path = None;
    }
    config
}
