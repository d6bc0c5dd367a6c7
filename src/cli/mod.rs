//! CLI module for Campaign Desk
//!
//! Provides command-line interface parsing for the campaign-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Campaign Desk - multi-tenant campaign management server
#[derive(Parser, Debug)]
#[command(
    name = "campaign-server",
    version,
    about = "Campaign Desk - multi-tenant campaign management server",
    long_about = "Serves the Campaign Desk REST API: JWT authentication, clients,\n\
                  campaigns, adverts, concept notes and budgets per organization.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new project.",
    after_help = "EXAMPLES:\n    \
                  campaign-server init                 # Scaffold campaign.toml and .env.example\n    \
                  campaign-server config --validate    # Check campaign.toml and the environment\n    \
                  campaign-server                      # Start the server (requires campaign.toml)\n    \
                  campaign-server --config prod.toml   # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "campaign.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Campaign Desk project
    ///
    /// Creates campaign.toml, .env.example and the data/ directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Show the full configuration
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file and required environment variables
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
