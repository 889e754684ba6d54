//! CLI commands for calcany.
//!
//! Runs queries from the terminal and manages the config file.

pub mod config;
pub mod query;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calcany")]
#[command(about = "Calculate-anything query engine for keyboard launchers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log routing and evaluator activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one query, e.g. `calcany query = 10 km to mi`
    Query {
        /// Query text; words are joined with single spaces. Quote a bare
        /// trigger with its trailing space (`"time "`) to see its placeholder
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,

        /// Print items as JSON
        #[arg(long)]
        json: bool,

        /// Run the evaluators of a mode in parallel
        #[arg(long)]
        parallel: bool,

        /// Activate the copy action of the item at this position
        #[arg(long, value_name = "INDEX")]
        copy: Option<usize>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective config
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Send panic reports through `tracing` instead of the default stderr hook.
///
/// Evaluator panics are still caught by the dispatcher; this only changes
/// where the report goes.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = crate::core::dispatch::panic_message(info.payload());
        match info.location() {
            Some(at) => tracing::error!(location = %at, panic = %message, "panic"),
            None => tracing::error!(panic = %message, "panic"),
        }
    }));
}

/// Run an already-parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Query {
            text,
            json,
            parallel,
            copy,
        } => query::run_query(&text.join(" "), json, parallel, copy),
        Commands::Config { action } => match action {
            ConfigCommands::Path => config::print_path(),
            ConfigCommands::Show => config::show(),
            ConfigCommands::Init { force } => config::init(force),
        },
    }
}
