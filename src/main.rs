//! calcany command-line frontend.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calcany::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "calcany=debug" } else { "calcany=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    cli::install_panic_hook();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
