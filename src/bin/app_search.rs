//! Search applications by keyword.
//!
//! The keyword is lower-cased, then matched exactly against declared
//! keywords or as a substring of the lower-cased application name.

use anyhow::Result;
use clap::Parser;
use meco_application::cli::{FilterArgs, init_tracing, run_listing};

#[derive(Parser, Debug)]
#[command(name = "meco-app-search")]
#[command(about = "Search applications")]
struct Cli {
    /// Keyword to be searched.
    keyword: String,
    #[command(flatten)]
    filters: FilterArgs,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    run_listing(&cli.filters, Some(cli.keyword.to_lowercase()))
}
