//! List the applications declared by packages on the search path.
//!
//! Usage:
//!   meco-app-list
//!   meco-app-list --parent-application maya --detail
//!   meco-app-list --package mTools --list-inactive --json

use anyhow::Result;
use clap::Parser;
use meco_application::cli::{FilterArgs, init_tracing, run_listing};

#[derive(Parser, Debug)]
#[command(name = "meco-app-list")]
#[command(about = "List applications")]
struct Cli {
    #[command(flatten)]
    filters: FilterArgs,
    /// Keyword used to find applications (exact keyword or name substring).
    #[arg(short, long)]
    keyword: Option<String>,
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
    run_listing(&cli.filters, cli.keyword)
}
