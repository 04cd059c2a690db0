//! Workforce - workers, sites, vehicles, and transport assignments
//!
//! A CLI front end over the workforce ledger.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
