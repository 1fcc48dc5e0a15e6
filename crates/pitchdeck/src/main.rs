mod analytics;
mod app;
mod chart;
mod cli;
mod commands;
mod config;
mod deck;
mod effects;
mod format;
mod input;
mod logging;
mod model;
mod presentation;
mod scheduler;
mod surface;
mod theme;
mod view;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
