//! Rebrand - mobile app template renamer
//!
//! Renames a freshly scaffolded React Native style template: app name,
//! bundle identifier, Android package folder and Xcode project artifacts.

use clap::Parser;
use miette::Diagnostic;

mod audit;
mod cli;
mod commands;
mod config;
mod error;
mod names;
mod operations;
mod plan;
mod rename;
mod rules;
mod substitute;
mod transaction;
mod ui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::rebrand::run(cli) {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
