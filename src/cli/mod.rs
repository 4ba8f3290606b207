//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::operations::RebrandOptions;

/// Rebrand - mobile app template renamer
///
/// Renames a freshly scaffolded template's app name, bundle identifier and
/// project folders in one pass.
#[derive(Parser, Debug)]
#[command(
    name = "rebrand",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Rename a React Native style app template",
    long_about = "Rebrand rewrites the app name and bundle identifier in the template's manifests, \
                  Android and iOS projects, and renames the folders that embed the old name. \
                  Every legacy placeholder name of the template is migrated in one run.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rebrand \"My App\"               \x1b[90m# Rename every legacy name to My App\x1b[0m\n   \
                  rebrand OldName NewName        \x1b[90m# Rename one specific name\x1b[0m\n   \
                  rebrand Acme --from meTube     \x1b[90m# Rename only the given legacy names\x1b[0m\n   \
                  rebrand Acme --dry-run         \x1b[90m# Show what would change\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// [OLD] NEW: one name is the new name; two names are old and new
    #[arg(value_name = "NAME", num_args = 0..=2)]
    pub names: Vec<String>,

    /// Legacy name to migrate (repeatable, replaces the configured list)
    #[arg(long, value_name = "NAME")]
    pub from: Vec<String>,

    /// Template root (defaults to current directory)
    #[arg(long, short = 'r', env = "REBRAND_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to rebrand.yaml in the template root)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Show what would change without modifying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep already applied changes when a step fails
    #[arg(long)]
    pub no_rollback: bool,

    /// Skip the scan for leftover legacy names
    #[arg(long)]
    pub no_audit: bool,

    /// Only print errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl From<&Cli> for RebrandOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            rollback: !cli.no_rollback,
            audit: !cli.no_audit,
        }
    }
}
