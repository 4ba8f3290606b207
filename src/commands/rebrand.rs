//! Rebrand command implementation
//!
//! Resolves the template root, configuration and names, then hands off to
//! [`RebrandOperation`].

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::RebrandConfig;
use crate::error::Result;
use crate::names::{NameSources, resolve};
use crate::operations::{RebrandOperation, RebrandOptions};
use crate::ui::{ConsoleReporter, Reporter, SilentReporter};

/// Run rebrand command
pub fn run(cli: Cli) -> Result<()> {
    let root = get_template_root(cli.root.clone())?;
    let config = RebrandConfig::load(&root, cli.config.as_deref())?;

    // Resolve names before anything is touched
    let sources = NameSources::gather(cli.names.clone(), cli.from.clone(), &root);
    let names = resolve(&sources)?;

    let mut reporter: Box<dyn Reporter> = if cli.quiet {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::new(cli.verbose))
    };

    let options = RebrandOptions::from(&cli);
    let mut operation = RebrandOperation::new(&root, options, reporter.as_mut());
    operation.execute(&names, &config)?;
    Ok(())
}

/// Get template root from CLI argument or current directory
fn get_template_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| {
            crate::error::fs::io_error(format!("Failed to get current directory: {e}"))
        })?,
    };

    if !root.is_dir() {
        return Err(crate::error::fs::io_error(format!(
            "Template root {} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}
