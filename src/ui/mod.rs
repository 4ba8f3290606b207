//! Progress presentation layer
//!
//! All progress reporting goes through the [`Reporter`] trait, allowing
//! different implementations based on command-line flags (e.g., --quiet, --verbose).

use console::Style;

use crate::audit::{Finding, Residual};
use crate::operations::rebrand::{RebrandSummary, StepOutcome, StepReport};

/// Receives progress from a rebrand run
pub trait Reporter {
    /// Called once before the first step
    fn begin(&mut self, new_name: &str, old_names: &[String], dry_run: bool);

    /// Called after every planned step, applied or not
    fn step(&mut self, report: &StepReport);

    /// A file that still mentions a legacy name after the run
    fn residual(&mut self, residual: &Residual);

    /// Applied changes were undone after a failure
    fn rolled_back(&mut self, undone: usize, failures: usize);

    /// Called once after a successful run
    fn finish(&mut self, summary: &RebrandSummary);
}

/// Human-readable console output
///
/// Skipped and unchanged steps are shown only in verbose mode.
pub struct ConsoleReporter {
    verbose: bool,
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            dry_run: false,
        }
    }

    fn prefix(&self) -> String {
        if self.dry_run {
            format!("{} ", Style::new().yellow().bold().apply_to("[DRY RUN]"))
        } else {
            String::new()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn begin(&mut self, new_name: &str, old_names: &[String], dry_run: bool) {
        self.dry_run = dry_run;
        let olds = old_names
            .iter()
            .map(|n| format!("\"{n}\""))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}Renaming from {} to {}...",
            self.prefix(),
            olds,
            Style::new().bold().apply_to(format!("\"{new_name}\""))
        );
    }

    fn step(&mut self, report: &StepReport) {
        let dim = Style::new().dim();
        let context = if self.verbose {
            format!(" [{}: {}]", report.old_name, report.rule)
        } else {
            String::new()
        };
        let (verb, detail) = match (&report.outcome, self.dry_run) {
            (StepOutcome::Edited { replacements }, false) => {
                ("Updated", format!(" ({replacements} replacement(s))"))
            }
            (StepOutcome::Edited { replacements }, true) => {
                ("Would update", format!(" ({replacements} replacement(s))"))
            }
            (StepOutcome::Renamed, false) => ("Renamed", String::new()),
            (StepOutcome::Renamed, true) => ("Would rename", String::new()),
            (StepOutcome::Merged { entries, .. }, _) => {
                ("Merged", format!(" ({entries} item(s) moved)"))
            }
            (StepOutcome::Unchanged, _) => {
                if self.verbose {
                    println!(
                        "   {}",
                        dim.apply_to(format!("· {} already up to date{context}", report.subject))
                    );
                }
                return;
            }
            (StepOutcome::Skipped, _) => {
                if self.verbose {
                    println!(
                        "   {}",
                        dim.apply_to(format!("· {} not found, skipped{context}", report.subject))
                    );
                }
                return;
            }
        };

        println!(
            "{}   ↳ {} {}{}",
            self.prefix(),
            verb,
            report.subject,
            dim.apply_to(format!("{detail}{context}"))
        );

        if let StepOutcome::Merged { superseded, .. } = &report.outcome {
            for kept in superseded {
                eprintln!(
                    "{} kept {}; the older {} copy was dropped",
                    Style::new().for_stderr().yellow().bold().apply_to("Warning:"),
                    kept.display(),
                    report.old_name
                );
            }
        }
    }

    fn residual(&mut self, residual: &Residual) {
        let detail = match residual.finding {
            Finding::Content { occurrences } => {
                format!("still mentions \"{}\" ({occurrences} occurrence(s))", residual.name)
            }
            Finding::PathName => format!("is still named after \"{}\"", residual.name),
        };
        eprintln!(
            "{} {} {}",
            Style::new().for_stderr().yellow().bold().apply_to("Warning:"),
            residual.path.display(),
            detail
        );
    }

    fn rolled_back(&mut self, undone: usize, failures: usize) {
        let message = if failures == 0 {
            format!("Rolled back {undone} change(s); the template is unchanged")
        } else {
            format!("Rolled back {undone} change(s), {failures} could not be undone")
        };
        eprintln!("{}", Style::new().for_stderr().yellow().apply_to(message));
    }

    fn finish(&mut self, summary: &RebrandSummary) {
        if self.dry_run {
            println!(
                "{}{} file(s) would be updated, {} path(s) renamed. No changes made.",
                self.prefix(),
                summary.edited,
                summary.renamed
            );
            return;
        }

        println!(
            "{} {} file(s) updated, {} path(s) renamed",
            Style::new()
                .green()
                .bold()
                .apply_to(format!("Successfully renamed to \"{}\"", summary.new_name)),
            summary.edited,
            summary.renamed
        );
        if self.verbose {
            println!(
                "   {}",
                Style::new().dim().apply_to(format!(
                    "{} step(s) skipped, {} already up to date",
                    summary.skipped, summary.unchanged
                ))
            );
        }
    }
}

/// Silent reporter for --quiet
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn begin(&mut self, _new_name: &str, _old_names: &[String], _dry_run: bool) {
        // No-op for silent mode
    }

    fn step(&mut self, _report: &StepReport) {
        // No-op for silent mode
    }

    fn residual(&mut self, _residual: &Residual) {
        // No-op for silent mode
    }

    fn rolled_back(&mut self, _undone: usize, _failures: usize) {
        // No-op for silent mode
    }

    fn finish(&mut self, _summary: &RebrandSummary) {
        // No-op for silent mode
    }
}
