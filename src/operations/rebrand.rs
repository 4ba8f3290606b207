//! Rebrand operation
//!
//! Expands the rule table for every legacy name, then either previews the
//! plan (dry run) or applies it step by step inside a [`Transaction`].

use std::path::{Path, PathBuf};

use crate::audit::{self, Residual};
use crate::config::RebrandConfig;
use crate::error::Result;
use crate::names::ResolvedNames;
use crate::plan::{Action, PlannedStep, Preview, RenamePlan};
use crate::rename::{RenameOutcome, rename_entry};
use crate::rules::default_rules;
use crate::substitute::{PreparedEdit, SubstituteOutcome, prepare_edit, substitute};
use crate::transaction::Transaction;
use crate::ui::Reporter;

/// Configuration options for a rebrand run
#[derive(Debug, Clone, Copy)]
pub struct RebrandOptions {
    pub dry_run: bool,
    /// Undo applied steps when a later step fails
    pub rollback: bool,
    /// Scan for leftover legacy names afterwards
    pub audit: bool,
}

impl Default for RebrandOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            rollback: true,
            audit: true,
        }
    }
}

/// What happened to a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Edited { replacements: usize },
    Unchanged,
    Renamed,
    /// Merged into an existing target; `superseded` are the kept files whose
    /// older copy was dropped
    Merged {
        entries: usize,
        superseded: Vec<PathBuf>,
    },
    Skipped,
}

impl From<SubstituteOutcome> for StepOutcome {
    fn from(outcome: SubstituteOutcome) -> Self {
        match outcome {
            SubstituteOutcome::Skipped => StepOutcome::Skipped,
            SubstituteOutcome::Unchanged => StepOutcome::Unchanged,
            SubstituteOutcome::Rewritten { replacements } => StepOutcome::Edited { replacements },
        }
    }
}

impl From<RenameOutcome> for StepOutcome {
    fn from(outcome: RenameOutcome) -> Self {
        match outcome {
            RenameOutcome::Skipped => StepOutcome::Skipped,
            RenameOutcome::Renamed => StepOutcome::Renamed,
            RenameOutcome::Merged {
                entries,
                superseded,
            } => StepOutcome::Merged {
                entries,
                superseded,
            },
        }
    }
}

impl From<Preview> for StepOutcome {
    fn from(preview: Preview) -> Self {
        match preview {
            Preview::Edit { replacements } => StepOutcome::Edited { replacements },
            Preview::Unchanged => StepOutcome::Unchanged,
            Preview::Rename => StepOutcome::Renamed,
            Preview::Skip => StepOutcome::Skipped,
        }
    }
}

/// A step as shown to the user
#[derive(Debug, Clone)]
pub struct StepReport {
    pub rule: String,
    pub old_name: String,
    /// Root-relative path, or `from -> to` for renames
    pub subject: String,
    pub outcome: StepOutcome,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebrandSummary {
    pub new_name: String,
    pub old_names: Vec<String>,
    pub edited: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    /// Files kept from an earlier generation while the older copy was dropped
    pub superseded: usize,
    pub residuals: Vec<Residual>,
}

impl RebrandSummary {
    pub fn new(new_name: &str) -> Self {
        Self {
            new_name: new_name.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Edited { .. } => self.edited += 1,
            StepOutcome::Renamed => self.renamed += 1,
            StepOutcome::Merged { superseded, .. } => {
                self.renamed += 1;
                self.superseded += superseded.len();
            }
            StepOutcome::Unchanged => self.unchanged += 1,
            StepOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// High-level rebrand operation
pub struct RebrandOperation<'a> {
    root: PathBuf,
    options: RebrandOptions,
    reporter: &'a mut dyn Reporter,
}

impl<'a> RebrandOperation<'a> {
    pub fn new(root: &Path, options: RebrandOptions, reporter: &'a mut dyn Reporter) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
            reporter,
        }
    }

    /// Execute the rebrand for resolved names
    pub fn execute(
        &mut self,
        names: &ResolvedNames,
        config: &RebrandConfig,
    ) -> Result<RebrandSummary> {
        let targets = names.targets(&config.legacy_names);

        let mut rules = default_rules();
        rules.extend(config.extra_rules());
        let plan = RenamePlan::build(&self.root, &targets, &rules);

        let mut summary = RebrandSummary::new(&names.new_name);
        summary.old_names = targets.iter().map(|t| t.old_name.clone()).collect();

        self.reporter
            .begin(&names.new_name, &summary.old_names, self.options.dry_run);

        if self.options.dry_run {
            let previews = plan.preview()?;
            for (step, preview) in plan.steps.iter().zip(previews) {
                self.report(&plan, step, preview.into(), &mut summary);
            }
        } else {
            self.apply(&plan, &mut summary)?;

            if self.options.audit {
                summary.residuals = audit::scan(&self.root, &summary.old_names, &names.new_name)?;
                for residual in &summary.residuals {
                    self.reporter.residual(residual);
                }
            }
        }

        self.reporter.finish(&summary);
        Ok(summary)
    }

    fn apply(&mut self, plan: &RenamePlan, summary: &mut RebrandSummary) -> Result<()> {
        let mut transaction = self.options.rollback.then(Transaction::new);

        for step in &plan.steps {
            match apply_step(step, transaction.as_mut()) {
                Ok(outcome) => self.report(plan, step, outcome, summary),
                Err(e) => {
                    if let Some(mut transaction) = transaction {
                        let journalled = transaction.len();
                        let failures = transaction.rollback();
                        self.reporter
                            .rolled_back(journalled - failures, failures);
                    }
                    return Err(e);
                }
            }
        }

        if let Some(transaction) = transaction {
            transaction.commit();
        }
        Ok(())
    }

    fn report(
        &mut self,
        plan: &RenamePlan,
        step: &PlannedStep,
        outcome: StepOutcome,
        summary: &mut RebrandSummary,
    ) {
        summary.record(&outcome);
        let outcome = match outcome {
            StepOutcome::Merged {
                entries,
                superseded,
            } => StepOutcome::Merged {
                entries,
                superseded: superseded
                    .iter()
                    .map(|p| plan.relative(p).to_path_buf())
                    .collect(),
            },
            other => other,
        };
        let subject = match &step.action {
            Action::Edit { path, .. } => plan.relative(path).display().to_string(),
            Action::Rename { from, to } => format!(
                "{} -> {}",
                plan.relative(from).display(),
                plan.relative(to).display()
            ),
        };
        self.reporter.step(&StepReport {
            rule: step.rule.clone(),
            old_name: step.target.old_name.clone(),
            subject,
            outcome,
        });
    }
}

/// Apply one step, journalled when a transaction is active
fn apply_step(step: &PlannedStep, transaction: Option<&mut Transaction>) -> Result<StepOutcome> {
    match (&step.action, transaction) {
        (Action::Edit { path, transforms }, Some(transaction)) => {
            match prepare_edit(path, transforms, &step.target)? {
                PreparedEdit::Missing => Ok(StepOutcome::Skipped),
                PreparedEdit::Unchanged => Ok(StepOutcome::Unchanged),
                PreparedEdit::Changed(edit) => {
                    transaction.apply_edit(&edit)?;
                    Ok(StepOutcome::Edited {
                        replacements: edit.replacements,
                    })
                }
            }
        }
        (Action::Edit { path, transforms }, None) => {
            Ok(substitute(path, transforms, &step.target)?.into())
        }
        (Action::Rename { from, to }, Some(transaction)) => {
            Ok(transaction.rename(from, to)?.into())
        }
        (Action::Rename { from, to }, None) => Ok(rename_entry(from, to)?.into()),
    }
}
