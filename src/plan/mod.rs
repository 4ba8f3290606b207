//! Concrete rename plan
//!
//! Expands the rule table once per [`RenameTarget`] into absolute, ordered
//! steps. The plan can be previewed without touching the disk: later steps
//! see the effect of earlier renames through [`RenamePlan::preview`].

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::names::RenameTarget;
use crate::rules::{ArtifactRule, Step};
use crate::substitute::{PreparedEdit, TextTransform, prepare_edit};

/// A step with its paths resolved for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit {
        path: PathBuf,
        transforms: Vec<TextTransform>,
    },
    Rename {
        from: PathBuf,
        to: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub target: RenameTarget,
    /// Name of the artifact rule this step came from
    pub rule: String,
    pub action: Action,
}

/// Predicted effect of a step, used for dry runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Edit { replacements: usize },
    Unchanged,
    Rename,
    Skip,
}

#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub steps: Vec<PlannedStep>,
}

impl RenamePlan {
    /// Expand `rules` for every target, in target order
    pub fn build(root: &Path, targets: &[RenameTarget], rules: &[ArtifactRule]) -> Self {
        let mut steps = Vec::new();
        for target in targets {
            for rule in rules {
                for step in &rule.steps {
                    let action = match step {
                        Step::Edit { path, transforms } => path.expand(target).map(|path| {
                            Action::Edit {
                                path: root.join(path),
                                transforms: transforms.clone(),
                            }
                        }),
                        Step::Rename { from, to } => {
                            from.expand(target).zip(to.expand(target)).map(|(from, to)| {
                                Action::Rename {
                                    from: root.join(from),
                                    to: root.join(to),
                                }
                            })
                        }
                    };
                    // A placeholder with nothing to substitute has no artifact
                    let Some(action) = action else {
                        continue;
                    };
                    steps.push(PlannedStep {
                        target: target.clone(),
                        rule: rule.name.clone(),
                        action,
                    });
                }
            }
        }

        Self {
            root: root.to_path_buf(),
            steps,
        }
    }

    /// Path relative to the template root, for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Predict every step without modifying anything.
    ///
    /// Renames are simulated so that a step addressing `ios/{new}` looks at the
    /// folder that would have been moved there. Edits are computed against the
    /// current on-disk content, so an edit of a file touched by an earlier
    /// step reports the matches that exist today.
    pub fn preview(&self) -> Result<Vec<Preview>> {
        let mut moves: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut previews = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let preview = match &step.action {
                Action::Edit { path, transforms } => {
                    match original_location(path, &moves).into_iter().find(|p| p.is_file()) {
                        None => Preview::Skip,
                        Some(source) => match prepare_edit(&source, transforms, &step.target)? {
                            PreparedEdit::Missing => Preview::Skip,
                            PreparedEdit::Unchanged => Preview::Unchanged,
                            PreparedEdit::Changed(edit) => Preview::Edit {
                                replacements: edit.replacements,
                            },
                        },
                    }
                }
                Action::Rename { from, to } => {
                    let exists = original_location(from, &moves)
                        .iter()
                        .any(|p| std::fs::symlink_metadata(p).is_ok());
                    if exists && from != to {
                        moves.push((from.clone(), to.clone()));
                        Preview::Rename
                    } else {
                        Preview::Skip
                    }
                }
            };
            previews.push(preview);
        }

        Ok(previews)
    }
}

/// Where `path` would have come from on today's disk, given the renames
/// simulated so far. Returns every candidate because a rename into an
/// existing folder merges both trees. On a file collision the entry already
/// at the target is kept, so target-side candidates come first.
fn original_location(path: &Path, moves: &[(PathBuf, PathBuf)]) -> Vec<PathBuf> {
    let Some(((from, to), earlier)) = moves.split_last() else {
        return vec![path.to_path_buf()];
    };

    if let Ok(rest) = path.strip_prefix(to) {
        let source = if rest.as_os_str().is_empty() {
            from.clone()
        } else {
            from.join(rest)
        };
        let mut candidates = original_location(path, earlier);
        candidates.extend(original_location(&source, earlier));
        return candidates;
    }
    if path.starts_with(from) {
        // Moved away by this rename
        return Vec::new();
    }
    original_location(path, earlier)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use crate::substitute::CaseMode;
    use std::fs;
    use tempfile::TempDir;

    fn targets() -> Vec<RenameTarget> {
        vec![
            RenameTarget::new("meTube", "Acme"),
            RenameTarget::new("stylish-pack", "Acme"),
        ]
    }

    #[test]
    fn test_build_expands_rules_per_target() {
        let temp = TempDir::new().unwrap();
        let rules = default_rules();
        let per_target: usize = rules.iter().map(|r| r.steps.len()).sum();

        let plan = RenamePlan::build(temp.path(), &targets(), &rules);
        assert_eq!(plan.steps.len(), per_target * 2);
        assert!(plan.steps[..per_target].iter().all(|s| s.target.old_name == "meTube"));
        assert!(
            plan.steps[per_target..]
                .iter()
                .all(|s| s.target.old_name == "stylish-pack")
        );
    }

    #[test]
    fn test_build_resolves_absolute_paths() {
        let temp = TempDir::new().unwrap();
        let rules = vec![ArtifactRule::new(
            "ios app",
            vec![Step::rename("ios/{old}", "ios/{new}")],
        )];
        let plan = RenamePlan::build(temp.path(), &targets()[..1], &rules);
        assert_eq!(
            plan.steps[0].action,
            Action::Rename {
                from: temp.path().join("ios").join("meTube"),
                to: temp.path().join("ios").join("Acme"),
            }
        );
        assert_eq!(
            plan.relative(&temp.path().join("ios").join("Acme")),
            Path::new("ios/Acme")
        );
    }

    #[test]
    fn test_build_drops_steps_with_empty_placeholders() {
        let temp = TempDir::new().unwrap();
        let rules = vec![ArtifactRule::new(
            "android sources",
            vec![
                Step::edit("java/com/{old_pkg}/MainActivity.kt", Vec::new()),
                Step::rename("java/com/{old_pkg}", "java/com/{new_pkg}"),
                Step::rename("ios/{old}", "ios/{new}"),
            ],
        )];
        let plan = RenamePlan::build(temp.path(), &[RenameTarget::new("日本", "Acme")], &rules);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(
            plan.steps[0].action,
            Action::Rename {
                from: temp.path().join("ios").join("日本"),
                to: temp.path().join("ios").join("Acme"),
            }
        );
    }

    #[test]
    fn test_preview_follows_simulated_renames() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("ios/meTube.xcodeproj/xcshareddata/xcschemes"))
            .unwrap();
        fs::write(
            temp.path()
                .join("ios/meTube.xcodeproj/xcshareddata/xcschemes/meTube.xcscheme"),
            r#"BlueprintName = "meTube""#,
        )
        .unwrap();

        let rules = vec![ArtifactRule::new(
            "xcode",
            vec![
                Step::rename("ios/{old}.xcodeproj", "ios/{new}.xcodeproj"),
                Step::rename(
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{old}.xcscheme",
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{new}.xcscheme",
                ),
                Step::edit(
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{new}.xcscheme",
                    vec![TextTransform::Literal(CaseMode::Sensitive)],
                ),
                Step::edit("ios/{old}.xcodeproj/project.pbxproj", Vec::new()),
            ],
        )];
        let plan = RenamePlan::build(temp.path(), &targets()[..1], &rules);
        let previews = plan.preview().unwrap();

        assert_eq!(
            previews,
            vec![
                Preview::Rename,
                Preview::Rename,
                Preview::Edit { replacements: 1 },
                Preview::Skip
            ]
        );
        // Nothing moved on disk
        assert!(temp.path().join("ios/meTube.xcodeproj").is_dir());
        assert!(!temp.path().join("ios/Acme.xcodeproj").exists());
    }

    #[test]
    fn test_preview_reports_unchanged_and_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app.json"), r#"{"name":"Acme"}"#).unwrap();

        let rules = vec![ArtifactRule::new(
            "manifests",
            vec![
                Step::edit("app.json", vec![TextTransform::Literal(CaseMode::Sensitive)]),
                Step::edit("package.json", Vec::new()),
                Step::rename("ios/{old}", "ios/{new}"),
            ],
        )];
        let plan = RenamePlan::build(temp.path(), &targets()[..1], &rules);
        assert_eq!(
            plan.preview().unwrap(),
            vec![Preview::Unchanged, Preview::Skip, Preview::Skip]
        );
    }

    #[test]
    fn test_original_location_handles_merges() {
        let moves = vec![
            (PathBuf::from("/t/ios/meTube"), PathBuf::from("/t/ios/Acme")),
            (
                PathBuf::from("/t/ios/stylish-pack"),
                PathBuf::from("/t/ios/Acme"),
            ),
        ];
        let candidates = original_location(Path::new("/t/ios/Acme/Info.plist"), &moves);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/t/ios/Acme/Info.plist"),
                PathBuf::from("/t/ios/meTube/Info.plist"),
                PathBuf::from("/t/ios/stylish-pack/Info.plist"),
            ]
        );
        assert!(original_location(Path::new("/t/ios/meTube/Info.plist"), &moves).is_empty());
    }
}
