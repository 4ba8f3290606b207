//! Rename rule table
//!
//! Each [`ArtifactRule`] is an ordered pipeline of edit and rename steps over
//! one template artifact. Paths are templates expanded once per
//! [`RenameTarget`], so the same table serves every legacy name.
//!
//! Placeholders: `{old}`, `{new}`, `{old_id}`, `{new_id}`, `{old_pkg}`, `{new_pkg}`.

use std::path::PathBuf;

use crate::names::RenameTarget;
use crate::substitute::{CaseMode, TextTransform};

/// A `/`-separated path relative to the template root, with placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Expand placeholders for `target`. Expansion is single-pass, so a name
    /// that itself looks like a placeholder is inserted verbatim.
    ///
    /// Returns `None` when a placeholder expands to nothing, e.g. `{old_pkg}`
    /// for a name without any Java identifier characters.
    pub fn expand(&self, target: &RenameTarget) -> Option<PathBuf> {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find('}') else {
                out.push_str(after);
                rest = "";
                break;
            };
            let key = &after[1..close];
            match placeholder(key, target) {
                Some(value) if value.is_empty() => return None,
                Some(value) => out.push_str(&value),
                None => out.push_str(&after[..=close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        Some(out.split('/').filter(|c| !c.is_empty()).collect())
    }
}

fn placeholder(key: &str, target: &RenameTarget) -> Option<String> {
    match key {
        "old" => Some(target.old_name.clone()),
        "new" => Some(target.new_name.clone()),
        "old_id" => Some(target.old_id()),
        "new_id" => Some(target.new_id()),
        "old_pkg" => Some(target.old_pkg()),
        "new_pkg" => Some(target.new_pkg()),
        _ => None,
    }
}

/// One step of an artifact pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Edit {
        path: PathTemplate,
        transforms: Vec<TextTransform>,
    },
    Rename {
        from: PathTemplate,
        to: PathTemplate,
    },
}

impl Step {
    pub fn edit(path: &str, transforms: Vec<TextTransform>) -> Self {
        Step::Edit {
            path: PathTemplate::new(path),
            transforms,
        }
    }

    pub fn rename(from: &str, to: &str) -> Self {
        Step::Rename {
            from: PathTemplate::new(from),
            to: PathTemplate::new(to),
        }
    }
}

/// A named, ordered pipeline over one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRule {
    pub name: String,
    pub steps: Vec<Step>,
}

impl ArtifactRule {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

/// Identifier rewrite followed by a literal rewrite of the given case mode
pub fn name_transforms(case: CaseMode) -> Vec<TextTransform> {
    vec![TextTransform::Identifier, TextTransform::Literal(case)]
}

const JAVA_ROOT: &str = "android/app/src/main/java/com";

/// The built-in rule table for React Native style templates
pub fn default_rules() -> Vec<ArtifactRule> {
    let loose = || name_transforms(CaseMode::Insensitive);
    let strict = || name_transforms(CaseMode::Sensitive);

    // The package declaration must stay a valid Java identifier
    let sources = || {
        vec![
            TextTransform::PackageName,
            TextTransform::Literal(CaseMode::Insensitive),
        ]
    };
    let mut android_sources: Vec<Step> = ["MainActivity", "MainApplication"]
        .iter()
        .flat_map(|class| {
            ["kt", "java"]
                .iter()
                .map(move |ext| format!("{JAVA_ROOT}/{{old_pkg}}/{class}.{ext}"))
        })
        .map(|path| Step::edit(&path, sources()))
        .collect();
    android_sources.push(Step::rename(
        &format!("{JAVA_ROOT}/{{old_pkg}}"),
        &format!("{JAVA_ROOT}/{{new_pkg}}"),
    ));

    let mut strings = loose();
    strings.push(TextTransform::xml_string("app_name"));

    let mut plist = loose();
    plist.push(TextTransform::plist_value("CFBundleDisplayName"));

    vec![
        ArtifactRule::new("package manifest", vec![Step::edit("package.json", loose())]),
        ArtifactRule::new("app manifest", vec![Step::edit("app.json", loose())]),
        ArtifactRule::new(
            "android manifest",
            vec![Step::edit("android/app/src/main/AndroidManifest.xml", loose())],
        ),
        ArtifactRule::new(
            "android strings",
            vec![Step::edit(
                "android/app/src/main/res/values/strings.xml",
                strings,
            )],
        ),
        ArtifactRule::new(
            "android gradle",
            vec![
                Step::edit("android/settings.gradle", loose()),
                Step::edit("android/app/build.gradle", loose()),
            ],
        ),
        ArtifactRule::new("android sources", android_sources),
        ArtifactRule::new(
            "xcode project",
            vec![
                Step::edit("ios/{old}.xcodeproj/project.pbxproj", strict()),
                Step::rename("ios/{old}.xcodeproj", "ios/{new}.xcodeproj"),
            ],
        ),
        ArtifactRule::new(
            "xcode scheme",
            vec![
                Step::rename(
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{old}.xcscheme",
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{new}.xcscheme",
                ),
                Step::edit(
                    "ios/{new}.xcodeproj/xcshareddata/xcschemes/{new}.xcscheme",
                    strict(),
                ),
            ],
        ),
        ArtifactRule::new(
            "ios app",
            vec![
                Step::edit("ios/{old}/Info.plist", plist),
                Step::rename("ios/{old}", "ios/{new}"),
                Step::edit("ios/{new}/AppDelegate.mm", strict()),
                Step::edit("ios/{new}/AppDelegate.swift", strict()),
            ],
        ),
        ArtifactRule::new(
            "ios tests",
            vec![
                Step::rename("ios/{old}Tests", "ios/{new}Tests"),
                Step::edit("ios/{new}Tests/{old}Tests.m", strict()),
                Step::rename("ios/{new}Tests/{old}Tests.m", "ios/{new}Tests/{new}Tests.m"),
            ],
        ),
        ArtifactRule::new(
            "xcode workspace",
            vec![
                Step::rename("ios/{old}.xcworkspace", "ios/{new}.xcworkspace"),
                Step::edit("ios/{new}.xcworkspace/contents.xcworkspacedata", strict()),
            ],
        ),
        ArtifactRule::new("podfile", vec![Step::edit("ios/Podfile", strict())]),
    ]
}
