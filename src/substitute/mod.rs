//! Text substitution engine
//!
//! Rewrites occurrences of an old app name inside a single text file. Each
//! rule carries an ordered list of [`TextTransform`]s; a missing file is
//! skipped, not an error, since template variants ship different platform folders.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, NoExpand, Regex, RegexBuilder};

use crate::error::{RebrandError, Result};
use crate::names::RenameTarget;

/// Case sensitivity of a literal replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

/// One rewrite applied to a file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTransform {
    /// `com.<old id>` -> `com.<new id>`, matched case-insensitively
    Identifier,
    /// `com.<old id>` -> `com.<new package segment>` for Java and Kotlin
    /// sources, whose package declaration must stay a valid identifier
    PackageName,
    /// Every occurrence of the old name
    Literal(CaseMode),
    /// Text node of `<string name="...">` in an Android resource file
    XmlString { name: String },
    /// `<string>` value following `<key>...</key>` in a property list
    PlistValue { key: String },
}

impl TextTransform {
    pub fn xml_string(name: &str) -> Self {
        TextTransform::XmlString {
            name: name.to_string(),
        }
    }

    pub fn plist_value(key: &str) -> Self {
        TextTransform::PlistValue {
            key: key.to_string(),
        }
    }

    /// Apply to `content`, returning the new text and the number of matches
    pub fn apply(&self, content: &str, target: &RenameTarget) -> Result<(String, usize)> {
        match self {
            TextTransform::Identifier => replace_identifiers(
                content,
                vec![
                    (target.old_id(), target.new_id()),
                    (target.old_pkg(), target.new_pkg()),
                ],
            ),
            TextTransform::PackageName => replace_identifiers(
                content,
                vec![
                    (target.old_id(), target.new_pkg()),
                    (target.old_pkg(), target.new_pkg()),
                ],
            ),
            TextTransform::Literal(case) => {
                replace_literal(content, &target.old_name, &target.new_name, *case)
            }
            TextTransform::XmlString { name } => {
                let pattern = format!(
                    r#"(<string\s+name="{}"\s*>)[^<]*(</string>)"#,
                    regex::escape(name)
                );
                replace_first_tagged(content, &pattern, |caps| {
                    format!("{}{}{}", &caps[1], escape_xml(&target.new_name), &caps[2])
                })
            }
            TextTransform::PlistValue { key } => {
                let pattern = format!(
                    r"<key>{}</key>\s*<string>[^<]*</string>",
                    regex::escape(key)
                );
                replace_first_tagged(content, &pattern, |_| {
                    format!(
                        "<key>{key}</key>\n\t<string>{}</string>",
                        escape_xml(&target.new_name)
                    )
                })
            }
        }
    }
}

/// Outcome of [`substitute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteOutcome {
    /// The file does not exist
    Skipped,
    /// The file exists but no transform changed it
    Unchanged,
    Rewritten { replacements: usize },
}

/// A computed, not yet written, content change
#[derive(Debug, Clone)]
pub struct FileEdit {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    pub replacements: usize,
}

impl FileEdit {
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, &self.updated)
            .map_err(|e| crate::error::fs::write_failed(&self.path, &e))
    }
}

/// Result of reading a file and running its transforms
#[derive(Debug, Clone)]
pub enum PreparedEdit {
    Missing,
    Unchanged,
    Changed(FileEdit),
}

/// Read `path` and compute its rewritten content without touching the disk
pub fn prepare_edit(
    path: &Path,
    transforms: &[TextTransform],
    target: &RenameTarget,
) -> Result<PreparedEdit> {
    if !path.is_file() {
        return Ok(PreparedEdit::Missing);
    }

    let original =
        fs::read_to_string(path).map_err(|e| crate::error::fs::read_failed(path, &e))?;

    let mut updated = original.clone();
    let mut replacements = 0;
    for transform in transforms {
        let (next, count) = transform.apply(&updated, target)?;
        updated = next;
        replacements += count;
    }

    if updated == original {
        return Ok(PreparedEdit::Unchanged);
    }

    Ok(PreparedEdit::Changed(FileEdit {
        path: path.to_path_buf(),
        original,
        updated,
        replacements,
    }))
}

/// Rewrite `path` in place. Missing files are skipped.
pub fn substitute(
    path: &Path,
    transforms: &[TextTransform],
    target: &RenameTarget,
) -> Result<SubstituteOutcome> {
    match prepare_edit(path, transforms, target)? {
        PreparedEdit::Missing => Ok(SubstituteOutcome::Skipped),
        PreparedEdit::Unchanged => Ok(SubstituteOutcome::Unchanged),
        PreparedEdit::Changed(edit) => {
            edit.write()?;
            Ok(SubstituteOutcome::Rewritten {
                replacements: edit.replacements,
            })
        }
    }
}

/// Replace every occurrence of `old` with `new`, treating both as plain text
pub fn replace_literal(
    content: &str,
    old: &str,
    new: &str,
    case: CaseMode,
) -> Result<(String, usize)> {
    if old.is_empty() {
        return Ok((content.to_string(), 0));
    }

    let re = build_pattern(&regex::escape(old), case == CaseMode::Insensitive)?;
    let count = re.find_iter(content).count();
    if count == 0 {
        return Ok((content.to_string(), 0));
    }
    Ok((re.replace_all(content, NoExpand(new)).into_owned(), count))
}

/// Rewrite reverse-domain identifiers. The derived id and the package segment
/// differ for names with punctuation (`com.stylish-pack` vs `com.stylishpack`),
/// so both old forms are migrated. Forms with a repeated old value are dropped.
fn replace_identifiers(
    content: &str,
    mut forms: Vec<(String, String)>,
) -> Result<(String, usize)> {
    forms.dedup_by(|later, earlier| later.0 == earlier.0);

    let mut updated = content.to_string();
    let mut total = 0;
    for (old, new) in forms {
        if old.is_empty() {
            continue;
        }
        let re = build_pattern(&format!(r"com\.{}", regex::escape(&old)), true)?;
        let count = re.find_iter(&updated).count();
        if count > 0 {
            let replacement = format!("com.{new}");
            updated = re
                .replace_all(&updated, NoExpand(&replacement))
                .into_owned();
            total += count;
        }
    }
    Ok((updated, total))
}

fn replace_first_tagged(
    content: &str,
    pattern: &str,
    replacer: impl Fn(&Captures<'_>) -> String,
) -> Result<(String, usize)> {
    let re = build_pattern(pattern, false)?;
    if !re.is_match(content) {
        return Ok((content.to_string(), 0));
    }
    Ok((re.replacen(content, 1, |caps: &Captures<'_>| replacer(caps)).into_owned(), 1))
}

fn build_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| RebrandError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
