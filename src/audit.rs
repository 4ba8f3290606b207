//! Residual scan after a rename
//!
//! Walks the template looking for text files and path names that still
//! mention a legacy name. Findings are warnings only; the rename itself has
//! already succeeded.

use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::names::{derive_id, package_segment};

/// Directories that hold generated or vendored content
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "Pods",
    "build",
    ".gradle",
    "DerivedData",
];

/// Lockfiles legitimately mention old names until reinstalled
const SKIPPED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "Podfile.lock",
    CONFIG_FILE_NAME,
];

const TEXT_EXTENSIONS: &[&str] = &[
    "json",
    "js",
    "ts",
    "tsx",
    "xml",
    "plist",
    "pbxproj",
    "xcscheme",
    "xcworkspacedata",
    "gradle",
    "kt",
    "java",
    "m",
    "mm",
    "h",
    "swift",
];

/// Larger files are assumed to be assets
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Where a leftover legacy name was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    /// Inside the text of a file
    Content { occurrences: usize },
    /// In the file or folder name itself
    PathName,
}

/// A file or folder that still mentions a legacy name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residual {
    /// Path relative to the template root
    pub path: PathBuf,
    pub name: String,
    pub finding: Finding,
}

/// Scan `root` for mentions of `legacy_names` in file contents and in path
/// names.
///
/// Each name is also matched in its Java package form (`stylishpack` for
/// `stylish-pack`). Forms contained in the new name are ignored, since every
/// mention of the new name would also match them. Matching is
/// case-insensitive so that derived identifiers such as `com.metube` are
/// caught.
pub fn scan(root: &Path, legacy_names: &[String], new_name: &str) -> Result<Vec<Residual>> {
    let new_forms = [
        new_name.to_lowercase(),
        derive_id(new_name),
        package_segment(new_name),
    ];
    let inside_new = |form: &str| new_forms.iter().any(|n| n.contains(form));

    let patterns: Vec<(&str, Regex)> = legacy_names
        .iter()
        .filter(|name| !inside_new(&name.to_lowercase()))
        .map(|name| {
            let mut alternatives = vec![regex::escape(name)];
            let pkg = package_segment(name);
            if !pkg.is_empty() && pkg != name.to_lowercase() && !inside_new(&pkg) {
                alternatives.push(regex::escape(&pkg));
            }
            let pattern = alternatives.join("|");
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map(|re| (name.as_str(), re))
                .map_err(|e| crate::error::RebrandError::InvalidPattern {
                    pattern,
                    reason: e.to_string(),
                })
        })
        .collect::<Result<_>>()?;

    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<DirEntry> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.depth() > 0)
        .collect();

    // Sort for deterministic output
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut residuals = Vec::new();
    for entry in entries {
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        let file_name = entry.file_name().to_string_lossy();
        for (name, re) in &patterns {
            if re.is_match(&file_name) {
                residuals.push(Residual {
                    path: relative.clone(),
                    name: (*name).to_string(),
                    finding: Finding::PathName,
                });
            }
        }

        if !entry.file_type().is_file() || !is_text_candidate(&entry) {
            continue;
        }
        // Binary or unreadable files are not worth failing the run over
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        for (name, re) in &patterns {
            let occurrences = re.find_iter(&content).count();
            if occurrences > 0 {
                residuals.push(Residual {
                    path: relative.clone(),
                    name: (*name).to_string(),
                    finding: Finding::Content { occurrences },
                });
            }
        }
    }

    Ok(residuals)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|d| entry.file_name().to_string_lossy() == *d)
}

fn is_text_candidate(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if SKIPPED_FILES.iter().any(|f| name == *f) {
        return false;
    }
    if entry.metadata().map(|m| m.len() > MAX_FILE_SIZE).unwrap_or(true) {
        return false;
    }
    if name == "Podfile" {
        return true;
    }
    entry
        .path()
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            TEXT_EXTENSIONS.iter().any(|t| ext == *t)
        })
        .unwrap_or(false)
}
