//! App name resolution and derived identifiers
//!
//! Sources, first available wins:
//! 1. two positional arguments (`OLD NEW`)
//! 2. one positional argument (`NEW`)
//! 3. the final segment of `INIT_CWD`
//! 4. the `name` field of `package.json`
//! 5. the final segment of the current directory
//!
//! Blank values count as unavailable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RebrandError, Result};

/// Environment variable set by npm/yarn to the directory the user invoked from
pub const INIT_CWD_ENV: &str = "INIT_CWD";

/// One old name to migrate to the new name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    pub old_name: String,
    pub new_name: String,
}

impl RenameTarget {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    pub fn old_id(&self) -> String {
        derive_id(&self.old_name)
    }

    pub fn new_id(&self) -> String {
        derive_id(&self.new_name)
    }

    pub fn old_pkg(&self) -> String {
        package_segment(&self.old_name)
    }

    pub fn new_pkg(&self) -> String {
        package_segment(&self.new_name)
    }
}

/// Bundle-identifier form of a name: whitespace removed, lowercased.
///
/// ```ignore
/// assert_eq!(derive_id("My App"), "myapp");
/// ```
pub fn derive_id(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Java package segment of a name: [`derive_id`] restricted to `[a-z0-9_]`.
pub fn package_segment(name: &str) -> String {
    derive_id(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Raw inputs the resolver chooses from
#[derive(Debug, Default, Clone)]
pub struct NameSources {
    /// Positional arguments, at most two
    pub args: Vec<String>,
    /// Explicit old names (`--from`)
    pub from: Vec<String>,
    pub init_cwd: Option<String>,
    pub manifest_name: Option<String>,
    pub cwd: Option<PathBuf>,
}

impl NameSources {
    /// Collect sources from the process environment and the template root
    pub fn gather(args: Vec<String>, from: Vec<String>, root: &Path) -> Self {
        Self {
            args,
            from,
            init_cwd: std::env::var(INIT_CWD_ENV).ok(),
            manifest_name: read_manifest_name(root),
            cwd: std::env::current_dir().ok(),
        }
    }
}

/// The outcome of name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub new_name: String,
    /// Old names given explicitly; `None` means "use the configured legacy list"
    pub old_names: Option<Vec<String>>,
}

impl ResolvedNames {
    /// Expand into one target per distinct old name, dropping names that already
    /// equal the new name.
    pub fn targets(&self, legacy_names: &[String]) -> Vec<RenameTarget> {
        let olds = self.old_names.as_deref().unwrap_or(legacy_names);
        let mut targets: Vec<RenameTarget> = Vec::new();
        for old in olds {
            let old = old.trim();
            if old.is_empty() || old == self.new_name {
                continue;
            }
            if targets.iter().any(|t| t.old_name == old) {
                continue;
            }
            targets.push(RenameTarget::new(old, self.new_name.clone()));
        }
        targets
    }
}

/// Resolve the new name and, when given, the old names
pub fn resolve(sources: &NameSources) -> Result<ResolvedNames> {
    let args: Vec<&str> = sources
        .args
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();

    let (positional_old, positional_new) = match args.as_slice() {
        [old, new, ..] => (Some((*old).to_string()), Some((*new).to_string())),
        [new] => (None, Some((*new).to_string())),
        [] => (None, None),
    };

    let new_name = positional_new
        .or_else(|| sources.init_cwd.as_deref().and_then(last_segment))
        .or_else(|| non_blank(sources.manifest_name.as_deref()))
        .or_else(|| sources.cwd.as_deref().and_then(|p| last_segment(&p.to_string_lossy())))
        .ok_or(RebrandError::NameUnresolved)?;

    validate_new_name(&new_name)?;

    let mut old_names: Vec<String> = sources
        .from
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if let Some(old) = positional_old {
        if !old_names.contains(&old) {
            old_names.insert(0, old);
        }
    }

    Ok(ResolvedNames {
        new_name,
        old_names: (!old_names.is_empty()).then_some(old_names),
    })
}

/// Reject names that cannot be used as a single folder name or that leave
/// nothing for the Android package folder
pub fn validate_new_name(name: &str) -> Result<()> {
    if name.contains('/') || name.contains('\\') {
        return Err(crate::error::names::invalid(
            name,
            "contains a path separator",
        ));
    }
    if name.contains('\0') {
        return Err(crate::error::names::invalid(name, "contains a NUL byte"));
    }
    if name == "." || name == ".." {
        return Err(crate::error::names::invalid(
            name,
            "is a relative path component",
        ));
    }
    if package_segment(name).is_empty() {
        return Err(crate::error::names::invalid(
            name,
            "has no ASCII letters or digits for the Android package",
        ));
    }
    Ok(())
}

#[derive(Deserialize)]
struct PackageManifest {
    name: Option<String>,
}

/// Read the `name` field of `<root>/package.json`. Missing or malformed manifests
/// yield `None`.
pub fn read_manifest_name(root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(root.join("package.json")).ok()?;
    let manifest: PackageManifest = serde_json::from_str(&content).ok()?;
    non_blank(manifest.name.as_deref())
}

fn last_segment(path: &str) -> Option<String> {
    let trimmed = path.trim().trim_end_matches(['/', '\\']);
    let segment = trimmed.rsplit(['/', '\\']).next()?;
    non_blank(Some(segment))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
