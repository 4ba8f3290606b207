//! Template configuration (rebrand.yaml)
//!
//! Optional. Lists the legacy placeholder names the template may still carry
//! and any extra files to rewrite:
//!
//! ```yaml
//! legacy_names: [meTube, stylish-pack]
//! files:
//!   - path: "docs/{old}.md"
//!     case_sensitive: false
//! ```

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::rules::{ArtifactRule, Step, name_transforms};
use crate::substitute::CaseMode;

/// Config file looked up at the template root
pub const CONFIG_FILE_NAME: &str = "rebrand.yaml";

/// Placeholder names shipped by past template generations, oldest last
pub const DEFAULT_LEGACY_NAMES: &[&str] = &["meTube", "stylish-pack", "devminds", "MyAwesomeApp"];

/// Parsed rebrand.yaml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RebrandConfig {
    #[serde(default = "default_legacy_names")]
    pub legacy_names: Vec<String>,

    /// Extra files to rewrite, after the built-in rules
    #[serde(default)]
    pub files: Vec<FileRuleConfig>,
}

/// An extra file rewrite rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRuleConfig {
    /// Path template relative to the template root
    pub path: String,

    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_legacy_names() -> Vec<String> {
    DEFAULT_LEGACY_NAMES.iter().map(|n| (*n).to_string()).collect()
}

impl Default for RebrandConfig {
    fn default() -> Self {
        Self {
            legacy_names: default_legacy_names(),
            files: Vec::new(),
        }
    }
}

impl RebrandConfig {
    /// Load configuration for `root`.
    ///
    /// An explicit path must exist; the default `<root>/rebrand.yaml` is optional.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let (path, required): (PathBuf, bool) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (root.join(CONFIG_FILE_NAME), false),
        };

        if !path.is_file() {
            if required {
                return Err(crate::error::config::not_found(path.display().to_string()));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| crate::error::fs::read_failed(&path, &e))?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse and validate configuration from YAML string
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| crate::error::config::parse_failed(origin, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.legacy_names.is_empty() {
            return Err(crate::error::config::invalid(
                "legacy_names must list at least one name",
            ));
        }
        if self.legacy_names.iter().any(|n| n.trim().is_empty()) {
            return Err(crate::error::config::invalid(
                "legacy_names must not contain blank names",
            ));
        }
        for rule in &self.files {
            let path = Path::new(&rule.path);
            let escapes = path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if rule.path.trim().is_empty() || escapes {
                return Err(crate::error::config::invalid(format!(
                    "file rule path '{}' must be relative to the template root",
                    rule.path
                )));
            }
        }
        Ok(())
    }

    /// Edit rules contributed by `files`
    pub fn extra_rules(&self) -> Vec<ArtifactRule> {
        self.files
            .iter()
            .map(|rule| {
                let case = if rule.case_sensitive {
                    CaseMode::Sensitive
                } else {
                    CaseMode::Insensitive
                };
                ArtifactRule::new(
                    format!("config: {}", rule.path),
                    vec![Step::edit(&rule.path, name_transforms(case))],
                )
            })
            .collect()
    }
}
