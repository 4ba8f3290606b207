//! Common test utilities for rebrand integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch template directory for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to template root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new, empty test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a test workspace populated from a fixture template
    #[allow(dead_code)]
    pub fn from_fixture(fixture_name: &str) -> Self {
        let workspace = Self::new();
        workspace.copy_fixture_template(fixture_name);
        workspace
    }

    /// Copy a fixture template over the workspace root
    #[allow(dead_code)]
    pub fn copy_fixture_template(&self, fixture_name: &str) {
        self.copy_fixture_template_into(fixture_name, "");
    }

    /// Copy a fixture template into a subdirectory of the workspace
    #[allow(dead_code)]
    pub fn copy_fixture_template_into(&self, fixture_name: &str, dir: &str) -> PathBuf {
        let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("common")
            .join("fixtures")
            .join("templates")
            .join(fixture_name);

        let target_path = self.path.join(dir);
        copy_dir_recursive(&fixture_path, &target_path).expect("Failed to copy fixture template");
        target_path
    }

    /// Write a file in workspace
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file or directory exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Every root-relative path (files and directories) with its file content
    #[allow(dead_code)]
    pub fn snapshot(&self) -> Vec<(String, Option<String>)> {
        let mut entries: Vec<(String, Option<String>)> = walkdir::WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| {
                let relative = e
                    .path()
                    .strip_prefix(&self.path)
                    .expect("Entry outside workspace")
                    .to_string_lossy()
                    .replace('\\', "/");
                let content = e
                    .file_type()
                    .is_file()
                    .then(|| std::fs::read_to_string(e.path()).unwrap_or_default());
                (relative, content)
            })
            .collect();
        entries.sort();
        entries
    }

    /// Root-relative paths whose name or content mentions `needle`, ignoring case
    #[allow(dead_code)]
    pub fn mentions(&self, needle: &str) -> Vec<String> {
        let needle = needle.to_lowercase();
        self.snapshot()
            .into_iter()
            .filter(|(path, content)| {
                path.to_lowercase().contains(&needle)
                    || content
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .map(|(path, _)| path)
            .collect()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A rebrand command isolated from the developer's environment
#[allow(deprecated, dead_code)]
pub fn rebrand_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rebrand").expect("rebrand binary not built");
    // Always ignore any developer overrides during tests
    cmd.env_remove("INIT_CWD");
    cmd.env_remove("REBRAND_ROOT");
    cmd
}

fn copy_dir_recursive(src: &std::path::Path, dst: &std::path::Path) -> std::io::Result<()> {
    if !dst.exists() {
        std::fs::create_dir_all(dst)?;
    }

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("ios/Podfile", "target 'meTube'");
        assert!(workspace.file_exists("ios/Podfile"));
        assert_eq!(workspace.read_file("ios/Podfile"), "target 'meTube'");
        assert_eq!(workspace.mentions("METUBE"), vec!["ios/Podfile".to_string()]);
    }

    #[test]
    fn test_workspace_from_fixture() {
        let workspace = TestWorkspace::from_fixture("metube");
        assert!(workspace.file_exists("ios/meTube/Info.plist"));
        assert!(workspace.file_exists("android/app/src/main/java/com/metube/MainActivity.java"));
    }
}
