//! rebrand.yaml handling

mod common;

use predicates::prelude::*;

#[test]
fn test_config_legacy_names_replace_defaults() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    workspace.copy_fixture_template("stylish-pack");
    workspace.write_file("rebrand.yaml", "legacy_names: [stylish-pack]\n");

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .arg("Acme")
        .assert()
        .success();

    assert!(workspace.file_exists("ios/Acme/LaunchScreen.storyboard"));
    assert!(workspace.file_exists("ios/meTube"));
}

#[test]
fn test_config_extra_files_are_rewritten() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    workspace.write_file("docs/meTube.md", "# METUBE\n\nmeTube is a template.\n");
    workspace.write_file(
        "rebrand.yaml",
        "files:\n  - path: \"docs/{old}.md\"\n  - path: App.tsx\n    case_sensitive: true\n",
    );

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .arg("Acme")
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("docs/meTube.md"),
        "# Acme\n\nAcme is a template.\n"
    );
}

#[test]
fn test_explicit_config_path() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    workspace.write_file("config/custom.yaml", "legacy_names: [devminds]\n");

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .args(["Acme", "--config", "config/custom.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renaming from \"devminds\""));

    // meTube is not in the configured list
    assert!(workspace.file_exists("ios/meTube"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    let before = workspace.snapshot();

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .args(["Acme", "--config", "nope.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));

    assert_eq!(workspace.snapshot(), before);
}

#[test]
fn test_malformed_config_fails_before_changes() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    workspace.write_file("rebrand.yaml", "legacy_names: [unclosed\n");
    let before = workspace.snapshot();

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .arg("Acme")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse configuration file"));

    assert_eq!(workspace.snapshot(), before);
}
