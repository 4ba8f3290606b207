//! Dry-run tests: the plan is printed, nothing is touched

mod common;

use predicates::prelude::*;

#[test]
fn test_dry_run_does_not_modify_template() {
    let workspace = common::TestWorkspace::from_fixture("metube");
    let before = workspace.snapshot();

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .args(["Acme", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("No changes made"));

    assert_eq!(workspace.snapshot(), before);
}

#[test]
fn test_dry_run_lists_planned_steps() {
    let workspace = common::TestWorkspace::from_fixture("metube");

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .args(["meTube", "Acme", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update package.json"))
        .stdout(predicate::str::contains(
            "Would rename ios/meTube.xcodeproj -> ios/Acme.xcodeproj",
        ))
        // Only reachable once the project folder has been renamed
        .stdout(predicate::str::contains(
            "Would update ios/Acme.xcodeproj/xcshareddata/xcschemes/Acme.xcscheme",
        ));
}

#[test]
fn test_dry_run_does_not_create_missing_folders() {
    let workspace = common::TestWorkspace::new();

    common::rebrand_cmd()
        .current_dir(&workspace.path)
        .args(["Acme", "--dry-run"])
        .assert()
        .success();

    assert!(workspace.snapshot().is_empty());
}
