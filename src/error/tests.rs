//! Error type tests
//!
//! Tests for RebrandError messages, codes and constructors.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use crate::error::RebrandError;
use crate::error::config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
};
use crate::error::fs::{io_error, read_failed, rename_conflict, rename_failed, write_failed};
use crate::error::names::invalid as invalid_name;
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_code() {
    let err = RebrandError::NameUnresolved;
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("rebrand::names::unresolved".to_string())
    );
}

#[test]
fn test_name_unresolved_has_help() {
    let err = RebrandError::NameUnresolved;
    let help = err.help().map(|h| h.to_string()).unwrap();
    assert!(help.contains("rebrand MyApp"));
}

test_error_contains!(
    test_name_unresolved_message,
    RebrandError::NameUnresolved,
    "No app name could be resolved"
);

test_error_contains!(
    test_invalid_name_message,
    invalid_name("ios/App", "contains a path separator"),
    "Invalid app name 'ios/App'",
    "path separator"
);

test_error_contains!(
    test_config_not_found_message,
    config_not_found("/tmp/rebrand.yaml"),
    "Configuration file not found",
    "/tmp/rebrand.yaml"
);

test_error_contains!(
    test_config_parse_failed_message,
    config_parse_failed("rebrand.yaml", "bad indent"),
    "Failed to parse configuration file",
    "bad indent"
);

test_error_contains!(
    test_config_invalid_message,
    config_invalid("legacy name must not be empty"),
    "Invalid configuration"
);

#[test]
fn test_fs_constructors() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let path = Path::new("ios/Info.plist");

    assert!(matches!(
        read_failed(path, &io),
        RebrandError::FileReadFailed { .. }
    ));
    assert!(matches!(
        write_failed(path, &io),
        RebrandError::FileWriteFailed { .. }
    ));

    let err = rename_failed(Path::new("ios/meTube"), Path::new("ios/Acme"), &io);
    assert!(err.to_string().contains("ios/meTube -> ios/Acme"));
    assert!(err.to_string().contains("denied"));

    let err = rename_conflict(Path::new("a.xcscheme"), Path::new("b.xcscheme"));
    assert!(matches!(err, RebrandError::RenameConflict { .. }));
    assert!(err.to_string().contains("target already exists"));

    assert!(io_error("boom").to_string().contains("IO error: boom"));
}
