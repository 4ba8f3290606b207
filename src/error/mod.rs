//! Error types and handling for rebrand
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`names`]: Name resolution errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod names;

#[cfg(test)]
mod tests;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rebrand operations
#[derive(Error, Diagnostic, Debug)]
pub enum RebrandError {
    // Name errors
    #[error("No app name could be resolved")]
    #[diagnostic(
        code(rebrand::names::unresolved),
        help(
            "Pass the new name explicitly, e.g. `rebrand MyApp`, or run from a directory named after the app"
        )
    )]
    NameUnresolved,

    #[error("Invalid app name '{name}': {reason}")]
    #[diagnostic(
        code(rebrand::names::invalid),
        help(
            "App names become folder names and a Java package; avoid path separators \
             and '.'/'..', and include at least one ASCII letter or digit"
        )
    )]
    InvalidName { name: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(rebrand::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(rebrand::config::parse_failed),
        help("rebrand.yaml accepts `legacy_names` (list of strings) and `files` (list of {{path, case_sensitive}})")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(rebrand::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(rebrand::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(rebrand::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to rename {from} -> {to}: {reason}")]
    #[diagnostic(code(rebrand::fs::rename_failed))]
    RenameFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Cannot rename {from} -> {to}: target already exists")]
    #[diagnostic(
        code(rebrand::fs::rename_conflict),
        help("A file and a folder map onto the same path; remove one of them and re-run")
    )]
    RenameConflict { from: String, to: String },

    #[error("Invalid substitution pattern '{pattern}': {reason}")]
    #[diagnostic(code(rebrand::substitute::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rebrand::fs::io_error))]
    IoError { message: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RebrandError>;
