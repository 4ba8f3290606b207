//! File system errors

use std::path::Path;

use super::RebrandError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> RebrandError {
    RebrandError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: &std::io::Error) -> RebrandError {
    RebrandError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a rename failed error
pub fn rename_failed(from: &Path, to: &Path, err: &std::io::Error) -> RebrandError {
    RebrandError::RenameFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a rename conflict error
pub fn rename_conflict(from: &Path, to: &Path) -> RebrandError {
    RebrandError::RenameConflict {
        from: from.display().to_string(),
        to: to.display().to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> RebrandError {
    RebrandError::IoError {
        message: message.into(),
    }
}
