//! Name resolution errors

use super::RebrandError;

/// Creates an invalid name error
pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> RebrandError {
    RebrandError::InvalidName {
        name: name.into(),
        reason: reason.into(),
    }
}
