//! Input validation primitives.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(trimmed)
    }
}

/// Reject values containing any whitespace.
pub fn require_no_whitespace<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.chars().any(char::is_whitespace) {
        Err(Error::validation_invalid_argument(
            field,
            "must not contain whitespace",
            Some(value.to_string()),
        ))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_empty_trims_whitespace() {
        assert_eq!(require_non_empty("  app  ", "image", "msg").unwrap(), "app");
    }

    #[test]
    fn require_non_empty_rejects_blank() {
        let err = require_non_empty("   ", "image", "Image name is required").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["problem"], "Image name is required");
    }

    #[test]
    fn require_no_whitespace_rejects_inner_space() {
        assert!(require_no_whitespace("docker.io/app", "image").is_ok());
        let err = require_no_whitespace("docker.io/my app", "image").unwrap_err();
        assert_eq!(err.details["value"], "docker.io/my app");
    }
}
