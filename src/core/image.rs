use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::validation;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").unwrap());

/// Validate an image name (registry-qualified, without tag).
pub fn validate_name(name: &str) -> Result<&str> {
    let name = validation::require_non_empty(name, "image", "Image name is required")?;
    validation::require_no_whitespace(name, "image")
}

/// Validate a tag against the OCI tag grammar.
pub fn validate_tag<'a>(tag: &'a str, field: &str) -> Result<&'a str> {
    if TAG_PATTERN.is_match(tag) {
        Ok(tag)
    } else {
        Err(Error::validation_invalid_argument(
            field,
            "must match [A-Za-z0-9_][A-Za-z0-9_.-]{0,127}",
            Some(tag.to_string()),
        ))
    }
}

/// A registry-qualified image name plus tag, rendered as `name:tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(name: &str, tag: &str) -> Result<Self> {
        Self::with_field(name, tag, "tag")
    }

    /// Like `new`, but names the CLI field in validation errors (e.g. `process_tag`).
    pub fn with_field(name: &str, tag: &str, field: &str) -> Result<Self> {
        let name = validate_name(name)?;
        let tag = validate_tag(tag, field)?;

        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Same image, different tag.
    pub fn retag(&self, tag: &str, field: &str) -> Result<Self> {
        Self::with_field(&self.name, tag, field)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
