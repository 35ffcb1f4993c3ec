//! Key/value attribute attached to a specification

use std::fmt;

use serde::Serialize;

use core_kernel::{check_rules, BusinessRule};

use crate::error::CatalogError;

/// Immutable key/value attribute of a specification
///
/// Resources have no identity and deliberately no equality: two resources
/// built from the same key and value are still distinct attachments. Compare
/// keys with [`Resource::has_key`].
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    key: String,
    value: String,
}

impl Resource {
    /// Creates a resource
    ///
    /// # Errors
    ///
    /// Both a blank key and an empty value are reported when both apply.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, CatalogError> {
        let key = key.into();
        let value = value.into();

        check_rules([
            BusinessRule::new(
                "resource_key_not_blank",
                key.trim().is_empty(),
                "Resource key cannot be null or whitespace.",
            ),
            BusinessRule::new(
                "resource_value_not_empty",
                value.is_empty(),
                "Resource value cannot be empty.",
            ),
        ])?;

        Ok(Self { key, value })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Compares keys case-insensitively
    pub fn has_key(&self, other: &str) -> bool {
        normalize_key(&self.key) == normalize_key(other)
    }

    /// Returns the key and value as owned strings
    pub fn to_pair(&self) -> (String, String) {
        (self.key.clone(), self.value.clone())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Value: {}", self.key, self.value)
    }
}

/// Canonical form used for key uniqueness
pub(crate) fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}
