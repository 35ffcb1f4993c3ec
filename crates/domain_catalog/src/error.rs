//! Catalog domain errors
//!
//! Every recoverable outcome of the catalog domain is reported through
//! [`CatalogError`]. Expected business violations never panic.

use thiserror::Error;

use core_kernel::BrokenRules;

/// Errors that can occur in the catalog domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A raw name did not resolve to a member of a closed catalog
    #[error("{catalog} '{name}' was not found.")]
    UnknownValue {
        catalog: &'static str,
        name: String,
    },

    /// A raw name was empty or whitespace
    #[error("{catalog} cannot be empty.")]
    EmptyValue {
        catalog: &'static str,
    },

    /// One or more business rules were broken
    #[error("{0}")]
    BrokenRules(#[from] BrokenRules),

    /// A version lookup by number found nothing
    #[error("Version {0} not found")]
    VersionNotFound(u32),

    /// A resource lookup by key found nothing
    #[error("Resource '{0}' not found")]
    ResourceNotFound(String),

    /// A version number outside the range the aggregate ever assigns
    #[error("Invalid version number {0}: version numbers start at 1")]
    InvalidVersionNumber(i64),

    /// Several independent input failures reported together
    #[error("{}", join_reasons(.0))]
    Several(Vec<CatalogError>),
}

impl CatalogError {
    /// Creates an unknown catalog value error
    pub fn unknown(catalog: &'static str, name: impl Into<String>) -> Self {
        CatalogError::UnknownValue {
            catalog,
            name: name.into(),
        }
    }

    /// Creates a failure carrying a single broken rule
    pub fn rule(rule: &'static str, message: impl Into<String>) -> Self {
        CatalogError::BrokenRules(BrokenRules::single(rule, message))
    }

    /// Returns every human-readable reason carried by this error
    pub fn reasons(&self) -> Vec<String> {
        match self {
            CatalogError::BrokenRules(broken) => broken.messages().map(str::to_string).collect(),
            CatalogError::Several(errors) => errors.iter().flat_map(CatalogError::reasons).collect(),
            other => vec![other.to_string()],
        }
    }

    /// Returns true if the named business rule is among the reasons
    pub fn is_rule_broken(&self, rule: &str) -> bool {
        match self {
            CatalogError::BrokenRules(broken) => broken.contains_rule(rule),
            CatalogError::Several(errors) => errors.iter().any(|e| e.is_rule_broken(rule)),
            _ => false,
        }
    }

    /// Folds a list of independent failures into one error
    ///
    /// Returns `None` when the list is empty.
    pub fn collect(mut errors: Vec<CatalogError>) -> Option<CatalogError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(CatalogError::Several(errors)),
        }
    }
}

fn join_reasons(errors: &[CatalogError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
