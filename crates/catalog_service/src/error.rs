//! Service error handling

use thiserror::Error;

use core_kernel::PortError;
use domain_catalog::CatalogError;

/// Errors returned by catalog use cases
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Domain(#[from] CatalogError),

    #[error("Persistence error: {0}")]
    Port(#[from] PortError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ServiceError {
    /// Returns true if the product or version does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::Port(error) => error.is_not_found(),
            ServiceError::Domain(CatalogError::VersionNotFound(_) | CatalogError::ResourceNotFound(_)) => true,
            _ => false,
        }
    }

    /// Returns true if the request broke the named business rule
    pub fn is_rule_broken(&self, rule: &str) -> bool {
        matches!(self, ServiceError::Domain(error) if error.is_rule_broken(rule))
    }

    /// Returns every human-readable reason
    pub fn reasons(&self) -> Vec<String> {
        match self {
            ServiceError::Domain(error) => error.reasons(),
            ServiceError::Validation(errors) => {
                let reasons: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errors)| errors.iter().map(move |e| format!("{field}: {}", e.code)))
                    .collect();
                // nested struct errors are not listed per field
                if reasons.is_empty() {
                    vec![errors.to_string()]
                } else {
                    reasons
                }
            }
            other => vec![other.to_string()],
        }
    }
}
