//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for persistence collaborators
//! of the catalog domain, following the hexagonal architecture pattern.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Orchestration Layer                      │
//! │                (catalog_service use cases)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │                 (ProductRepository)                          │
//! │   Defined in the domain crate, depend only on core_kernel    │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │ Database Adapter  │     │ In-memory Adapter│
//!         │  (out of scope)   │     │  (tests, demos)  │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! // In domain_catalog/src/ports.rs
//! #[async_trait]
//! pub trait ProductRepository: DomainPort {
//!     async fn get_product(&self, id: ProductId, metadata: Option<OperationMetadata>)
//!         -> Result<Product, PortError>;
//!     async fn save_product(&self, product: &Product, metadata: Option<OperationMetadata>)
//!         -> Result<(), PortError>;
//! }
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Every adapter reports failures through this type, so use cases can tell a
/// missing aggregate from stored data that no longer satisfies the domain.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Stored data could not be mapped back into the domain
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so adapters can be shared across tasks
/// behind an `Arc<dyn ...>`.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Context attached to a port call for tracing
///
/// The catalog service records the use case name under `operation`.
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    pub context: std::collections::HashMap<String, String>,
}

impl OperationMetadata {
    /// Adds context to the metadata
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Returns the recorded use case name, if any
    pub fn operation(&self) -> Option<&str> {
        self.context.get("operation").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Product", "123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Product"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_transformation_is_not_not_found() {
        let error = PortError::transformation("Version numbers are not increasing.");
        assert!(!error.is_not_found());
        assert_eq!(
            error.to_string(),
            "Transformation error: Version numbers are not increasing."
        );
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::default()
            .with_context("operation", "publish_version")
            .with_context("product_id", "PRD-456");

        assert_eq!(metadata.operation(), Some("publish_version"));
        assert_eq!(
            metadata.context.get("product_id"),
            Some(&"PRD-456".to_string())
        );
    }
}
