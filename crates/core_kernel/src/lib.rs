//! Core Kernel - Foundational types for the product catalog
//!
//! This crate provides the building blocks shared by the catalog domain and
//! its orchestration layer:
//! - Strongly-typed identifiers for entities
//! - The business rule framework used to state preconditions declaratively
//! - Port abstractions for persistence collaborators

pub mod identifiers;
pub mod rules;
pub mod ports;

pub use identifiers::{ProductId, VersionProductId, SpecificationId, TaxonomyId};
pub use rules::{BusinessRule, BrokenRules, check_rules};
pub use ports::{
    PortError, DomainPort, OperationMetadata, HealthCheckable, HealthCheckResult, AdapterHealth,
};
