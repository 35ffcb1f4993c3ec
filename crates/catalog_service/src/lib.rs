//! Catalog Service
//!
//! Orchestration boundary of the product catalog: configuration, tracing
//! initialisation, validated requests, and the use cases that load, change
//! and save the Product aggregate through a [`domain_catalog::ProductRepository`].

pub mod config;
pub mod dto;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{CatalogConfig, LogFormat, Page};
pub use error::ServiceError;
pub use service::CatalogService;
pub use telemetry::init_tracing;
