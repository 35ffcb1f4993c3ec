//! Product Catalog Domain
//!
//! This crate models the product catalog:
//!
//! - Closed value catalogs (product type, status, category, generation, kind)
//! - The taxonomy constraint engine deciding legal combinations
//! - Specifications with price, amount and uniquely keyed resources
//! - Versions with an active/obsolete state machine
//! - The Product aggregate root owning the version list and lifecycle status
//!
//! Every rejected operation reports all of its broken rules together and
//! leaves the aggregate unchanged.

pub mod catalogs;
pub mod constraints;
pub mod error;
pub mod events;
pub mod ports;
pub mod product;
pub mod records;
pub mod resource;
pub mod specification;
pub mod taxonomy;
pub mod version;

pub use catalogs::{GenerationRecord, Kind, LifeCycleStatus, ProductCategory, ProductType};
pub use error::CatalogError;
pub use events::ProductEvent;
pub use ports::{ProductQuery, ProductRepository};
pub use product::Product;
pub use records::{ProductRecord, ResourceRecord, SpecificationRecord, VersionRecord};
pub use resource::Resource;
pub use specification::ProductSpecification;
pub use taxonomy::Taxonomy;
pub use version::{VersionName, VersionNumber, VersionProduct};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryProductRepository;
