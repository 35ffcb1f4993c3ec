//! Pre-built Test Fixtures
//!
//! Ready-to-use catalog data. Every fixture is valid by construction and
//! panics if it is not, since a broken fixture is a bug in the test suite.

use domain_catalog::{
    GenerationRecord, Kind, Product, ProductCategory, ProductSpecification, ProductType, Taxonomy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Virtual machine taxonomy (VirtualMachine / G2 / Amd)
pub fn vm_taxonomy() -> Taxonomy {
    Taxonomy::create(ProductCategory::VirtualMachine, GenerationRecord::G2, Kind::Amd)
        .expect("VirtualMachine/Amd is a legal taxonomy")
}

/// Database taxonomy (Database / G3 / MicrosoftStd)
pub fn database_taxonomy() -> Taxonomy {
    Taxonomy::create(ProductCategory::Database, GenerationRecord::G3, Kind::MicrosoftStd)
        .expect("Database/MicrosoftStd is a legal taxonomy")
}

/// Service taxonomy (Service / G1 / Backup)
pub fn service_taxonomy() -> Taxonomy {
    Taxonomy::create(ProductCategory::Service, GenerationRecord::G1, Kind::Backup)
        .expect("Service/Backup is a legal taxonomy")
}

/// Standard unit price used by the fixtures
pub fn standard_price() -> Decimal {
    dec!(100.50)
}

/// Virtual machine specification without resources
pub fn vm_spec() -> ProductSpecification {
    ProductSpecification::generate(standard_price(), vm_taxonomy(), 1)
        .expect("fixture specification is valid")
}

/// Database specification without resources
pub fn database_spec() -> ProductSpecification {
    ProductSpecification::generate(standard_price(), database_taxonomy(), 1)
        .expect("fixture specification is valid")
}

/// Virtual machine specification carrying `count` resources keyed `key-0..`
pub fn spec_with_resources(count: usize) -> ProductSpecification {
    ProductSpecification::generate_with_resources(
        standard_price(),
        vm_taxonomy(),
        1,
        (0..count).map(|i| (format!("key-{i}"), format!("value-{i}"))),
    )
    .expect("fixture resources have distinct keys")
}

/// Software product with `count` published versions; the last one is active
///
/// Events recorded while building are drained.
pub fn product_with_versions(count: usize) -> Product {
    let mut product = Product::new(ProductType::Software);
    for i in 1..=count {
        product
            .publish_new_version(&format!("Version {i}"), None)
            .expect("fixture version name is valid");
    }
    product.take_events();
    product
}
