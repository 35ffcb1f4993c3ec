//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating catalog data that respects
//! the domain invariants, and random operation sequences for the aggregate.

use domain_catalog::{
    GenerationRecord, Kind, Product, ProductCategory, ProductType, Taxonomy,
};
use fake::faker::lorem::en::Word;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for product types
pub fn product_type_strategy() -> impl Strategy<Value = ProductType> {
    prop::sample::select(ProductType::ALL)
}

/// Strategy for generations
pub fn generation_strategy() -> impl Strategy<Value = GenerationRecord> {
    prop::sample::select(GenerationRecord::ALL)
}

/// Strategy for (category, kind) pairs allowed by the constraint engine
pub fn allowed_pair_strategy() -> impl Strategy<Value = (ProductCategory, Kind)> {
    let pairs: Vec<(ProductCategory, Kind)> = ProductCategory::ALL
        .iter()
        .flat_map(|category| Taxonomy::allowed_kinds(*category).iter().map(move |kind| (*category, *kind)))
        .collect();
    prop::sample::select(pairs)
}

/// Strategy for legal taxonomies
pub fn allowed_taxonomy_strategy() -> impl Strategy<Value = Taxonomy> {
    (allowed_pair_strategy(), generation_strategy()).prop_filter_map(
        "taxonomy must be legal",
        |((category, kind), generation)| Taxonomy::create(category, generation, kind).ok(),
    )
}

/// Strategy for valid version names (3 to 30 characters)
pub fn version_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .-]{1,27}[A-Za-z0-9]"
}

/// Strategy for positive prices with up to four decimal places
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64, 0u32..4u32).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// One step applied to a product by property tests
#[derive(Debug, Clone)]
pub enum ProductOperation {
    Publish(String),
    Activate(u32),
    DeactivateCurrent,
    Delete(u32),
    Archive,
    Draft,
}

impl ProductOperation {
    /// Applies the operation, ignoring rule violations
    ///
    /// Returns true if the operation succeeded.
    pub fn apply(&self, product: &mut Product) -> bool {
        let result = match self {
            ProductOperation::Publish(name) => product.publish_new_version(name, None).map(|_| ()),
            ProductOperation::Activate(number) => product.activate_another_version(*number),
            ProductOperation::DeactivateCurrent => product.deactivate_current_version(),
            ProductOperation::Delete(number) => product.delete_version(*number),
            ProductOperation::Archive => product.deactivate_product(),
            ProductOperation::Draft => product.product_as_draft(),
        };
        result.is_ok()
    }
}

/// Strategy for aggregate operations, weighted towards publishing
pub fn operation_strategy() -> impl Strategy<Value = ProductOperation> {
    prop_oneof![
        3 => version_name_strategy().prop_map(ProductOperation::Publish),
        2 => (0u32..10).prop_map(ProductOperation::Activate),
        1 => Just(ProductOperation::DeactivateCurrent),
        1 => (0u32..10).prop_map(ProductOperation::Delete),
        1 => Just(ProductOperation::Archive),
        1 => Just(ProductOperation::Draft),
    ]
}

/// Random readable version name
pub fn random_version_name() -> String {
    let word: String = Word().fake();
    format!("Release {word}").chars().take(30).collect()
}
