//! Test Data Builders
//!
//! Builder patterns for constructing catalog data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use domain_catalog::{
    CatalogError, GenerationRecord, Kind, Product, ProductCategory, ProductSpecification, ProductType,
    Taxonomy,
};
use rust_decimal::Decimal;

use crate::fixtures::standard_price;

/// Builder for specifications
#[derive(Debug, Clone)]
pub struct SpecificationBuilder {
    price: Decimal,
    amount: i64,
    category: ProductCategory,
    generation: GenerationRecord,
    kind: Kind,
    resources: Vec<(String, String)>,
}

impl Default for SpecificationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecificationBuilder {
    /// Creates a builder for a single-unit virtual machine specification
    pub fn new() -> Self {
        Self {
            price: standard_price(),
            amount: 1,
            category: ProductCategory::VirtualMachine,
            generation: GenerationRecord::G2,
            kind: Kind::Intel,
            resources: Vec::new(),
        }
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    /// Sets category and kind together
    pub fn taxonomy(mut self, category: ProductCategory, kind: Kind) -> Self {
        self.category = category;
        self.kind = kind;
        self
    }

    pub fn generation(mut self, generation: GenerationRecord) -> Self {
        self.generation = generation;
        self
    }

    /// Appends a resource
    pub fn resource(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.resources.push((key.into(), value.into()));
        self
    }

    /// Builds the specification
    pub fn build(self) -> Result<ProductSpecification, CatalogError> {
        let taxonomy = Taxonomy::create(self.category, self.generation, self.kind)?;
        ProductSpecification::generate_with_resources(self.price, taxonomy, self.amount, self.resources)
    }
}

/// Builder for products with published versions
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product_type: ProductType,
    versions: Vec<(String, Option<SpecificationBuilder>)>,
    active: Option<u32>,
    archived: bool,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates a builder for a Software product without versions
    pub fn new() -> Self {
        Self {
            product_type: ProductType::Software,
            versions: Vec::new(),
            active: None,
            archived: false,
        }
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Publishes a version without a specification
    pub fn version(mut self, name: impl Into<String>) -> Self {
        self.versions.push((name.into(), None));
        self
    }

    /// Publishes a version with a specification
    pub fn version_with_spec(mut self, name: impl Into<String>, spec: SpecificationBuilder) -> Self {
        self.versions.push((name.into(), Some(spec)));
        self
    }

    /// Re-activates the given version after publishing
    pub fn active_version(mut self, number: u32) -> Self {
        self.active = Some(number);
        self
    }

    /// Obsoletes every version and archives the product
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Builds the product, draining the events recorded while building
    pub fn build(self) -> Result<Product, CatalogError> {
        let mut product = Product::new(self.product_type);
        for (name, spec) in self.versions {
            let spec = spec.map(SpecificationBuilder::build).transpose()?;
            product.publish_new_version(&name, spec)?;
        }
        if let Some(number) = self.active {
            product.activate_another_version(number)?;
        }
        if self.archived {
            if product.version_count() > 0 {
                product.deactivate_current_version()?;
            }
            product.deactivate_product()?;
        }
        product.take_events();
        Ok(product)
    }
}
