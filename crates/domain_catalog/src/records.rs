//! Flattened persisted shape of the product aggregate
//!
//! Records carry catalog values as plain names and the taxonomy flattened
//! into the specification. Loading a record rebuilds the aggregate through
//! the same checks the domain applies, so a stored graph that breaks an
//! invariant is rejected with every reason at once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{check_rules, BusinessRule, ProductId, SpecificationId, TaxonomyId, VersionProductId};

use crate::catalogs::{LifeCycleStatus, ProductType};
use crate::error::CatalogError;
use crate::product::Product;
use crate::resource::Resource;
use crate::specification::ProductSpecification;
use crate::taxonomy::Taxonomy;
use crate::version::{VersionNumber, VersionProduct};

/// Stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub product_type: String,
    pub status: String,
    /// Highest number ever assigned; 0 when no version was ever published
    pub last_version_number: u32,
    pub versions: Vec<VersionRecord>,
}

/// Stored version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub id: VersionProductId,
    pub product_id: ProductId,
    pub name: String,
    pub number: i64,
    pub is_obsolete: bool,
    pub specification: Option<SpecificationRecord>,
}

/// Stored specification with its taxonomy flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationRecord {
    pub id: SpecificationId,
    pub version_id: VersionProductId,
    pub price: Decimal,
    pub amount: i64,
    pub value: Decimal,
    pub taxonomy_id: TaxonomyId,
    pub category: String,
    pub generation: String,
    pub kind: String,
    pub resources: Vec<ResourceRecord>,
}

/// Stored resource, keyed by (specification id, key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub specification_id: SpecificationId,
    pub key: String,
    pub value: String,
}

impl Product {
    /// Flattens the aggregate into its persisted shape
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id(),
            product_type: self.product_type().name().to_string(),
            status: self.status().name().to_string(),
            last_version_number: self.last_version_number().map_or(0, VersionNumber::get),
            versions: self
                .versions()
                .iter()
                .map(|version| version_record(self.id(), version))
                .collect(),
        }
    }

    /// Rebuilds the aggregate from its persisted shape
    ///
    /// # Errors
    ///
    /// Unknown catalog names, invalid names, prices, amounts or resources,
    /// illegal taxonomies, out-of-order or repeated version numbers, more
    /// than one active version and a status that disagrees with the versions
    /// are all reported together.
    pub fn from_record(record: ProductRecord) -> Result<Self, CatalogError> {
        let mut errors = Vec::new();
        let mut versions = Vec::with_capacity(record.versions.len());
        for version in record.versions {
            match restore_version(version) {
                Ok(version) => versions.push(version),
                Err(error) => errors.push(error),
            }
        }

        let last_version_number = match record.last_version_number {
            0 => Ok(None),
            n => VersionNumber::try_from(n).map(Some),
        };

        let (product_type, status, last_version_number) = match (
            ProductType::parse(&record.product_type),
            LifeCycleStatus::parse(&record.status),
            last_version_number,
        ) {
            (Ok(product_type), Ok(status), Ok(last)) if errors.is_empty() => (product_type, status, last),
            (product_type, status, last) => {
                errors.extend([product_type.err(), status.err(), last.err()].into_iter().flatten());
                return Err(CatalogError::collect(errors).unwrap_or(CatalogError::Several(Vec::new())));
            }
        };

        check_graph(status, &versions, last_version_number)?;

        Ok(Product::restore(record.id, product_type, status, versions, last_version_number))
    }
}

fn version_record(product_id: ProductId, version: &VersionProduct) -> VersionRecord {
    VersionRecord {
        id: version.id(),
        product_id,
        name: version.name().as_str().to_string(),
        number: i64::from(version.number().get()),
        is_obsolete: version.is_obsolete(),
        specification: version
            .specification()
            .map(|spec| specification_record(version.id(), spec)),
    }
}

fn specification_record(version_id: VersionProductId, spec: &ProductSpecification) -> SpecificationRecord {
    let taxonomy = spec.taxonomy();
    SpecificationRecord {
        id: spec.id(),
        version_id,
        price: spec.price(),
        amount: i64::from(spec.amount()),
        value: spec.value(),
        taxonomy_id: taxonomy.id(),
        category: taxonomy.category().name().to_string(),
        generation: taxonomy.generation().name().to_string(),
        kind: taxonomy.kind().name().to_string(),
        resources: spec
            .resources()
            .iter()
            .map(|resource| ResourceRecord {
                specification_id: spec.id(),
                key: resource.key().to_string(),
                value: resource.value().to_string(),
            })
            .collect(),
    }
}

fn restore_version(record: VersionRecord) -> Result<VersionProduct, CatalogError> {
    let number = VersionNumber::try_from(record.number);
    let specification = record.specification.map(restore_specification).transpose();

    match (number, specification) {
        (Ok(number), Ok(specification)) => {
            VersionProduct::restore(record.id, &record.name, number, record.is_obsolete, specification)
        }
        (number, specification) => {
            let errors = [number.err(), specification.err()].into_iter().flatten().collect();
            Err(CatalogError::collect(errors).unwrap_or(CatalogError::Several(Vec::new())))
        }
    }
}

fn restore_specification(record: SpecificationRecord) -> Result<ProductSpecification, CatalogError> {
    let mut errors = Vec::new();
    let mut resources = Vec::with_capacity(record.resources.len());
    for resource in record.resources {
        match Resource::new(resource.key, resource.value) {
            Ok(resource) => resources.push(resource),
            Err(error) => errors.push(error),
        }
    }

    let taxonomy = match Taxonomy::restore(record.taxonomy_id, &record.category, &record.generation, &record.kind) {
        Ok(taxonomy) if errors.is_empty() => taxonomy,
        taxonomy => {
            errors.extend(taxonomy.err());
            return Err(CatalogError::collect(errors).unwrap_or(CatalogError::Several(Vec::new())));
        }
    };

    let spec = ProductSpecification::restore(record.id, record.price, record.amount, taxonomy, resources)?;
    check_rules([BusinessRule::new(
        "value_matches_price_and_amount",
        spec.value() != record.value,
        "Stored value does not match price times amount.",
    )])?;
    Ok(spec)
}

fn check_graph(
    status: LifeCycleStatus,
    versions: &[VersionProduct],
    last_version_number: Option<VersionNumber>,
) -> Result<(), CatalogError> {
    let increasing = versions.windows(2).all(|pair| pair[0].number() < pair[1].number());
    let highest = versions.iter().map(VersionProduct::number).max();
    let active = versions.iter().filter(|v| v.is_active()).count();

    check_rules([
        BusinessRule::new(
            "version_numbers_increasing",
            !increasing,
            "Version numbers must be unique and increasing.",
        ),
        BusinessRule::new(
            "version_numbers_assigned",
            highest > last_version_number,
            "Version numbers cannot exceed the last assigned number.",
        ),
        BusinessRule::new("single_active_version", active > 1, "At most one version can be active."),
        BusinessRule::new(
            "status_matches_versions",
            (status == LifeCycleStatus::Active) != (active > 0),
            format!("Status {status} does not match the state of the versions."),
        ),
    ])?;
    Ok(())
}
