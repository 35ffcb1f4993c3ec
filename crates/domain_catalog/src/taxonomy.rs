//! Taxonomy of a product specification
//!
//! A taxonomy is the triple (category, generation, kind) describing what a
//! specification is. It is immutable once created and always satisfies the
//! category → kind table of the constraint engine.

use serde::Serialize;

use core_kernel::TaxonomyId;

use crate::catalogs::{GenerationRecord, Kind, ProductCategory};
use crate::constraints;
use crate::error::CatalogError;

/// Classification of a specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    id: TaxonomyId,
    category: ProductCategory,
    generation: GenerationRecord,
    kind: Kind,
}

impl Taxonomy {
    /// Creates a taxonomy after checking the kind against the category
    ///
    /// # Errors
    ///
    /// Returns a broken `kind_allowed_for_category` rule when the kind is not
    /// allowed within the category
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_catalog::{Taxonomy, ProductCategory, GenerationRecord, Kind};
    ///
    /// assert!(Taxonomy::create(ProductCategory::VirtualMachine, GenerationRecord::G2, Kind::Amd).is_ok());
    /// assert!(Taxonomy::create(ProductCategory::Database, GenerationRecord::G2, Kind::Amd).is_err());
    /// ```
    pub fn create(
        category: ProductCategory,
        generation: GenerationRecord,
        kind: Kind,
    ) -> Result<Self, CatalogError> {
        constraints::is_category_allowed_for_kind(category, kind)?;
        Ok(Self {
            id: TaxonomyId::new_v7(),
            category,
            generation,
            kind,
        })
    }

    /// Creates a taxonomy from raw names
    ///
    /// Every unparseable name is reported, not only the first.
    pub fn from_names(category: &str, generation: &str, kind: &str) -> Result<Self, CatalogError> {
        let (category, generation, kind) = parse_names(category, generation, kind)?;
        Self::create(category, generation, kind)
    }

    /// Rebuilds a stored taxonomy from its flattened names, re-checking the kind table
    pub(crate) fn restore(id: TaxonomyId, category: &str, generation: &str, kind: &str) -> Result<Self, CatalogError> {
        let (category, generation, kind) = parse_names(category, generation, kind)?;
        constraints::is_category_allowed_for_kind(category, kind)?;
        Ok(Self {
            id,
            category,
            generation,
            kind,
        })
    }

    pub fn id(&self) -> TaxonomyId {
        self.id
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn generation(&self) -> GenerationRecord {
        self.generation
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the kinds allowed for a category
    pub fn allowed_kinds(category: ProductCategory) -> &'static [Kind] {
        constraints::allowed_kinds(category)
    }

    /// Returns the names of the kinds allowed for a category
    pub fn allowed_kind_names(category: ProductCategory) -> Vec<&'static str> {
        constraints::allowed_kinds(category).iter().map(Kind::name).collect()
    }
}

fn parse_names(
    category: &str,
    generation: &str,
    kind: &str,
) -> Result<(ProductCategory, GenerationRecord, Kind), CatalogError> {
    match (
        ProductCategory::parse(category),
        GenerationRecord::parse(generation),
        Kind::parse(kind),
    ) {
        (Ok(category), Ok(generation), Ok(kind)) => Ok((category, generation, kind)),
        (category, generation, kind) => {
            let errors = [category.err(), generation.err(), kind.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(CatalogError::collect(errors).unwrap_or(CatalogError::EmptyValue { catalog: Kind::LABEL }))
        }
    }
}
