//! Product specification
//!
//! A specification carries the commercial data of a version: unit price,
//! quantity, the derived total value, its [`Taxonomy`] and a set of
//! [`Resource`]s whose keys are unique case-insensitively.
//!
//! # Invariants
//!
//! - Price and amount are strictly positive
//! - Value always equals price × amount
//! - No two resources share a key (ignoring case)
//! - Every mutation either applies completely or leaves the set unchanged

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{check_rules, BusinessRule, SpecificationId};

use crate::catalogs::{Kind, ProductCategory, ProductType};
use crate::constraints;
use crate::error::CatalogError;
use crate::resource::{normalize_key, Resource};
use crate::taxonomy::Taxonomy;

/// Rule name reported when a resource key is already present
pub const RESOURCE_KEY_UNIQUE: &str = "resource_key_unique";

/// Rule name reported when a resource key to remove is absent
pub const RESOURCE_KEY_PRESENT: &str = "resource_key_present";

/// Rule name reported when the resource set is empty
pub const RESOURCES_NOT_EMPTY: &str = "resources_not_empty";

/// Rule name reported for a non-positive price
pub const PRICE_POSITIVE: &str = "price_positive";

/// Rule name reported for a non-positive amount
pub const AMOUNT_POSITIVE: &str = "amount_positive";

/// Specification of a product version
#[derive(Debug, Clone, Serialize)]
pub struct ProductSpecification {
    id: SpecificationId,
    price: Decimal,
    amount: u32,
    value: Decimal,
    taxonomy: Taxonomy,
    resources: Vec<Resource>,
    #[serde(skip)]
    keys: HashSet<String>,
}

impl ProductSpecification {
    /// Generates a specification without resources
    ///
    /// # Arguments
    ///
    /// * `price` - Unit price, must be greater than zero
    /// * `taxonomy` - Classification of the specification
    /// * `amount` - Quantity, must be greater than zero
    ///
    /// # Errors
    ///
    /// A non-positive price and a non-positive amount are reported together.
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_catalog::{ProductSpecification, Taxonomy, ProductCategory, GenerationRecord, Kind};
    /// use rust_decimal::Decimal;
    ///
    /// let taxonomy = Taxonomy::create(ProductCategory::VirtualMachine, GenerationRecord::G2, Kind::Intel).unwrap();
    /// let spec = ProductSpecification::generate(Decimal::new(10050, 2), taxonomy, 2).unwrap();
    /// assert_eq!(spec.value(), Decimal::new(20100, 2));
    /// ```
    pub fn generate(price: Decimal, taxonomy: Taxonomy, amount: i64) -> Result<Self, CatalogError> {
        check_rules([
            BusinessRule::new(PRICE_POSITIVE, price <= Decimal::ZERO, "Price must be greater than 0."),
            BusinessRule::new(AMOUNT_POSITIVE, amount <= 0, "Amount must be greater than 0."),
            BusinessRule::new(
                "amount_in_range",
                amount > i64::from(u32::MAX),
                "Amount exceeds the supported range.",
            ),
        ])?;

        let amount = u32::try_from(amount)
            .map_err(|_| CatalogError::rule("amount_in_range", "Amount exceeds the supported range."))?;
        let value = compute_value(price, amount)?;

        Ok(Self {
            id: SpecificationId::new_v7(),
            price,
            amount,
            value,
            taxonomy,
            resources: Vec::new(),
            keys: HashSet::new(),
        })
    }

    /// Generates a specification and attaches the initial resources in order
    ///
    /// # Errors
    ///
    /// Fails as a whole if any initial resource is invalid or repeats a key.
    pub fn generate_with_resources<I, K, V>(
        price: Decimal,
        taxonomy: Taxonomy,
        amount: i64,
        resources: I,
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut spec = Self::generate(price, taxonomy, amount)?;
        for (key, value) in resources {
            spec.add_resource(key, value)?;
        }
        Ok(spec)
    }

    /// Rebuilds a stored specification, re-checking every invariant
    pub(crate) fn restore(
        id: SpecificationId,
        price: Decimal,
        amount: i64,
        taxonomy: Taxonomy,
        resources: Vec<Resource>,
    ) -> Result<Self, CatalogError> {
        let mut spec = Self::generate(price, taxonomy, amount)?;
        spec.id = id;
        spec.add_resources(resources)?;
        Ok(spec)
    }

    pub fn id(&self) -> SpecificationId {
        self.id
    }

    /// Returns the unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the quantity
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Returns price × amount
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Returns a read-only view of the resources in insertion order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns owned key/value pairs in insertion order
    pub fn resource_pairs(&self) -> Vec<(String, String)> {
        self.resources.iter().map(Resource::to_pair).collect()
    }

    /// Returns the number of attached resources
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Finds a resource by key, ignoring case
    pub fn resource(&self, key: &str) -> Option<&Resource> {
        if !self.keys.contains(&normalize_key(key)) {
            return None;
        }
        self.resources.iter().find(|r| r.has_key(key))
    }

    /// Returns the value of the resource with the given key
    pub fn resource_value(&self, key: &str) -> Option<&str> {
        self.resource(key).map(Resource::value)
    }

    /// Returns true if a resource with the key exists, ignoring case
    pub fn contains_resource(&self, key: &str) -> bool {
        self.keys.contains(&normalize_key(key))
    }

    /// Adds a resource built from a key and value
    ///
    /// # Errors
    ///
    /// Fails if a resource with the same key (ignoring case) already exists,
    /// or if the key or value is invalid.
    pub fn add_resource(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), CatalogError> {
        let key = key.into();
        check_rules([self.key_unique_rule(&key)])?;
        let resource = Resource::new(key, value)?;
        self.push(resource);
        Ok(())
    }

    /// Adds an already-built resource
    pub fn add_resource_entry(&mut self, resource: Resource) -> Result<(), CatalogError> {
        check_rules([self.key_unique_rule(resource.key())])?;
        self.push(resource);
        Ok(())
    }

    /// Adds a batch of resources
    ///
    /// # Errors
    ///
    /// Fails without adding anything if any incoming key collides with an
    /// existing key or with another key of the batch.
    pub fn add_resources(&mut self, resources: Vec<Resource>) -> Result<(), CatalogError> {
        let mut incoming = HashSet::with_capacity(resources.len());
        let mut repeated_in_batch = false;
        let mut collides = false;
        for resource in &resources {
            let key = normalize_key(resource.key());
            collides |= self.keys.contains(&key);
            repeated_in_batch |= !incoming.insert(key);
        }

        check_rules([
            BusinessRule::new(
                RESOURCE_KEY_UNIQUE,
                collides,
                "One or more resources already exist in the list.",
            ),
            BusinessRule::new(
                "batch_keys_distinct",
                repeated_in_batch,
                "Resources to add must have distinct keys.",
            ),
        ])?;

        self.keys.extend(incoming);
        self.resources.extend(resources);
        Ok(())
    }

    /// Removes the resource with the given key
    ///
    /// # Errors
    ///
    /// Fails if the set is empty or no resource has the key.
    pub fn remove_resource(&mut self, key: &str) -> Result<Resource, CatalogError> {
        check_rules(self.removal_rules(key))?;
        let normalized = normalize_key(key);
        let position = self
            .resources
            .iter()
            .position(|r| normalize_key(r.key()) == normalized)
            .ok_or_else(|| CatalogError::ResourceNotFound(key.to_string()))?;
        self.keys.remove(&normalized);
        Ok(self.resources.remove(position))
    }

    /// Removes the resource whose key matches the given resource
    pub fn remove_resource_entry(&mut self, resource: &Resource) -> Result<Resource, CatalogError> {
        self.remove_resource(resource.key())
    }

    /// Removes every resource
    ///
    /// # Errors
    ///
    /// Fails if the set is already empty.
    pub fn remove_all_resources(&mut self) -> Result<(), CatalogError> {
        check_rules([self.not_empty_rule()])?;
        self.resources.clear();
        self.keys.clear();
        Ok(())
    }

    /// Returns the categories allowed for a product type
    pub fn allowed_categories(product_type: ProductType) -> &'static [ProductCategory] {
        constraints::allowed_categories(product_type)
    }

    /// Returns the names of every kind reachable from a product type
    pub fn allowed_kind_names(product_type: ProductType) -> Vec<&'static str> {
        constraints::allowed_categories(product_type)
            .iter()
            .flat_map(|category| constraints::allowed_kinds(*category))
            .map(Kind::name)
            .collect()
    }

    fn push(&mut self, resource: Resource) {
        self.keys.insert(normalize_key(resource.key()));
        self.resources.push(resource);
    }

    fn key_unique_rule(&self, key: &str) -> BusinessRule {
        BusinessRule::new(
            RESOURCE_KEY_UNIQUE,
            self.contains_resource(key),
            format!("Resource with key '{key}' already exists."),
        )
    }

    fn not_empty_rule(&self) -> BusinessRule {
        BusinessRule::new(RESOURCES_NOT_EMPTY, self.resources.is_empty(), "Resources don't exist.")
    }

    fn removal_rules(&self, key: &str) -> [BusinessRule; 2] {
        [
            self.not_empty_rule(),
            BusinessRule::new(
                RESOURCE_KEY_PRESENT,
                !self.resources.is_empty() && !self.contains_resource(key),
                format!("Resource with key '{key}' doesn't exist."),
            ),
        ]
    }
}

fn compute_value(price: Decimal, amount: u32) -> Result<Decimal, CatalogError> {
    price
        .checked_mul(Decimal::from(amount))
        .ok_or_else(|| CatalogError::rule("value_in_range", "Value of product exceeds the supported range."))
}
