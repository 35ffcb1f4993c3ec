//! Product aggregate root
//!
//! The Product owns its versions and is the only way to publish, activate,
//! deactivate or delete them. Every operation states its preconditions as a
//! list of business rules, checks them all before touching any state, and
//! then applies the change in full.
//!
//! # Invariants
//!
//! - At most one version is active at any time
//! - Status is Active exactly when a version is active
//! - Version numbers start at 1, increase with each publish and are never reused
//! - Archived and Draft transitions require every version to be obsolete

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use core_kernel::{check_rules, BusinessRule, ProductId};

use crate::catalogs::{LifeCycleStatus, ProductType};
use crate::constraints;
use crate::error::CatalogError;
use crate::events::ProductEvent;
use crate::specification::ProductSpecification;
use crate::version::{VersionName, VersionNumber, VersionProduct};

/// Rule name reported for a blank version name on publish
pub const VERSION_NAME_NOT_EMPTY: &str = "version_name_not_empty";

/// Rule name reported for a zero version number
pub const NUMBER_POSITIVE: &str = "number_positive";

/// Rule name reported when the product has no versions
pub const HAS_VERSIONS: &str = "has_versions";

/// Rule name reported when the requested version does not exist
pub const VERSION_EXISTS: &str = "version_exists";

/// Rule name reported when some version is still active
pub const ALL_VERSIONS_OBSOLETE: &str = "all_versions_obsolete";

/// Rule name reported when no version is active
pub const HAS_ACTIVE_VERSION: &str = "has_active_version";

/// Rule name reported when changing to the current type
pub const TYPE_MUST_DIFFER: &str = "type_must_differ";

/// Rule name reported when no further version number can be assigned
pub const VERSION_NUMBER_AVAILABLE: &str = "version_number_available";

/// Product aggregate root
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    id: ProductId,
    product_type: ProductType,
    status: LifeCycleStatus,
    versions: Vec<VersionProduct>,
    last_version_number: Option<VersionNumber>,
    #[serde(skip)]
    events: Vec<ProductEvent>,
}

impl Product {
    /// Creates a product in Draft with no versions
    pub fn new(product_type: ProductType) -> Self {
        let id = ProductId::new_v7();
        debug!(product_id = %id, %product_type, "product created");

        Self {
            id,
            product_type,
            status: LifeCycleStatus::Draft,
            versions: Vec::new(),
            last_version_number: None,
            events: vec![ProductEvent::ProductCreated {
                product_id: id,
                product_type,
                timestamp: Utc::now(),
            }],
        }
    }

    /// Creates a product from a raw type name
    ///
    /// # Errors
    ///
    /// Fails when the name does not resolve to a product type.
    pub fn create(product_type: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(ProductType::parse(product_type)?))
    }

    /// Creates a product and publishes its first version
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_catalog::{Product, ProductType, LifeCycleStatus};
    ///
    /// let product = Product::create_with_version(ProductType::Service, "Launch", None).unwrap();
    /// assert_eq!(product.status(), LifeCycleStatus::Active);
    /// assert_eq!(product.current_version().map(|v| v.number().get()), Some(1));
    /// ```
    pub fn create_with_version(
        product_type: ProductType,
        name: &str,
        specification: Option<ProductSpecification>,
    ) -> Result<Self, CatalogError> {
        let mut product = Self::new(product_type);
        product.publish_new_version(name, specification)?;
        Ok(product)
    }

    pub(crate) fn restore(
        id: ProductId,
        product_type: ProductType,
        status: LifeCycleStatus,
        versions: Vec<VersionProduct>,
        last_version_number: Option<VersionNumber>,
    ) -> Self {
        Self {
            id,
            product_type,
            status,
            versions,
            last_version_number,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn status(&self) -> LifeCycleStatus {
        self.status
    }

    /// Returns the versions in publication order
    pub fn versions(&self) -> &[VersionProduct] {
        &self.versions
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Highest number ever assigned, including deleted versions
    pub fn last_version_number(&self) -> Option<VersionNumber> {
        self.last_version_number
    }

    /// Returns true if some version is active
    pub fn any_version_active(&self) -> bool {
        self.versions.iter().any(VersionProduct::is_active)
    }

    /// Returns the active version, if any
    pub fn current_version(&self) -> Option<&VersionProduct> {
        self.versions.iter().find(|v| v.is_active())
    }

    /// Finds a version by number
    ///
    /// # Errors
    ///
    /// Fails when the product has no versions, or with `VersionNotFound`
    /// when the number is unknown.
    pub fn version(&self, number: u32) -> Result<&VersionProduct, CatalogError> {
        check_rules([self.has_versions_rule()])?;
        self.versions
            .iter()
            .find(|v| v.number().get() == number)
            .ok_or(CatalogError::VersionNotFound(number))
    }

    /// Describes the active version
    pub fn current_version_information(&self) -> Result<String, CatalogError> {
        check_rules([self.has_versions_rule(), self.has_active_version_rule()])?;
        self.current_version()
            .map(ToString::to_string)
            .ok_or_else(|| CatalogError::rule(HAS_ACTIVE_VERSION, "Product must have an active version."))
    }

    /// Describes every version, one block per version separated by a blank line
    pub fn all_versions_information(&self) -> Result<String, CatalogError> {
        check_rules([self.has_versions_rule()])?;
        Ok(self
            .versions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Publishes a new version and makes it the active one
    ///
    /// The next number follows the highest number ever assigned. If a version
    /// is active it becomes obsolete in the same step.
    ///
    /// # Errors
    ///
    /// A blank or out-of-range name, a kind not allowed for the specification's
    /// category, and a category not allowed for the product type are reported
    /// together. The product is unchanged on failure.
    pub fn publish_new_version(
        &mut self,
        name: &str,
        specification: Option<ProductSpecification>,
    ) -> Result<VersionNumber, CatalogError> {
        let mut rules = vec![BusinessRule::new(
            VERSION_NAME_NOT_EMPTY,
            name.trim().is_empty(),
            "Name of the version cannot be empty",
        )];
        rules.push(VersionName::length_rule(name));
        if let Some(spec) = &specification {
            let taxonomy = spec.taxonomy();
            rules.push(constraints::kind_allowed_rule(taxonomy.category(), taxonomy.kind()));
            rules.push(constraints::category_allowed_rule(self.product_type, taxonomy.category()));
        }
        check_rules(rules)?;

        let number = self.next_version_number()?;
        let version = VersionProduct::publish(name, number, specification)?;

        self.obsolete_current()?;
        self.versions.push(version);
        self.last_version_number = Some(number);
        self.status = LifeCycleStatus::Active;

        debug!(product_id = %self.id, version = number.get(), "version published");
        self.record(ProductEvent::VersionPublished {
            product_id: self.id,
            version: number.get(),
            name: name.trim().to_string(),
            timestamp: Utc::now(),
        });
        Ok(number)
    }

    /// Makes another version the active one
    ///
    /// # Errors
    ///
    /// Fails when the number is zero, the product has no versions, or the
    /// version does not exist.
    pub fn activate_another_version(&mut self, number: u32) -> Result<(), CatalogError> {
        check_rules(self.version_selection_rules(number))?;

        let already_current = self.current_version().map(|v| v.number().get()) == Some(number);
        if !already_current {
            self.obsolete_current()?;
            let index = self.index_of(number)?;
            self.versions[index].activate()?;
            self.record(ProductEvent::VersionActivated {
                product_id: self.id,
                version: number,
                timestamp: Utc::now(),
            });
        }
        self.status = LifeCycleStatus::Active;

        debug!(product_id = %self.id, version = number, "version activated");
        Ok(())
    }

    /// Obsoletes the active version and moves the product to Draft
    ///
    /// Succeeds without change when no version is active.
    ///
    /// # Errors
    ///
    /// Fails when the product has no versions.
    pub fn deactivate_current_version(&mut self) -> Result<(), CatalogError> {
        check_rules([self.has_versions_rule()])?;

        if let Some(number) = self.obsolete_current()? {
            self.status = LifeCycleStatus::Draft;
            debug!(product_id = %self.id, version = number.get(), "current version deactivated");
        }
        Ok(())
    }

    /// Removes a version
    ///
    /// Deleting the active version moves the product to Draft, as does
    /// deleting the last remaining version.
    ///
    /// # Errors
    ///
    /// Fails when the number is zero, the product has no versions, or the
    /// version does not exist.
    pub fn delete_version(&mut self, number: u32) -> Result<(), CatalogError> {
        check_rules(self.version_selection_rules(number))?;

        let index = self.index_of(number)?;
        if self.versions[index].is_active() {
            self.versions[index].obsolete()?;
            self.status = LifeCycleStatus::Draft;
            self.record(ProductEvent::VersionObsoleted {
                product_id: self.id,
                version: number,
                timestamp: Utc::now(),
            });
        }
        self.versions.remove(index);
        if self.versions.is_empty() {
            self.status = LifeCycleStatus::Draft;
        }

        debug!(product_id = %self.id, version = number, "version deleted");
        self.record(ProductEvent::VersionDeleted {
            product_id: self.id,
            version: number,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Archives the product
    ///
    /// # Errors
    ///
    /// Fails while any version is active.
    pub fn deactivate_product(&mut self) -> Result<(), CatalogError> {
        check_rules([self.all_versions_obsolete_rule()])?;
        self.status = LifeCycleStatus::Archived;

        debug!(product_id = %self.id, "product archived");
        self.record(ProductEvent::ProductArchived {
            product_id: self.id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Moves the product back to Draft
    ///
    /// # Errors
    ///
    /// Fails while any version is active.
    pub fn product_as_draft(&mut self) -> Result<(), CatalogError> {
        check_rules([self.all_versions_obsolete_rule()])?;
        self.status = LifeCycleStatus::Draft;

        debug!(product_id = %self.id, "product moved to draft");
        self.record(ProductEvent::ProductMovedToDraft {
            product_id: self.id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Changes the product type from a raw type name
    pub fn change_type(&mut self, product_type: &str) -> Result<(), CatalogError> {
        self.change_product_type(ProductType::parse(product_type)?)
    }

    /// Changes the product type
    ///
    /// # Errors
    ///
    /// Fails when the new type equals the current one.
    pub fn change_product_type(&mut self, product_type: ProductType) -> Result<(), CatalogError> {
        check_rules([BusinessRule::new(
            TYPE_MUST_DIFFER,
            product_type == self.product_type,
            format!("Product is already of type {product_type}."),
        )])?;

        let previous = std::mem::replace(&mut self.product_type, product_type);

        debug!(product_id = %self.id, from = %previous, to = %product_type, "product type changed");
        self.record(ProductEvent::ProductTypeChanged {
            product_id: self.id,
            from: previous,
            to: product_type,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Drains the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<ProductEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the events recorded since the last drain
    pub fn pending_events(&self) -> &[ProductEvent] {
        &self.events
    }

    fn next_version_number(&self) -> Result<VersionNumber, CatalogError> {
        match self.last_version_number {
            None => Ok(VersionNumber::FIRST),
            Some(last) => last.next().ok_or_else(|| {
                CatalogError::rule(VERSION_NUMBER_AVAILABLE, "No further version number can be assigned.")
            }),
        }
    }

    /// Obsoletes the active version, returning its number
    fn obsolete_current(&mut self) -> Result<Option<VersionNumber>, CatalogError> {
        let Some(current) = self.versions.iter_mut().find(|v| v.is_active()) else {
            return Ok(None);
        };
        current.obsolete()?;
        let number = current.number();
        self.record(ProductEvent::VersionObsoleted {
            product_id: self.id,
            version: number.get(),
            timestamp: Utc::now(),
        });
        Ok(Some(number))
    }

    fn index_of(&self, number: u32) -> Result<usize, CatalogError> {
        self.versions
            .iter()
            .position(|v| v.number().get() == number)
            .ok_or(CatalogError::VersionNotFound(number))
    }

    fn record(&mut self, event: ProductEvent) {
        self.events.push(event);
    }

    fn has_versions_rule(&self) -> BusinessRule {
        BusinessRule::new(HAS_VERSIONS, self.versions.is_empty(), "Product must have any version.")
    }

    fn has_active_version_rule(&self) -> BusinessRule {
        BusinessRule::new(
            HAS_ACTIVE_VERSION,
            !self.versions.is_empty() && !self.any_version_active(),
            "Product must have an active version.",
        )
    }

    fn all_versions_obsolete_rule(&self) -> BusinessRule {
        BusinessRule::new(
            ALL_VERSIONS_OBSOLETE,
            self.any_version_active(),
            "All versions must be obsolete.",
        )
    }

    fn version_selection_rules(&self, number: u32) -> [BusinessRule; 3] {
        [
            BusinessRule::new(NUMBER_POSITIVE, number == 0, "Number must be greater than zero"),
            self.has_versions_rule(),
            BusinessRule::new(
                VERSION_EXISTS,
                !self.versions.iter().any(|v| v.number().get() == number),
                "Number of version not exist.",
            ),
        ]
    }
}
