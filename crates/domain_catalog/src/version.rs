//! Product versions
//!
//! A version is either active or obsolete. It starts active when published,
//! and the only legal transitions are active -> obsolete and obsolete -> active.

use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use core_kernel::{check_rules, BusinessRule, VersionProductId};

use crate::error::CatalogError;
use crate::specification::ProductSpecification;

/// Rule name reported when activating an already active version
pub const VERSION_MUST_BE_OBSOLETE: &str = "version_must_be_obsolete";

/// Rule name reported when obsoleting an already obsolete version
pub const VERSION_MUST_BE_ACTIVE: &str = "version_must_be_active";

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 30;

/// Positive version number
///
/// Only the owning product assigns numbers, so a non-positive raw number is
/// a defect and is rejected with [`CatalogError::InvalidVersionNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VersionNumber(NonZeroU32);

impl VersionNumber {
    /// The number of the first version of a product
    pub const FIRST: VersionNumber = VersionNumber(NonZeroU32::MIN);

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the following number, or `None` on overflow
    pub fn next(self) -> Option<VersionNumber> {
        self.0.checked_add(1).map(VersionNumber)
    }
}

impl TryFrom<i64> for VersionNumber {
    type Error = CatalogError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .ok()
            .and_then(NonZeroU32::new)
            .map(VersionNumber)
            .ok_or(CatalogError::InvalidVersionNumber(raw))
    }
}

impl TryFrom<u32> for VersionNumber {
    type Error = CatalogError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(raw)
            .map(VersionNumber)
            .ok_or(CatalogError::InvalidVersionNumber(i64::from(raw)))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version name, 3 to 30 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionName(String);

impl VersionName {
    /// Validates and trims a raw name
    pub fn new(raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();

        check_rules([
            BusinessRule::new("name_not_blank", trimmed.is_empty(), "Name cannot be null or whitespace."),
            Self::length_rule(raw),
        ])?;

        Ok(Self(trimmed.to_string()))
    }

    /// Length rule on the trimmed name; a blank name does not break it
    pub(crate) fn length_rule(raw: &str) -> BusinessRule {
        let trimmed = raw.trim();
        let chars = trimmed.chars().count();
        BusinessRule::new(
            "name_length",
            !trimmed.is_empty() && !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars),
            "Name must be between 3 and 30 characters.",
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One published version of a product
#[derive(Debug, Clone, Serialize)]
pub struct VersionProduct {
    id: VersionProductId,
    name: VersionName,
    number: VersionNumber,
    is_obsolete: bool,
    specification: Option<ProductSpecification>,
}

impl VersionProduct {
    /// Publishes a new active version
    ///
    /// # Errors
    ///
    /// Returns the broken name rules when the name is blank or out of range.
    pub fn publish(
        name: &str,
        number: VersionNumber,
        specification: Option<ProductSpecification>,
    ) -> Result<Self, CatalogError> {
        let name = VersionName::new(name)?;
        Ok(Self {
            id: VersionProductId::new_v7(),
            name,
            number,
            is_obsolete: false,
            specification,
        })
    }

    pub(crate) fn restore(
        id: VersionProductId,
        name: &str,
        number: VersionNumber,
        is_obsolete: bool,
        specification: Option<ProductSpecification>,
    ) -> Result<Self, CatalogError> {
        let mut version = Self::publish(name, number, specification)?;
        version.id = id;
        version.is_obsolete = is_obsolete;
        Ok(version)
    }

    pub fn id(&self) -> VersionProductId {
        self.id
    }

    pub fn name(&self) -> &VersionName {
        &self.name
    }

    pub fn number(&self) -> VersionNumber {
        self.number
    }

    pub fn is_obsolete(&self) -> bool {
        self.is_obsolete
    }

    pub fn is_active(&self) -> bool {
        !self.is_obsolete
    }

    pub fn specification(&self) -> Option<&ProductSpecification> {
        self.specification.as_ref()
    }

    /// Makes an obsolete version active again
    ///
    /// # Errors
    ///
    /// Fails if the version is already active.
    pub fn activate(&mut self) -> Result<(), CatalogError> {
        check_rules([BusinessRule::new(
            VERSION_MUST_BE_OBSOLETE,
            !self.is_obsolete,
            "Version must be obsoleted to become active again.",
        )])?;
        self.is_obsolete = false;
        Ok(())
    }

    /// Marks an active version obsolete
    ///
    /// # Errors
    ///
    /// Fails if the version is already obsolete.
    pub fn obsolete(&mut self) -> Result<(), CatalogError> {
        check_rules([BusinessRule::new(
            VERSION_MUST_BE_ACTIVE,
            self.is_obsolete,
            "Version must be active to become obsoleted.",
        )])?;
        self.is_obsolete = true;
        Ok(())
    }

    /// Attaches or replaces the specification
    pub fn add_specification(&mut self, specification: ProductSpecification) {
        self.specification = Some(specification);
    }

    /// Detaches the specification, returning it
    pub fn remove_specification(&mut self) -> Option<ProductSpecification> {
        self.specification.take()
    }
}

impl fmt::Display for VersionProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Number: {}, Is Obsolete? : {}",
            self.name, self.number, self.is_obsolete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: i64) -> VersionNumber {
        VersionNumber::try_from(n).unwrap()
    }

    #[test]
    fn test_version_number_rejects_non_positive() {
        assert_eq!(VersionNumber::try_from(0i64), Err(CatalogError::InvalidVersionNumber(0)));
        assert_eq!(VersionNumber::try_from(-3i64), Err(CatalogError::InvalidVersionNumber(-3)));
        assert_eq!(number(7).get(), 7);
        assert_eq!(VersionNumber::FIRST.next(), Some(number(2)));
    }

    #[test]
    fn test_name_is_trimmed_and_bounded() {
        assert_eq!(VersionName::new("  v1.0  ").unwrap().as_str(), "v1.0");
        assert!(VersionName::new("ab").is_err());
        assert!(VersionName::new(&"x".repeat(31)).is_err());
        assert!(VersionName::new(&"x".repeat(30)).is_ok());
    }

    #[test]
    fn test_blank_name_reports_one_reason() {
        let error = VersionName::new("   ").unwrap_err();
        assert_eq!(error.reasons(), vec!["Name cannot be null or whitespace.".to_string()]);
    }

    #[test]
    fn test_state_machine() {
        let mut version = VersionProduct::publish("Release", VersionNumber::FIRST, None).unwrap();
        assert!(version.is_active());

        let error = version.activate().unwrap_err();
        assert!(error.is_rule_broken(VERSION_MUST_BE_OBSOLETE));

        version.obsolete().unwrap();
        assert!(version.is_obsolete());
        assert!(version.obsolete().unwrap_err().is_rule_broken(VERSION_MUST_BE_ACTIVE));

        version.activate().unwrap();
        assert!(version.is_active());
    }

    #[test]
    fn test_display() {
        let version = VersionProduct::publish("Release", number(2), None).unwrap();
        assert_eq!(version.to_string(), "Name: Release, Number: 2, Is Obsolete? : false");
    }
}
