//! Custom Test Assertions
//!
//! Assertion helpers for catalog types that give more meaningful failure
//! messages than standard assertions.

use domain_catalog::{CatalogError, LifeCycleStatus, Product};

/// Asserts that at most one version is active and the status agrees
///
/// # Panics
///
/// Panics if two or more versions are active, or if the status is Active
/// without an active version (or the reverse).
pub fn assert_single_active_version(product: &Product) {
    let active: Vec<u32> = product
        .versions()
        .iter()
        .filter(|v| v.is_active())
        .map(|v| v.number().get())
        .collect();

    assert!(
        active.len() <= 1,
        "Expected at most one active version, found {:?}",
        active
    );
    assert_eq!(
        product.status() == LifeCycleStatus::Active,
        !active.is_empty(),
        "Status {} does not match active versions {:?}",
        product.status(),
        active
    );
}

/// Asserts that the active version has the given number
pub fn assert_active_version(product: &Product, number: u32) {
    let current = product.current_version().map(|v| v.number().get());
    assert_eq!(
        current,
        Some(number),
        "Expected version {} to be active, found {:?}",
        number,
        current
    );
}

/// Asserts that a result failed because of the named business rule
///
/// # Panics
///
/// Panics if the result is Ok or the rule is not among the reasons.
pub fn assert_rule_violation<T: std::fmt::Debug>(result: &Result<T, CatalogError>, rule: &str) {
    match result {
        Ok(value) => panic!("Expected rule '{}' to be broken, got Ok({:?})", rule, value),
        Err(error) => assert!(
            error.is_rule_broken(rule),
            "Expected rule '{}' to be broken, reasons were {:?}",
            rule,
            error.reasons()
        ),
    }
}

/// Asserts that version numbers strictly increase in list order
pub fn assert_numbers_increasing(product: &Product) {
    let numbers: Vec<u32> = product.versions().iter().map(|v| v.number().get()).collect();
    assert!(
        numbers.windows(2).all(|pair| pair[0] < pair[1]),
        "Version numbers are not strictly increasing: {:?}",
        numbers
    );
}
