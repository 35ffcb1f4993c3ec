//! Taxonomy constraint engine
//!
//! Two static compatibility tables decide which combinations of catalog
//! values are legal:
//!
//! | Product type   | Allowed categories                        |
//! |----------------|-------------------------------------------|
//! | VirtualMachine | VirtualMachine                            |
//! | Software       | Database, Firewall, Vpn, License, Os      |
//! | Service        | Service                                   |
//!
//! | Category       | Allowed kinds                             |
//! |----------------|-------------------------------------------|
//! | VirtualMachine | Amd, Intel                                |
//! | Database       | MicrosoftStd, MicrosoftWeb                |
//! | Os             | Linux, Windows                            |
//! | License        | Rds                                       |
//! | Vpn            | OpenVpn                                   |
//! | Firewall       | FireGuard, PfSense                        |
//! | Service        | Backup, ExtendedSupport, ServiceImplementation |
//!
//! The tables are exhaustive matches over the closed catalogs, so every key
//! has an entry and nothing can be registered at runtime.

use core_kernel::BusinessRule;

use crate::catalogs::{Kind, ProductCategory, ProductType};
use crate::error::CatalogError;

/// Rule name reported when a kind is not allowed for a category
pub const KIND_ALLOWED_FOR_CATEGORY: &str = "kind_allowed_for_category";

/// Rule name reported when a category is not allowed for a product type
pub const CATEGORY_ALLOWED_FOR_TYPE: &str = "category_allowed_for_type";

/// Returns the categories a product of the given type may carry
pub fn allowed_categories(product_type: ProductType) -> &'static [ProductCategory] {
    match product_type {
        ProductType::VirtualMachine => &[ProductCategory::VirtualMachine],
        ProductType::Software => &[
            ProductCategory::Database,
            ProductCategory::Firewall,
            ProductCategory::Vpn,
            ProductCategory::License,
            ProductCategory::Os,
        ],
        ProductType::Service => &[ProductCategory::Service],
    }
}

/// Returns the kinds allowed within the given category
pub fn allowed_kinds(category: ProductCategory) -> &'static [Kind] {
    match category {
        ProductCategory::VirtualMachine => &[Kind::Amd, Kind::Intel],
        ProductCategory::Database => &[Kind::MicrosoftStd, Kind::MicrosoftWeb],
        ProductCategory::Os => &[Kind::Linux, Kind::Windows],
        ProductCategory::License => &[Kind::Rds],
        ProductCategory::Vpn => &[Kind::OpenVpn],
        ProductCategory::Firewall => &[Kind::FireGuard, Kind::PfSense],
        ProductCategory::Service => &[Kind::Backup, Kind::ExtendedSupport, Kind::ServiceImplementation],
    }
}

/// Returns every product type that has a category table
pub fn allowed_types() -> &'static [ProductType] {
    ProductType::ALL
}

/// Returns every category that has a kind table
pub fn constrained_categories() -> &'static [ProductCategory] {
    ProductCategory::ALL
}

/// Builds the rule "kind must be allowed for category"
pub fn kind_allowed_rule(category: ProductCategory, kind: Kind) -> BusinessRule {
    BusinessRule::new(
        KIND_ALLOWED_FOR_CATEGORY,
        !allowed_kinds(category).contains(&kind),
        format!("Kind {kind} is not allowed in Product Category {category}."),
    )
}

/// Builds the rule "category must be allowed for product type"
pub fn category_allowed_rule(product_type: ProductType, category: ProductCategory) -> BusinessRule {
    BusinessRule::new(
        CATEGORY_ALLOWED_FOR_TYPE,
        !allowed_categories(product_type).contains(&category),
        format!("Product Category {category} is not allowed in Product Type {product_type}."),
    )
}

/// Checks that a kind is legal within a category
///
/// # Errors
///
/// Returns a broken `kind_allowed_for_category` rule when the kind is not in
/// the category's table
pub fn is_category_allowed_for_kind(category: ProductCategory, kind: Kind) -> Result<(), CatalogError> {
    core_kernel::check_rules([kind_allowed_rule(category, kind)]).map_err(CatalogError::from)
}

/// Checks that a category is legal for a product type
///
/// # Errors
///
/// Returns a broken `category_allowed_for_type` rule when the category is
/// not in the type's table
pub fn is_category_allowed_for_type(
    product_type: ProductType,
    category: ProductCategory,
) -> Result<(), CatalogError> {
    core_kernel::check_rules([category_allowed_rule(product_type, category)]).map_err(CatalogError::from)
}

/// Checks a raw category/kind pair, failing explicitly on blank or unknown names
///
/// Parse failures of both inputs are reported together.
pub fn check_kind_names(category: &str, kind: &str) -> Result<(), CatalogError> {
    let (category, kind) = match (ProductCategory::parse(category), Kind::parse(kind)) {
        (Ok(category), Ok(kind)) => (category, kind),
        (category, kind) => {
            let errors = [category.err(), kind.err()].into_iter().flatten().collect();
            return Err(CatalogError::collect(errors).unwrap_or(CatalogError::EmptyValue {
                catalog: Kind::LABEL,
            }));
        }
    };
    is_category_allowed_for_kind(category, kind)
}

/// Checks a raw type/category pair, failing explicitly on blank or unknown names
pub fn check_category_names(product_type: &str, category: &str) -> Result<(), CatalogError> {
    let (product_type, category) = match (ProductType::parse(product_type), ProductCategory::parse(category)) {
        (Ok(product_type), Ok(category)) => (product_type, category),
        (product_type, category) => {
            let errors = [product_type.err(), category.err()].into_iter().flatten().collect();
            return Err(CatalogError::collect(errors).unwrap_or(CatalogError::EmptyValue {
                catalog: ProductCategory::LABEL,
            }));
        }
    };
    is_category_allowed_for_type(product_type, category)
}
