//! Request and response DTOs
//!
//! Requests carry raw, untrusted input. Their shape is checked with
//! `validator` first, then they are converted into domain values, which apply
//! the full business rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domain_catalog::{
    CatalogError, Product, ProductSpecification, Taxonomy, VersionProduct,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub product_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResourceRequest {
    #[validate(length(min = 1))]
    pub key: String,
    #[validate(length(min = 1))]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_price"))]
pub struct SpecificationRequest {
    pub price: Decimal,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub generation: String,
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    #[validate(nested)]
    pub resources: Vec<ResourceRequest>,
}

impl SpecificationRequest {
    /// Converts into a domain specification
    pub fn to_domain(&self) -> Result<ProductSpecification, CatalogError> {
        let taxonomy = Taxonomy::from_names(&self.category, &self.generation, &self.kind)?;
        ProductSpecification::generate_with_resources(
            self.price,
            taxonomy,
            self.amount,
            self.resources.iter().map(|r| (r.key.clone(), r.value.clone())),
        )
    }
}

fn validate_price(request: &SpecificationRequest) -> Result<(), ValidationError> {
    if request.price <= Decimal::ZERO {
        return Err(ValidationError::new("price_must_be_positive"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublishVersionRequest {
    #[validate(length(min = 3, max = 30))]
    pub name: String,
    #[validate(nested)]
    pub specification: Option<SpecificationRequest>,
}

impl PublishVersionRequest {
    /// Converts the optional specification into a domain value
    pub fn specification(&self) -> Result<Option<ProductSpecification>, CatalogError> {
        self.specification.as_ref().map(SpecificationRequest::to_domain).transpose()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductWithVersionRequest {
    #[validate(length(min = 1))]
    pub product_type: String,
    #[validate(nested)]
    pub version: PublishVersionRequest,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_range"))]
pub struct PriceRangeRequest {
    pub low: Decimal,
    pub high: Decimal,
}

fn validate_range(request: &PriceRangeRequest) -> Result<(), ValidationError> {
    if request.low > request.high {
        return Err(ValidationError::new("low_must_not_exceed_high"));
    }
    Ok(())
}

/// Requested page of a listing, numbered from 1
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub number: u32,
    pub size: Option<u32>,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number,
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificationView {
    pub price: Decimal,
    pub amount: u32,
    pub value: Decimal,
    pub category: String,
    pub generation: String,
    pub kind: String,
    pub resources: Vec<ResourceView>,
}

impl From<&ProductSpecification> for SpecificationView {
    fn from(spec: &ProductSpecification) -> Self {
        let taxonomy = spec.taxonomy();
        Self {
            price: spec.price().round_dp(2),
            amount: spec.amount(),
            value: spec.value().round_dp(2),
            category: taxonomy.category().to_string(),
            generation: taxonomy.generation().to_string(),
            kind: taxonomy.kind().to_string(),
            resources: spec
                .resources()
                .iter()
                .map(|r| ResourceView {
                    key: r.key().to_string(),
                    value: r.value().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionView {
    pub number: u32,
    pub name: String,
    pub is_obsolete: bool,
    pub specification: Option<SpecificationView>,
}

impl From<&VersionProduct> for VersionView {
    fn from(version: &VersionProduct) -> Self {
        Self {
            number: version.number().get(),
            name: version.name().to_string(),
            is_obsolete: version.is_obsolete(),
            specification: version.specification().map(SpecificationView::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: String,
    pub product_type: String,
    pub status: String,
    pub current_version: Option<u32>,
    pub versions: Vec<VersionView>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            product_type: product.product_type().to_string(),
            status: product.status().to_string(),
            current_version: product.current_version().map(|v| v.number().get()),
            versions: product.versions().iter().map(VersionView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spec_request() -> SpecificationRequest {
        SpecificationRequest {
            price: dec!(12.345),
            amount: 2,
            category: "VirtualMachine".to_string(),
            generation: "G2".to_string(),
            kind: "intel".to_string(),
            resources: vec![ResourceRequest {
                key: "cpu".to_string(),
                value: "4".to_string(),
            }],
        }
    }

    #[test]
    fn test_specification_request_validates_shape() {
        assert!(spec_request().validate().is_ok());

        let mut request = spec_request();
        request.price = dec!(0);
        request.amount = 0;
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_specification_request_converts() {
        let spec = spec_request().to_domain().unwrap();
        assert_eq!(spec.value(), dec!(24.690));
        assert_eq!(spec.resource_value("CPU"), Some("4"));
    }

    #[test]
    fn test_price_range_order() {
        let request = PriceRangeRequest {
            low: dec!(10),
            high: dec!(5),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_short_version_name_rejected() {
        let request = PublishVersionRequest {
            name: "v1".to_string(),
            specification: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_views_round_prices() {
        let spec = spec_request().to_domain().unwrap();
        let view = SpecificationView::from(&spec);
        assert_eq!(view.price, dec!(12.34));
        assert_eq!(view.value, dec!(24.69));
        assert_eq!(view.kind, "Intel");
    }
}
