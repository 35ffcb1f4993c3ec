//! Catalog service tests
//!
//! Test Organization:
//! - `product_creation`: creating products with and without a first version
//! - `version_workflow`: publish, activate, deactivate and delete through the service
//! - `product_lifecycle`: archive, draft and type changes
//! - `queries`: lookups, counts and paginated listings
//! - `rejections`: validation, domain and not-found failures
//! - `paging`: page arithmetic and response serialization

use std::sync::Arc;

use rust_decimal_macros::dec;

use catalog_service::dto::{
    CreateProductRequest, CreateProductWithVersionRequest, PageRequest, PriceRangeRequest,
    PublishVersionRequest, ResourceRequest, SpecificationRequest,
};
use catalog_service::{CatalogConfig, CatalogService, ServiceError};
use core_kernel::{AdapterHealth, ProductId};
use domain_catalog::product::{ALL_VERSIONS_OBSOLETE, HAS_ACTIVE_VERSION, VERSION_EXISTS};
use domain_catalog::{InMemoryProductRepository, Product, ProductType};
use test_utils::{ProductBuilder, SpecificationBuilder};

// ===== TEST FIXTURES =====

fn service_with(repository: InMemoryProductRepository) -> CatalogService {
    CatalogService::new(Arc::new(repository), CatalogConfig::default())
}

fn empty_service() -> CatalogService {
    service_with(InMemoryProductRepository::new())
}

fn vm_specification(price: rust_decimal::Decimal) -> SpecificationRequest {
    SpecificationRequest {
        price,
        amount: 2,
        category: "VirtualMachine".to_string(),
        generation: "G2".to_string(),
        kind: "Intel".to_string(),
        resources: vec![
            ResourceRequest {
                key: "cpu".to_string(),
                value: "4".to_string(),
            },
            ResourceRequest {
                key: "ram".to_string(),
                value: "16GB".to_string(),
            },
        ],
    }
}

fn version(name: &str) -> PublishVersionRequest {
    PublishVersionRequest {
        name: name.to_string(),
        specification: None,
    }
}

async fn created_product(service: &CatalogService, product_type: &str) -> ProductId {
    let view = service
        .add_product(CreateProductRequest {
            product_type: product_type.to_string(),
        })
        .await
        .unwrap();
    view.id.parse().unwrap()
}

fn priced_vm(price: rust_decimal::Decimal) -> Product {
    ProductBuilder::new()
        .product_type(ProductType::VirtualMachine)
        .version_with_spec("Standard", SpecificationBuilder::new().price(price))
        .build()
        .unwrap()
}

mod product_creation {
    use super::*;

    #[tokio::test]
    async fn test_add_product_starts_in_draft() {
        let service = empty_service();
        let view = service
            .add_product(CreateProductRequest {
                product_type: "software".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(view.product_type, "Software");
        assert_eq!(view.status, "Draft");
        assert!(view.versions.is_empty());
        assert_eq!(service.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_product_with_version_is_active() {
        let service = empty_service();
        let view = service
            .add_product_with_version(CreateProductWithVersionRequest {
                product_type: "VirtualMachine".to_string(),
                version: PublishVersionRequest {
                    name: "Launch".to_string(),
                    specification: Some(vm_specification(dec!(19.99))),
                },
            })
            .await
            .unwrap();

        assert_eq!(view.status, "Active");
        assert_eq!(view.current_version, Some(1));
        let spec = view.versions[0].specification.as_ref().unwrap();
        assert_eq!(spec.value, dec!(39.98));
        assert_eq!(spec.resources.len(), 2);
    }

    #[tokio::test]
    async fn test_add_product_with_disallowed_category_saves_nothing() {
        let service = empty_service();
        let result = service
            .add_product_with_version(CreateProductWithVersionRequest {
                product_type: "Service".to_string(),
                version: PublishVersionRequest {
                    name: "Launch".to_string(),
                    specification: Some(vm_specification(dec!(10))),
                },
            })
            .await;

        let error = result.unwrap_err();
        assert!(error.is_rule_broken("category_allowed_for_type"));
        assert_eq!(service.count_products().await.unwrap(), 0);
    }
}

mod version_workflow {
    use super::*;

    #[tokio::test]
    async fn test_publish_obsoletes_previous_version() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;

        service.publish_version(id, version("First")).await.unwrap();
        let view = service.publish_version(id, version("Second")).await.unwrap();

        assert_eq!(view.current_version, Some(2));
        assert!(view.versions[0].is_obsolete);
        assert!(!view.versions[1].is_obsolete);
    }

    #[tokio::test]
    async fn test_activate_previous_version_persists() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();
        service.publish_version(id, version("Second")).await.unwrap();

        service.activate_version(id, 1).await.unwrap();

        let reloaded = service.get_product(id).await.unwrap();
        assert_eq!(reloaded.current_version, Some(1));
        assert_eq!(reloaded.status, "Active");
    }

    #[tokio::test]
    async fn test_deactivate_current_version_moves_to_draft() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();

        let view = service.deactivate_current_version(id).await.unwrap();

        assert_eq!(view.status, "Draft");
        assert_eq!(view.current_version, None);
    }

    #[tokio::test]
    async fn test_deleted_number_is_not_reused() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();
        service.publish_version(id, version("Second")).await.unwrap();

        service.delete_version(id, 2).await.unwrap();
        let view = service.publish_version(id, version("Third")).await.unwrap();

        let numbers: Vec<u32> = view.versions.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_current_version_information() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();

        let info = service.current_version_information(id).await.unwrap();
        assert_eq!(info, "Name: First, Number: 1, Is Obsolete? : false");
    }
}

mod product_lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_archive_after_deactivation() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();
        service.deactivate_current_version(id).await.unwrap();

        let view = service.archive_product(id).await.unwrap();
        assert_eq!(view.status, "Archived");

        let view = service.product_as_draft(id).await.unwrap();
        assert_eq!(view.status, "Draft");
    }

    #[tokio::test]
    async fn test_archive_with_active_version_is_rejected() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();

        let error = service.archive_product(id).await.unwrap_err();
        assert!(error.is_rule_broken(ALL_VERSIONS_OBSOLETE));
        assert_eq!(error.reasons(), vec!["All versions must be obsolete.".to_string()]);

        let reloaded = service.get_product(id).await.unwrap();
        assert_eq!(reloaded.status, "Active");
    }

    #[tokio::test]
    async fn test_change_type() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;

        let view = service.change_type(id, "Service").await.unwrap();
        assert_eq!(view.product_type, "Service");

        let error = service.change_type(id, "Service").await.unwrap_err();
        assert_eq!(error.reasons(), vec!["Product is already of type Service.".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;

        service.delete_product(id).await.unwrap();

        assert!(!service.product_exists(id).await.unwrap());
        assert!(service.delete_product(id).await.unwrap_err().is_not_found());
    }
}

mod queries {
    use super::*;

    #[tokio::test]
    async fn test_products_by_status_paginates() {
        let mut products: Vec<Product> = (0..5).map(|_| Product::new(ProductType::Software)).collect();
        products.push(priced_vm(dec!(10)));
        let service = service_with(InMemoryProductRepository::with_products(products).await);

        let first = service.products_by_status("draft", PageRequest::new(1, 2)).await.unwrap();
        let third = service.products_by_status("draft", PageRequest::new(3, 2)).await.unwrap();
        let everything = service.products_by_status("Draft", PageRequest::default()).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(third.len(), 1);
        assert_eq!(everything.len(), 5);
        assert!(everything.iter().all(|p| p.status == "Draft"));
    }

    #[tokio::test]
    async fn test_list_products_pages_in_id_order() {
        let products: Vec<Product> = vec![
            Product::new(ProductType::Software),
            priced_vm(dec!(10)),
            ProductBuilder::new().version("First").archived().build().unwrap(),
            Product::new(ProductType::Service),
            priced_vm(dec!(20)),
        ];
        let mut expected: Vec<ProductId> = products.iter().map(Product::id).collect();
        expected.sort_by_key(|id| *id.as_uuid());
        let service = service_with(InMemoryProductRepository::with_products(products).await);

        let first = service.list_products(PageRequest::new(1, 2)).await.unwrap();
        let second = service.list_products(PageRequest::new(2, 2)).await.unwrap();
        let third = service.list_products(PageRequest::new(3, 2)).await.unwrap();
        let beyond = service.list_products(PageRequest::new(4, 2)).await.unwrap();

        let listed: Vec<ProductId> = first
            .iter()
            .chain(&second)
            .chain(&third)
            .map(|view| view.id.parse().unwrap())
            .collect();
        assert_eq!(listed, expected);
        assert_eq!(third.len(), 1);
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_products_in_price_range_is_inclusive() {
        let products = vec![
            priced_vm(dec!(10)),
            priced_vm(dec!(50)),
            priced_vm(dec!(100)),
            ProductBuilder::new().version("Unpriced").build().unwrap(),
        ];
        let service = service_with(InMemoryProductRepository::with_products(products).await);

        let views = service
            .products_in_price_range(
                PriceRangeRequest {
                    low: dec!(10),
                    high: dec!(50),
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        let mut prices: Vec<_> = views
            .iter()
            .filter_map(|p| p.versions.last()?.specification.as_ref().map(|s| s.price))
            .collect();
        prices.sort();
        assert_eq!(prices, vec![dec!(10), dec!(50)]);
    }

    #[tokio::test]
    async fn test_health_delegates_to_repository() {
        let service = empty_service();
        let health = service.health().await;
        assert_eq!(health.status, AdapterHealth::Healthy);
    }
}

mod rejections {
    use super::*;

    #[tokio::test]
    async fn test_invalid_request_shape() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;

        let error = service.publish_version(id, version("v1")).await.unwrap_err();
        assert!(matches!(error, ServiceError::Validation(_)));
        assert!(error.reasons().iter().any(|r| r.starts_with("name")));
    }

    #[tokio::test]
    async fn test_unknown_product_type() {
        let service = empty_service();
        let error = service
            .add_product(CreateProductRequest {
                product_type: "Hardware".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.reasons(), vec!["Product type 'Hardware' was not found.".to_string()]);
    }

    #[tokio::test]
    async fn test_activate_missing_version() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();

        let error = service.activate_version(id, 7).await.unwrap_err();
        assert!(error.is_rule_broken(VERSION_EXISTS));
    }

    #[tokio::test]
    async fn test_current_version_information_without_active_version() {
        let service = empty_service();
        let id = created_product(&service, "Software").await;
        service.publish_version(id, version("First")).await.unwrap();
        service.deactivate_current_version(id).await.unwrap();

        let error = service.current_version_information(id).await.unwrap_err();
        assert!(error.is_rule_broken(HAS_ACTIVE_VERSION));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let service = empty_service();
        let error = service.get_product(ProductId::new()).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let service = empty_service();
        created_product(&service, "Software").await;

        let error = service
            .products_by_status("Retired", PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Domain(_)));
        assert_eq!(error.reasons(), vec!["Life cycle status 'Retired' was not found.".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_price_range() {
        let service = empty_service();
        let result = service
            .products_in_price_range(
                PriceRangeRequest {
                    low: dec!(100),
                    high: dec!(1),
                },
                PageRequest::default(),
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}

mod paging {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_page_respects_limits(number in 0u32..1_000, size in proptest::option::of(0u32..500)) {
            let config = CatalogConfig::default();
            let page = config.page(number, size);

            prop_assert!(page.limit >= 1);
            prop_assert!(page.limit <= config.max_page_size);
            prop_assert_eq!(page.offset, number.max(1).saturating_sub(1) * page.limit);
        }
    }

    #[tokio::test]
    async fn test_product_view_serializes() {
        let service = empty_service();
        let view = service
            .add_product_with_version(CreateProductWithVersionRequest {
                product_type: "VirtualMachine".to_string(),
                version: PublishVersionRequest {
                    name: "Launch".to_string(),
                    specification: Some(vm_specification(dec!(5))),
                },
            })
            .await
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "Active");
        assert_eq!(json["current_version"], 1);
        assert_eq!(json["versions"][0]["specification"]["kind"], "Intel");
        assert_eq!(json["versions"][0]["specification"]["resources"][1]["key"], "ram");
    }
}
