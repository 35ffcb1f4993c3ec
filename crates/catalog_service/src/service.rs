//! Catalog use cases
//!
//! Each use case loads the aggregate, applies one domain operation and saves
//! the whole graph back. Recorded domain events are drained and logged after
//! a successful save.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use core_kernel::{HealthCheckResult, OperationMetadata, ProductId};
use domain_catalog::{
    CatalogError, LifeCycleStatus, Product, ProductQuery, ProductRepository, ProductType,
};

use crate::config::CatalogConfig;
use crate::dto::{
    CreateProductRequest, CreateProductWithVersionRequest, PageRequest, PriceRangeRequest, ProductView,
    PublishVersionRequest,
};
use crate::error::ServiceError;

/// Orchestrates catalog operations over a product repository
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Creates a product in Draft
    #[instrument(skip(self, request), fields(product_type = %request.product_type))]
    pub async fn add_product(&self, request: CreateProductRequest) -> Result<ProductView, ServiceError> {
        request.validate()?;
        let mut product = rejected("add_product", Product::create(&request.product_type))?;
        self.persist("add_product", &mut product).await?;
        Ok(ProductView::from(&product))
    }

    /// Creates a product and publishes its first version
    #[instrument(skip(self, request), fields(product_type = %request.product_type))]
    pub async fn add_product_with_version(
        &self,
        request: CreateProductWithVersionRequest,
    ) -> Result<ProductView, ServiceError> {
        request.validate()?;
        let built = ProductType::parse(&request.product_type).and_then(|product_type| {
            let specification = request.version.specification()?;
            Product::create_with_version(product_type, &request.version.name, specification)
        });
        let mut product = rejected("add_product_with_version", built)?;
        self.persist("add_product_with_version", &mut product).await?;
        Ok(ProductView::from(&product))
    }

    /// Publishes a new version, obsoleting the current one
    #[instrument(skip(self, request), fields(product_id = %id))]
    pub async fn publish_version(
        &self,
        id: ProductId,
        request: PublishVersionRequest,
    ) -> Result<ProductView, ServiceError> {
        request.validate()?;
        let specification = rejected("publish_version", request.specification())?;
        self.update(id, "publish_version", |product| {
            product.publish_new_version(&request.name, specification).map(|_| ())
        })
        .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn activate_version(&self, id: ProductId, number: u32) -> Result<ProductView, ServiceError> {
        self.update(id, "activate_version", |product| product.activate_another_version(number))
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn deactivate_current_version(&self, id: ProductId) -> Result<ProductView, ServiceError> {
        self.update(id, "deactivate_current_version", Product::deactivate_current_version)
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_version(&self, id: ProductId, number: u32) -> Result<ProductView, ServiceError> {
        self.update(id, "delete_version", |product| product.delete_version(number))
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn archive_product(&self, id: ProductId) -> Result<ProductView, ServiceError> {
        self.update(id, "archive_product", Product::deactivate_product).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_as_draft(&self, id: ProductId) -> Result<ProductView, ServiceError> {
        self.update(id, "product_as_draft", Product::product_as_draft).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn change_type(&self, id: ProductId, product_type: &str) -> Result<ProductView, ServiceError> {
        self.update(id, "change_type", |product| product.change_type(product_type))
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        self.repository
            .delete_product(id, Some(metadata("delete_product")))
            .await?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductView, ServiceError> {
        let product = self.repository.get_product(id, Some(metadata("get_product"))).await?;
        Ok(ProductView::from(&product))
    }

    /// Describes the active version of a product
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn current_version_information(&self, id: ProductId) -> Result<String, ServiceError> {
        let product = self
            .repository
            .get_product(id, Some(metadata("current_version_information")))
            .await?;
        Ok(product.current_version_information()?)
    }

    pub async fn product_exists(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.repository.exists(id, Some(metadata("product_exists"))).await?)
    }

    pub async fn count_products(&self) -> Result<u64, ServiceError> {
        Ok(self.repository.count(Some(metadata("count_products"))).await?)
    }

    /// Lists every product, ordered by id
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: PageRequest) -> Result<Vec<ProductView>, ServiceError> {
        let page = self.config.page(page.number, page.size);
        let query = ProductQuery::default().paginate(page.limit, page.offset);
        self.find(query, "list_products").await
    }

    /// Lists products in the given status, ordered by id
    #[instrument(skip(self))]
    pub async fn products_by_status(
        &self,
        status: &str,
        page: PageRequest,
    ) -> Result<Vec<ProductView>, ServiceError> {
        let status = rejected("products_by_status", LifeCycleStatus::parse(status))?;
        let page = self.config.page(page.number, page.size);
        let query = ProductQuery::by_status(status).paginate(page.limit, page.offset);
        self.find(query, "products_by_status").await
    }

    /// Lists products whose active version price lies in the range, bounds inclusive
    #[instrument(skip(self, request), fields(low = %request.low, high = %request.high))]
    pub async fn products_in_price_range(
        &self,
        request: PriceRangeRequest,
        page: PageRequest,
    ) -> Result<Vec<ProductView>, ServiceError> {
        request.validate()?;
        let page = self.config.page(page.number, page.size);
        let query = ProductQuery::by_price_range(request.low, request.high).paginate(page.limit, page.offset);
        self.find(query, "products_in_price_range").await
    }

    /// Reports the health of the underlying repository
    pub async fn health(&self) -> HealthCheckResult {
        self.repository.health_check().await
    }

    async fn find(&self, query: ProductQuery, operation: &'static str) -> Result<Vec<ProductView>, ServiceError> {
        let products = self.repository.find_products(query, Some(metadata(operation))).await?;
        Ok(products.iter().map(ProductView::from).collect())
    }

    async fn update<F>(&self, id: ProductId, operation: &'static str, apply: F) -> Result<ProductView, ServiceError>
    where
        F: FnOnce(&mut Product) -> Result<(), CatalogError>,
    {
        let mut product = self.repository.get_product(id, Some(metadata(operation))).await?;
        rejected(operation, apply(&mut product))?;
        self.persist(operation, &mut product).await?;
        Ok(ProductView::from(&product))
    }

    async fn persist(&self, operation: &'static str, product: &mut Product) -> Result<(), ServiceError> {
        self.repository.save_product(product, Some(metadata(operation))).await?;
        for event in product.take_events() {
            info!(
                product_id = %event.product_id(),
                event = event.event_type(),
                "domain event"
            );
        }
        Ok(())
    }
}

fn metadata(operation: &'static str) -> OperationMetadata {
    OperationMetadata::default().with_context("operation", operation)
}

/// Logs a rejected domain operation before handing the error back
fn rejected<T>(operation: &'static str, result: Result<T, CatalogError>) -> Result<T, CatalogError> {
    if let Err(error) = &result {
        warn!(operation, reasons = ?error.reasons(), "operation rejected");
    }
    result
}
