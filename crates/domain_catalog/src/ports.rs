//! Catalog Domain Ports
//!
//! This module defines the persistence port for the product aggregate. The
//! aggregate is always loaded and saved as a whole graph: product, versions,
//! specifications and resources.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_catalog::ports::ProductRepository;
//! use std::sync::Arc;
//!
//! pub struct CatalogService {
//!     repository: Arc<dyn ProductRepository>,
//! }
//!
//! impl CatalogService {
//!     pub async fn archive(&self, id: ProductId) -> Result<Product, ServiceError> {
//!         let mut product = self.repository.get_product(id, None).await?;
//!         product.deactivate_product()?;
//!         self.repository.save_product(&product, None).await?;
//!         Ok(product)
//!     }
//! }
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError, ProductId};

use crate::catalogs::LifeCycleStatus;
use crate::product::Product;

/// Query parameters for finding products
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Filter by lifecycle status
    pub status: Option<LifeCycleStatus>,
    /// Inclusive lower bound on the active version's price
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the active version's price
    pub max_price: Option<Decimal>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ProductQuery {
    /// Creates a query to find by status
    pub fn by_status(status: LifeCycleStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Creates a query to find by active version price, bounds inclusive
    pub fn by_price_range(min_price: Decimal, max_price: Decimal) -> Self {
        Self {
            min_price: Some(min_price),
            max_price: Some(max_price),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Returns true if the product satisfies every filter of the query
    ///
    /// A price filter only matches products whose active version carries a
    /// specification.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(status) = self.status {
            if product.status() != status {
                return false;
            }
        }
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }

        let Some(price) = product
            .current_version()
            .and_then(|v| v.specification())
            .map(|s| s.price())
        else {
            return false;
        };
        self.min_price.map_or(true, |min| price >= min) && self.max_price.map_or(true, |max| price <= max)
    }
}

/// Persistence port for the product aggregate
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across different adapter implementations.
#[async_trait]
pub trait ProductRepository: DomainPort + HealthCheckable {
    /// Loads the full aggregate graph
    ///
    /// # Returns
    ///
    /// The product if found, or `PortError::NotFound`
    async fn get_product(
        &self,
        id: ProductId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError>;

    /// Saves the full aggregate graph as one unit, inserting or replacing
    async fn save_product(
        &self,
        product: &Product,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Deletes a product and everything it owns
    async fn delete_product(
        &self,
        id: ProductId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Checks if a product exists
    async fn exists(
        &self,
        id: ProductId,
        metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError>;

    /// Counts stored products
    async fn count(&self, metadata: Option<OperationMetadata>) -> Result<u64, PortError>;

    /// Finds products matching the query, ordered by id
    ///
    /// Stored records that no longer rehydrate into a valid aggregate are
    /// skipped and logged; `get_product` on such a record still fails.
    async fn find_products(
        &self,
        query: ProductQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Product>, PortError>;
}

/// In-memory implementation of ProductRepository for testing
///
/// Products are stored as flattened records, so every load goes through
/// rehydration.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use uuid::Uuid;

    use core_kernel::HealthCheckResult;

    use crate::records::ProductRecord;

    /// In-memory product repository
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryProductRepository {
        records: Arc<RwLock<BTreeMap<Uuid, ProductRecord>>>,
    }

    impl InMemoryProductRepository {
        /// Creates an empty repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with products for testing
        pub async fn with_products(products: Vec<Product>) -> Self {
            let repository = Self::new();
            {
                let mut records = repository.records.write().await;
                for product in products {
                    records.insert(key(product.id()), product.to_record());
                }
            }
            repository
        }

        /// Returns the stored record, bypassing rehydration
        pub async fn record(&self, id: ProductId) -> Option<ProductRecord> {
            self.records.read().await.get(&key(id)).cloned()
        }

        /// Stores a raw record, bypassing the aggregate
        pub async fn insert_record(&self, record: ProductRecord) {
            self.records.write().await.insert(key(record.id), record);
        }
    }

    fn key(id: ProductId) -> Uuid {
        *id.as_uuid()
    }

    fn rehydrate(record: ProductRecord) -> Result<Product, PortError> {
        Product::from_record(record).map_err(|e| PortError::transformation(e.to_string()))
    }

    impl DomainPort for InMemoryProductRepository {}

    #[async_trait]
    impl HealthCheckable for InMemoryProductRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-product-repository".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn get_product(
            &self,
            id: ProductId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Product, PortError> {
            let record = self
                .records
                .read()
                .await
                .get(&key(id))
                .cloned()
                .ok_or_else(|| PortError::not_found("Product", id))?;
            rehydrate(record)
        }

        async fn save_product(
            &self,
            product: &Product,
            metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            let record = product.to_record();
            tracing::debug!(
                product_id = %product.id(),
                versions = record.versions.len(),
                operation = metadata.as_ref().and_then(OperationMetadata::operation),
                "storing product record"
            );
            self.records.write().await.insert(key(product.id()), record);
            Ok(())
        }

        async fn delete_product(
            &self,
            id: ProductId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.records
                .write()
                .await
                .remove(&key(id))
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Product", id))
        }

        async fn exists(
            &self,
            id: ProductId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<bool, PortError> {
            Ok(self.records.read().await.contains_key(&key(id)))
        }

        async fn count(&self, _metadata: Option<OperationMetadata>) -> Result<u64, PortError> {
            Ok(self.records.read().await.len() as u64)
        }

        async fn find_products(
            &self,
            query: ProductQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Product>, PortError> {
            let records: Vec<ProductRecord> = self.records.read().await.values().cloned().collect();

            let mut results = Vec::new();
            for record in records {
                let id = record.id;
                match rehydrate(record) {
                    Ok(product) if query.matches(&product) => results.push(product),
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(product_id = %id, %error, "skipping unreadable product record");
                    }
                }
            }

            // Apply pagination
            let offset = query.offset.unwrap_or(0) as usize;
            let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
            Ok(results.into_iter().skip(offset).take(limit).collect())
        }
    }
}
