//! Domain events for the product aggregate
//!
//! Events are recorded only when an operation succeeds and are drained by
//! the caller with [`crate::Product::take_events`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ProductId;

use crate::catalogs::ProductType;

/// Events emitted by the Product aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductEvent {
    /// Product was created in Draft
    ProductCreated {
        product_id: ProductId,
        product_type: ProductType,
        timestamp: DateTime<Utc>,
    },

    /// A new version was published and became the active one
    VersionPublished {
        product_id: ProductId,
        version: u32,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// An existing version was made active
    VersionActivated {
        product_id: ProductId,
        version: u32,
        timestamp: DateTime<Utc>,
    },

    /// A version was made obsolete
    VersionObsoleted {
        product_id: ProductId,
        version: u32,
        timestamp: DateTime<Utc>,
    },

    /// A version was removed from the product
    VersionDeleted {
        product_id: ProductId,
        version: u32,
        timestamp: DateTime<Utc>,
    },

    /// Product was archived
    ProductArchived {
        product_id: ProductId,
        timestamp: DateTime<Utc>,
    },

    /// Product was moved back to Draft
    ProductMovedToDraft {
        product_id: ProductId,
        timestamp: DateTime<Utc>,
    },

    /// Product type was changed
    ProductTypeChanged {
        product_id: ProductId,
        from: ProductType,
        to: ProductType,
        timestamp: DateTime<Utc>,
    },
}

impl ProductEvent {
    /// Returns the product this event belongs to
    pub fn product_id(&self) -> ProductId {
        match self {
            ProductEvent::ProductCreated { product_id, .. }
            | ProductEvent::VersionPublished { product_id, .. }
            | ProductEvent::VersionActivated { product_id, .. }
            | ProductEvent::VersionObsoleted { product_id, .. }
            | ProductEvent::VersionDeleted { product_id, .. }
            | ProductEvent::ProductArchived { product_id, .. }
            | ProductEvent::ProductMovedToDraft { product_id, .. }
            | ProductEvent::ProductTypeChanged { product_id, .. } => *product_id,
        }
    }

    /// Returns when the event occurred
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated { timestamp, .. }
            | ProductEvent::VersionPublished { timestamp, .. }
            | ProductEvent::VersionActivated { timestamp, .. }
            | ProductEvent::VersionObsoleted { timestamp, .. }
            | ProductEvent::VersionDeleted { timestamp, .. }
            | ProductEvent::ProductArchived { timestamp, .. }
            | ProductEvent::ProductMovedToDraft { timestamp, .. }
            | ProductEvent::ProductTypeChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated { .. } => "ProductCreated",
            ProductEvent::VersionPublished { .. } => "VersionPublished",
            ProductEvent::VersionActivated { .. } => "VersionActivated",
            ProductEvent::VersionObsoleted { .. } => "VersionObsoleted",
            ProductEvent::VersionDeleted { .. } => "VersionDeleted",
            ProductEvent::ProductArchived { .. } => "ProductArchived",
            ProductEvent::ProductMovedToDraft { .. } => "ProductMovedToDraft",
            ProductEvent::ProductTypeChanged { .. } => "ProductTypeChanged",
        }
    }
}
