//! Unit tests for the catalog identifiers
//!
//! Tests cover creation, prefix-aware parsing, UUID conversion and JSON
//! serialization for every identifier type.

use core_kernel::{ProductId, SpecificationId, TaxonomyId, VersionProductId};
use uuid::Uuid;

mod product_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ProductId::new();
        let id2 = ProductId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ProductId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ProductId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ProductId::prefix(), "PRD");
    }

    #[test]
    fn test_display_format() {
        let id = ProductId::new();
        assert!(id.to_string().starts_with("PRD-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ProductId::new();
        let parsed: ProductId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ProductId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("PRD-not-a-uuid".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let id = ProductId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let deserialized: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod child_entity_id_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(VersionProductId::prefix(), "PVER");
        assert_eq!(SpecificationId::prefix(), "SPEC");
        assert_eq!(TaxonomyId::prefix(), "TAX");
    }

    #[test]
    fn test_round_trip_through_display() {
        let version = VersionProductId::new();
        let spec = SpecificationId::new();
        let taxonomy = TaxonomyId::new();

        assert_eq!(version, version.to_string().parse().unwrap());
        assert_eq!(spec, spec.to_string().parse().unwrap());
        assert_eq!(taxonomy, taxonomy.to_string().parse().unwrap());
    }

    #[test]
    fn test_default_generates_fresh_id() {
        assert_ne!(SpecificationId::default(), SpecificationId::default());
    }
}
