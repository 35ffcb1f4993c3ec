//! Catalog and Taxonomy Tests
//!
//! Closed catalog parsing, the constraint engine tables and taxonomy
//! construction.

use domain_catalog::constraints::{self, CATEGORY_ALLOWED_FOR_TYPE, KIND_ALLOWED_FOR_CATEGORY};
use domain_catalog::{
    CatalogError, GenerationRecord, Kind, LifeCycleStatus, ProductCategory, ProductType, Taxonomy,
};

mod catalogs {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_names_are_canonical() {
        assert_eq!(
            ProductType::names(),
            vec!["VirtualMachine", "Software", "Service"]
        );
        assert_eq!(LifeCycleStatus::names(), vec!["Draft", "Active", "Archived"]);
        assert_eq!(GenerationRecord::names(), vec!["G1", "G2", "G2E", "G3"]);
    }

    #[test]
    fn test_from_str() {
        let kind: Kind = " pfsense".parse().unwrap();
        assert_eq!(kind, Kind::PfSense);
        assert!("Sparc".parse::<Kind>().is_err());
    }

    #[test]
    fn test_unknown_value_message() {
        assert_eq!(
            GenerationRecord::parse("G5").unwrap_err().to_string(),
            "Generation 'G5' was not found."
        );
    }

    proptest! {
        #[test]
        fn prop_parse_ignores_case_and_padding(
            index in 0usize..13,
            upper in any::<bool>(),
            left in 0usize..3,
            right in 0usize..3,
        ) {
            let kind = Kind::ALL[index];
            let name = if upper { kind.name().to_uppercase() } else { kind.name().to_lowercase() };
            let raw = format!("{}{}{}", " ".repeat(left), name, " ".repeat(right));
            prop_assert_eq!(Kind::parse(&raw).unwrap(), kind);
        }

        #[test]
        fn prop_unknown_names_are_rejected(raw in "[a-z]{1,3}[0-9]{2}") {
            let is_unknown = matches!(ProductCategory::parse(&raw), Err(CatalogError::UnknownValue { .. }));
            prop_assert!(is_unknown);
        }
    }
}

mod constraint_engine {
    use super::*;

    #[test]
    fn test_category_to_type_table() {
        assert_eq!(constraints::allowed_categories(ProductType::VirtualMachine), &[ProductCategory::VirtualMachine]);
        assert_eq!(constraints::allowed_categories(ProductType::Service), &[ProductCategory::Service]);
        assert_eq!(constraints::allowed_categories(ProductType::Software).len(), 5);
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(constraints::allowed_kinds(ProductCategory::Os), &[Kind::Linux, Kind::Windows]);
        assert_eq!(constraints::allowed_kinds(ProductCategory::License), &[Kind::Rds]);
        assert_eq!(constraints::allowed_kinds(ProductCategory::Vpn), &[Kind::OpenVpn]);
    }

    #[test]
    fn test_discovery_covers_every_value() {
        assert_eq!(constraints::allowed_types().len(), ProductType::ALL.len());
        assert_eq!(constraints::constrained_categories().len(), ProductCategory::ALL.len());
    }

    #[test]
    fn test_category_allowed_for_type() {
        assert!(constraints::is_category_allowed_for_type(ProductType::Software, ProductCategory::Database).is_ok());

        let error =
            constraints::is_category_allowed_for_type(ProductType::VirtualMachine, ProductCategory::Database)
                .unwrap_err();
        assert!(error.is_rule_broken(CATEGORY_ALLOWED_FOR_TYPE));
    }

    #[test]
    fn test_raw_names() {
        assert!(constraints::check_category_names("software", "vpn").is_ok());
        assert!(constraints::check_kind_names("os", "linux").is_ok());

        assert!(constraints::check_kind_names("os", "rds")
            .unwrap_err()
            .is_rule_broken(KIND_ALLOWED_FOR_CATEGORY));
        assert_eq!(
            constraints::check_category_names("", "vpn").unwrap_err(),
            CatalogError::EmptyValue { catalog: "Product type" }
        );
    }
}

mod taxonomy {
    use super::*;

    #[test]
    fn test_database_amd_is_rejected() {
        let error = Taxonomy::create(ProductCategory::Database, GenerationRecord::G1, Kind::Amd).unwrap_err();
        assert!(error.is_rule_broken(KIND_ALLOWED_FOR_CATEGORY));
    }

    #[test]
    fn test_virtual_machine_amd_is_accepted() {
        let taxonomy = Taxonomy::create(ProductCategory::VirtualMachine, GenerationRecord::G1, Kind::Amd).unwrap();
        assert_eq!(taxonomy.kind(), Kind::Amd);
    }

    #[test]
    fn test_every_allowed_pair_builds() {
        for category in ProductCategory::ALL {
            for kind in Taxonomy::allowed_kinds(*category) {
                assert!(Taxonomy::create(*category, GenerationRecord::G2E, *kind).is_ok());
            }
        }
    }

    #[test]
    fn test_from_names() {
        let taxonomy = Taxonomy::from_names("firewall", "g2e", "FIREGUARD").unwrap();
        assert_eq!(taxonomy.category(), ProductCategory::Firewall);
        assert_eq!(taxonomy.generation(), GenerationRecord::G2E);
        assert_eq!(taxonomy.kind(), Kind::FireGuard);
    }

    #[test]
    fn test_each_taxonomy_has_its_own_identity() {
        let first = Taxonomy::create(ProductCategory::Os, GenerationRecord::G1, Kind::Linux).unwrap();
        let second = Taxonomy::create(ProductCategory::Os, GenerationRecord::G1, Kind::Linux).unwrap();
        assert_ne!(first.id(), second.id());
    }
}
