//! Closed value catalogs
//!
//! Each catalog is a fixed set of named tokens. Parsing a raw name trims it
//! and matches case-insensitively against the canonical names; anything else
//! is rejected with [`CatalogError::UnknownValue`]. Values serialize as their
//! canonical name.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

macro_rules! closed_catalog {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every member of the catalog, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable catalog label used in error messages
            pub const LABEL: &'static str = $label;

            /// Returns the canonical name
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Resolves a raw name to its canonical member
            ///
            /// # Errors
            ///
            /// Returns `EmptyValue` for blank input and `UnknownValue` when the
            /// trimmed, case-insensitive name is not in the catalog.
            pub fn parse(raw: &str) -> Result<Self, CatalogError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CatalogError::EmptyValue { catalog: $label });
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| CatalogError::unknown($label, raw))
            }

            /// Returns the canonical names of every member
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|member| member.name()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(de::Error::custom)
            }
        }
    };
}

closed_catalog! {
    /// What a product is sold as
    ProductType, "Product type" {
        VirtualMachine,
        Software,
        Service,
    }
}

closed_catalog! {
    /// Lifecycle status of a product
    ///
    /// ```text
    /// Draft -> Active (publish) -> Draft (all versions obsolete)
    ///                           \-> Archived (all versions obsolete)
    /// ```
    LifeCycleStatus, "Life cycle status" {
        Draft,
        Active,
        Archived,
    }
}

closed_catalog! {
    /// Category of the component a specification describes
    ProductCategory, "Product category" {
        VirtualMachine,
        Database,
        Os,
        License,
        Vpn,
        Firewall,
        Service,
    }
}

closed_catalog! {
    /// Hardware or platform generation
    GenerationRecord, "Generation" {
        G1,
        G2,
        G2E,
        G3,
    }
}

closed_catalog! {
    /// Concrete flavour within a category
    Kind, "Product kind" {
        Intel,
        Amd,
        MicrosoftStd,
        MicrosoftWeb,
        Windows,
        Linux,
        Rds,
        OpenVpn,
        PfSense,
        FireGuard,
        ServiceImplementation,
        ExtendedSupport,
        Backup,
    }
}
