//! Service configuration

use serde::Deserialize;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Catalog service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Page size used when a listing does not request one
    pub default_page_size: u32,
    /// Largest page size a listing may request
    pub max_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Resolved page bounds for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl CatalogConfig {
    /// Loads configuration from the environment
    ///
    /// Reads `.env` if present, then `CATALOG_*` variables
    /// (e.g. `CATALOG_DEFAULT_PAGE_SIZE`). Unset values keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("CATALOG").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the page size limits
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(config::ConfigError::Message("page sizes must be greater than zero".to_string()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(config::ConfigError::Message(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Clamps a requested page to the configured limits
    ///
    /// Page numbers start at 1; 0 is treated as 1. A missing or zero size
    /// takes the default, and sizes above the maximum are capped.
    pub fn page(&self, number: u32, size: Option<u32>) -> Page {
        let limit = match size {
            None | Some(0) => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        };
        let offset = number.max(1).saturating_sub(1).saturating_mul(limit);
        Page { limit, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn test_default_larger_than_max_is_rejected() {
        let config = CatalogConfig {
            default_page_size: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_clamping() {
        let config = CatalogConfig::default();
        assert_eq!(config.page(1, None), Page { limit: 20, offset: 0 });
        assert_eq!(config.page(3, Some(10)), Page { limit: 10, offset: 20 });
        assert_eq!(config.page(0, Some(500)), Page { limit: 100, offset: 0 });
    }

    #[test]
    fn test_log_format_deserializes_lowercase() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let deserializer: StrDeserializer<'_, Error> = "json".into_deserializer();
        assert_eq!(LogFormat::deserialize(deserializer).unwrap(), LogFormat::Json);
    }
}
