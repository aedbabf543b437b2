//! Configuration management for the costing engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with COSTING_ prefix (`__` between sections)

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::EngineResult;

/// Main engine configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Current environment (development, production)
    pub environment: String,

    /// Cost sync configuration
    pub sync: SyncConfig,

    /// Labels printed for internal orders and unresolved references
    pub labels: LabelConfig,

    /// SKU generation configuration
    pub sku: SkuConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SyncConfig {
    /// Stored and recomputed costs further apart than this have drifted
    pub drift_tolerance: Decimal,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LabelConfig {
    /// Seller label for internal orders
    pub internal: String,

    /// Seller label for external orders without a known salesperson
    pub external: String,

    /// Salesperson label in the external sales report when the agent is gone
    pub unknown_salesperson: String,

    /// Name for deleted products, patients and modifier groups
    pub unknown: String,

    /// Destination for shipments whose patient is gone
    pub no_address: String,

    /// Combination label for products without variants
    pub no_variants: String,

    /// Combination label for products whose variant groups have no options
    pub variants_not_configured: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SkuConfig {
    /// Maximum length of a name-derived base SKU
    pub base_max_len: usize,

    /// Characters taken from each option for a generated variant SKU
    pub option_prefix_len: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl EngineConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var("COSTING_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::with_defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (COSTING_ prefix)
            .add_source(
                Environment::with_prefix("COSTING")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Defaults overlaid with a TOML document
    pub fn from_toml(toml: &str) -> EngineResult<Self> {
        let config = Self::with_defaults("development")?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    fn with_defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("sync.drift_tolerance", "0.01")?
            .set_default("labels.internal", "Interno")?
            .set_default("labels.external", "Esterno")?
            .set_default("labels.unknown_salesperson", "Agente Sconosciuto")?
            .set_default("labels.unknown", "Sconosciuto")?
            .set_default("labels.no_address", "N/A")?
            .set_default("labels.no_variants", "N/A")?
            .set_default("labels.variants_not_configured", "Varianti non configurate")?
            .set_default("sku.base_max_len", 15)?
            .set_default("sku.option_prefix_len", 3)?
            .set_default("logging.filter", "costing_engine=info")?
            .set_default("logging.json", false)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            sync: SyncConfig::default(),
            labels: LabelConfig::default(),
            sku: SkuConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drift_tolerance: Decimal::new(1, 2),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            internal: "Interno".to_string(),
            external: "Esterno".to_string(),
            unknown_salesperson: "Agente Sconosciuto".to_string(),
            unknown: "Sconosciuto".to_string(),
            no_address: "N/A".to_string(),
            no_variants: "N/A".to_string(),
            variants_not_configured: "Varianti non configurate".to_string(),
        }
    }
}

impl Default for SkuConfig {
    fn default() -> Self {
        Self {
            base_max_len: 15,
            option_prefix_len: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "costing_engine=info".to_string(),
            json: false,
        }
    }
}
