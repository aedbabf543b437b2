//! Error handling for the costing engine
//!
//! Data-quality problems in orders and recipes never surface here; they
//! degrade to neutral values inside the reports. These errors cover catalog
//! integrity, explicit cost-sync requests and host setup.

use shared::CatalogError;
use thiserror::Error;
use uuid::Uuid;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    // Catalog errors
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product {0} has no base recipe to sync from")]
    MissingRecipe(Uuid),

    // Persistence collaborator errors
    #[error("Failed to persist product cost: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    // Host setup errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
