//! Aloe costing engine
//!
//! Turns a catalog snapshot (products, variants, recipes, raw materials) and
//! a set of orders into unit costs, production and shipping manifests,
//! procurement requirements and a profit-and-loss statement.
//!
//! Every computation is a pure function of the snapshots passed in; nothing
//! is cached between calls.

pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod telemetry;

pub use catalog::{
    Catalog, CatalogData, Directory, DirectoryData, EngineSnapshot, IndexedSnapshot, Inventory,
};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use services::*;
