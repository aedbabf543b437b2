//! Shared types and models for the Aloe costing engine
//!
//! This crate contains the catalog, order and cost records exchanged between
//! the engine, the browser UI (via WASM), and the persistence layer.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
