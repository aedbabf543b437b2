//! Domain models for the Aloe costing engine

mod catalog;
mod directory;
mod general_cost;
mod inventory;
mod order;
mod recipe;

pub use catalog::*;
pub use directory::*;
pub use general_cost::*;
pub use inventory::*;
pub use order::*;
pub use recipe::*;
