//! Stored cost synchronisation
//!
//! A product's `cost_per_item` is a stored snapshot of its base recipe cost.
//! When raw-material prices move, the two drift apart. Sync is always an
//! explicit call; nothing here runs on its own.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::SyncConfig;
use crate::error::{EngineError, EngineResult};
use crate::services::recipe::RecipeCostCalculator;

/// Persistence collaborator that owns product records
pub trait ProductCostStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new `cost_per_item` for a product
    fn update_product_cost(
        &mut self,
        product_id: Uuid,
        cost_per_item: Decimal,
    ) -> Result<(), Self::Error>;
}

/// Whether two costs are further apart than `tolerance`
pub fn detect_drift(stored: Decimal, recomputed: Decimal, tolerance: Decimal) -> bool {
    (stored - recomputed).abs() > tolerance
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostDrift {
    pub product_id: Uuid,
    pub product_name: String,
    pub stored: Decimal,
    pub recomputed: Decimal,
    pub difference: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSyncOutcome {
    pub product_id: Uuid,
    pub previous: Decimal,
    pub synced: Decimal,
    /// Previous value was outside the tolerance
    pub drifted: bool,
}

/// Recomputes stored product costs from base recipes
#[derive(Debug, Clone, Copy)]
pub struct CostSyncService<'a> {
    catalog: &'a Catalog,
    recipes: RecipeCostCalculator<'a>,
    tolerance: Decimal,
}

impl<'a> CostSyncService<'a> {
    pub fn new(catalog: &'a Catalog, config: &SyncConfig) -> Self {
        Self {
            catalog,
            recipes: RecipeCostCalculator::new(catalog),
            tolerance: config.drift_tolerance,
        }
    }

    /// Base recipe cost of a product with no variant selected
    pub fn recompute(&self, product_id: Uuid) -> EngineResult<Decimal> {
        self.catalog
            .product(product_id)
            .ok_or(EngineError::ProductNotFound(product_id))?;

        self.recipes
            .base_cost(product_id)
            .map(|cost| cost.total)
            .ok_or(EngineError::MissingRecipe(product_id))
    }

    /// Drift of one product, `None` when within tolerance
    pub fn drift(&self, product_id: Uuid) -> EngineResult<Option<CostDrift>> {
        let recomputed = self.recompute(product_id)?;
        let product = self
            .catalog
            .product(product_id)
            .ok_or(EngineError::ProductNotFound(product_id))?;

        if !detect_drift(product.cost_per_item, recomputed, self.tolerance) {
            return Ok(None);
        }

        Ok(Some(CostDrift {
            product_id,
            product_name: product.name.clone(),
            stored: product.cost_per_item,
            recomputed,
            difference: product.cost_per_item - recomputed,
        }))
    }

    /// Every product with a base recipe whose stored cost has drifted
    pub fn drifted_products(&self) -> Vec<CostDrift> {
        self.catalog
            .products()
            .iter()
            .filter(|product| self.catalog.base_recipe(product.id).is_some())
            .filter_map(|product| self.drift(product.id).ok().flatten())
            .collect()
    }

    /// Recompute a product's cost and write it through the store
    ///
    /// The value is written even when within tolerance, so repeated calls
    /// leave the store in the same state.
    pub fn sync_product_cost<S>(&self, product_id: Uuid, store: &mut S) -> EngineResult<CostSyncOutcome>
    where
        S: ProductCostStore,
    {
        let synced = self.recompute(product_id)?;
        let previous = self
            .catalog
            .product(product_id)
            .map(|product| product.cost_per_item)
            .ok_or(EngineError::ProductNotFound(product_id))?;

        store
            .update_product_cost(product_id, synced)
            .map_err(|e| EngineError::Store(Box::new(e)))?;

        let drifted = detect_drift(previous, synced, self.tolerance);
        tracing::info!(
            product_id = %product_id,
            previous = %previous,
            synced = %synced,
            drifted,
            "Product cost synced"
        );

        Ok(CostSyncOutcome {
            product_id,
            previous,
            synced,
            drifted,
        })
    }

    /// Sync every drifted product, stopping at the first store failure
    pub fn sync_drifted<S>(&self, store: &mut S) -> EngineResult<Vec<CostSyncOutcome>>
    where
        S: ProductCostStore,
    {
        self.drifted_products()
            .into_iter()
            .map(|drift| self.sync_product_cost(drift.product_id, store))
            .collect()
    }
}

/// In-memory store, handy for previews and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCostStore {
    pub costs: BTreeMap<Uuid, Decimal>,
    pub writes: usize,
}

impl ProductCostStore for MemoryCostStore {
    type Error = std::convert::Infallible;

    fn update_product_cost(
        &mut self,
        product_id: Uuid,
        cost_per_item: Decimal,
    ) -> Result<(), Self::Error> {
        self.costs.insert(product_id, cost_per_item);
        self.writes += 1;
        Ok(())
    }
}
