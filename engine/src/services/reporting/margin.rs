//! Per-product unit economics

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::Product;

use super::ReportingService;
use crate::services::sync::detect_drift;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMargin {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Stored `cost_per_item`
    pub material_cost: Decimal,
    pub labour_cost: Decimal,
    pub commission: Decimal,
    pub internal_cost: Decimal,
    pub external_cost: Decimal,
    pub internal_profit: Decimal,
    pub external_profit: Decimal,
    /// Base recipe cost, when the product has a base recipe
    pub recipe_cost: Option<Decimal>,
    /// Stored cost differs from the recipe cost beyond the tolerance
    pub cost_drift: bool,
}

impl<'a> ReportingService<'a> {
    /// Margins of every catalog product, in catalog order
    pub fn product_margins(&self) -> Vec<ProductMargin> {
        self.catalog
            .products()
            .iter()
            .map(|product| self.product_margin(product))
            .collect()
    }

    pub fn product_margin(&self, product: &Product) -> ProductMargin {
        let internal_cost = product.cost_per_item + product.labour_cost;
        let external_cost = internal_cost + product.external_commission;
        let recipe_cost = self
            .costing
            .recipes()
            .base_cost(product.id)
            .map(|cost| cost.total);

        ProductMargin {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            material_cost: product.cost_per_item,
            labour_cost: product.labour_cost,
            commission: product.external_commission,
            internal_cost,
            external_cost,
            internal_profit: product.price - internal_cost,
            external_profit: product.price - external_cost,
            recipe_cost,
            cost_drift: recipe_cost.map_or(false, |recomputed| {
                detect_drift(
                    product.cost_per_item,
                    recomputed,
                    self.config.sync.drift_tolerance,
                )
            }),
        }
    }
}
