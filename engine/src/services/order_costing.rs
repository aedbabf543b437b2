//! Revenue and cost of order lines
//!
//! Every report goes through [`OrderCostingService`] so that production,
//! profit and sales figures always agree.

use std::collections::BTreeSet;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{Order, OrderItem};

use crate::catalog::Catalog;
use crate::services::ingredient::CostWarning;
use crate::services::recipe::RecipeCostCalculator;
use crate::services::sync::detect_drift;

/// Money columns shared by lines, orders and reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostTotals {
    pub revenue: Decimal,
    pub material_cost: Decimal,
    pub labour_cost: Decimal,
    pub commission: Decimal,
}

impl CostTotals {
    /// Material, labour and commission together
    pub fn total_cost(&self) -> Decimal {
        self.material_cost + self.labour_cost + self.commission
    }

    /// Revenue left after variable costs
    pub fn contribution(&self) -> Decimal {
        self.revenue - self.total_cost()
    }
}

impl Add for CostTotals {
    type Output = CostTotals;

    fn add(self, other: CostTotals) -> CostTotals {
        CostTotals {
            revenue: self.revenue + other.revenue,
            material_cost: self.material_cost + other.material_cost,
            labour_cost: self.labour_cost + other.labour_cost,
            commission: self.commission + other.commission,
        }
    }
}

impl AddAssign for CostTotals {
    fn add_assign(&mut self, other: CostTotals) {
        *self = *self + other;
    }
}

impl Sum for CostTotals {
    fn sum<I: Iterator<Item = CostTotals>>(iter: I) -> Self {
        iter.fold(CostTotals::default(), Add::add)
    }
}

/// Where a line's base material cost came from
///
/// Matched variant recipes are added on top of either source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCostSource {
    /// The product's base recipe
    BaseRecipe,
    /// Stored `cost_per_item`, the product has no base recipe
    StoredCost,
    /// Product no longer in the catalog; line costs nothing
    MissingProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCosting {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Material cost of one unit
    pub unit_material_cost: Decimal,
    pub totals: CostTotals,
    pub material_source: MaterialCostSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CostWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCosting {
    pub order_id: Uuid,
    pub lines: Vec<LineCosting>,
    pub totals: CostTotals,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CostWarning>,
}

/// Stored order commission compared with the product-derived one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionReconciliation {
    pub order_id: Uuid,
    pub stored: Decimal,
    pub recomputed: Decimal,
    pub difference: Decimal,
    pub mismatch: bool,
}

/// Costs order lines against a catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct OrderCostingService<'a> {
    catalog: &'a Catalog,
    recipes: RecipeCostCalculator<'a>,
}

impl<'a> OrderCostingService<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            recipes: RecipeCostCalculator::new(catalog),
        }
    }

    pub fn recipes(&self) -> &RecipeCostCalculator<'a> {
        &self.recipes
    }

    /// Cost a single order line
    ///
    /// Unit material cost is the base recipe cost (or the stored
    /// `cost_per_item` without one) plus every matched variant recipe.
    /// Gifts earn no revenue but carry full material and labour cost.
    /// Commission applies to every external order, gift or not.
    pub fn cost_line(&self, item: &OrderItem, order: &Order) -> LineCosting {
        let Some(product) = self.catalog.product(item.product_id) else {
            tracing::debug!(
                order_id = %order.id,
                product_id = %item.product_id,
                "Product not found, line costed at zero"
            );
            return LineCosting {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_material_cost: Decimal::ZERO,
                totals: CostTotals::default(),
                material_source: MaterialCostSource::MissingProduct,
                warnings: Vec::new(),
            };
        };

        let quantity = item.quantity_decimal();
        let recipe_cost = self
            .recipes
            .cost_for_selection(product.id, &item.selected_modifiers);

        let (base_cost, material_source) = if recipe_cost.has_base_recipe {
            (recipe_cost.base, MaterialCostSource::BaseRecipe)
        } else {
            (product.cost_per_item, MaterialCostSource::StoredCost)
        };
        let unit_material_cost = base_cost + recipe_cost.variants;

        let revenue = if order.is_free {
            Decimal::ZERO
        } else {
            product.price * quantity
        };

        let commission = if order.is_external {
            product.external_commission * quantity
        } else {
            Decimal::ZERO
        };

        LineCosting {
            product_id: product.id,
            quantity: item.quantity,
            unit_material_cost,
            totals: CostTotals {
                revenue,
                material_cost: unit_material_cost * quantity,
                labour_cost: product.labour_cost * quantity,
                commission,
            },
            material_source,
            warnings: recipe_cost.warnings,
        }
    }

    /// Cost every line of an order
    pub fn cost_order(&self, order: &Order) -> OrderCosting {
        let lines: Vec<LineCosting> = order
            .items
            .iter()
            .map(|item| self.cost_line(item, order))
            .collect();

        let totals = lines.iter().map(|line| line.totals).sum();
        let warnings: BTreeSet<CostWarning> = lines
            .iter()
            .flat_map(|line| line.warnings.iter().cloned())
            .collect();

        OrderCosting {
            order_id: order.id,
            lines,
            totals,
            warnings: warnings.into_iter().collect(),
        }
    }

    pub fn cost_orders<'o, I>(&self, orders: I) -> Vec<OrderCosting>
    where
        I: IntoIterator<Item = &'o Order>,
    {
        orders
            .into_iter()
            .map(|order| self.cost_order(order))
            .collect()
    }

    /// Commission owed on an order according to current product data
    pub fn recomputed_commission(&self, order: &Order) -> Decimal {
        order
            .items
            .iter()
            .map(|item| self.cost_line(item, order).totals.commission)
            .sum()
    }

    /// Compare the order's stored commission with the recomputed one
    pub fn reconcile_commission(&self, order: &Order, tolerance: Decimal) -> CommissionReconciliation {
        let recomputed = self.recomputed_commission(order);
        CommissionReconciliation {
            order_id: order.id,
            stored: order.commission,
            recomputed,
            difference: order.commission - recomputed,
            mismatch: detect_drift(order.commission, recomputed, tolerance),
        }
    }
}
