//! Raw-material procurement requirements
//!
//! Order-driven: every ingredient line of every applied recipe is multiplied
//! by the ordered quantity and grouped by `(name, unit)`. Lines with the same
//! name in different units stay separate.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use shared::{Order, ReportingPeriod};

use super::{orders_in_period, ReportingService};
use crate::services::ingredient::CostWarning;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequirement {
    pub name: String,
    pub unit: String,
    /// Total in the recipe unit
    pub quantity: Decimal,
    pub cost: Decimal,
    /// At least one contributing line is linked to a raw material
    pub is_raw_material: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcurementReport {
    pub period: Option<ReportingPeriod>,
    /// Sorted by name, then unit
    pub materials: Vec<MaterialRequirement>,
    pub total_cost: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CostWarning>,
}

impl<'a> ReportingService<'a> {
    /// What must be bought to fulfil the period's orders
    pub fn material_procurement(
        &self,
        orders: &[Order],
        period: Option<ReportingPeriod>,
    ) -> ProcurementReport {
        let recipes = self.costing.recipes();
        let resolver = recipes.resolver();
        let mut totals: BTreeMap<(String, String), MaterialRequirement> = BTreeMap::new();
        let mut warnings = BTreeSet::new();

        for order in orders_in_period(orders, period) {
            for item in &order.items {
                let quantity = item.quantity_decimal();
                let applied = recipes.applied_recipes(item.product_id, &item.selected_modifiers);

                for line in applied.lines() {
                    let resolved = resolver.resolve_cost(line);
                    if let Some(warning) = resolved.warning {
                        warnings.insert(warning);
                    }

                    let entry = totals
                        .entry((line.name.clone(), line.unit.clone()))
                        .or_insert_with(|| MaterialRequirement {
                            name: line.name.clone(),
                            unit: line.unit.clone(),
                            quantity: Decimal::ZERO,
                            cost: Decimal::ZERO,
                            is_raw_material: false,
                        });

                    entry.quantity += line.quantity * quantity;
                    entry.cost += resolved.cost * quantity;
                    entry.is_raw_material |= line.is_raw_material_linked();
                }
            }
        }

        let materials: Vec<MaterialRequirement> = totals.into_values().collect();
        ProcurementReport {
            period,
            total_cost: materials.iter().map(|m| m.cost).sum(),
            materials,
            warnings: warnings.into_iter().collect(),
        }
    }
}
