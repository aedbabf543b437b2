//! Effective cost of a single ingredient line

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::IngredientLine;

use crate::catalog::Inventory;
use crate::services::units::UnitConverter;

/// Where a resolved cost came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    /// Linked raw material with stock on hand
    RawMaterial,
    /// Static cost per unit, no link
    Static,
    /// Link points at a raw material that no longer exists
    MissingRawMaterial,
    /// Linked raw material has zero stock, so no unit cost can be derived
    EmptyStock,
}

/// A line costed through a unit pair the converter could not relate
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CostWarning {
    pub ingredient: String,
    pub raw_material_id: Uuid,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCost {
    pub cost: Decimal,
    pub source: CostSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CostWarning>,
}

impl ResolvedCost {
    fn static_cost(line: &IngredientLine, source: CostSource) -> Self {
        Self {
            cost: line.static_cost(),
            source,
            warning: None,
        }
    }
}

/// Resolves ingredient costs against an inventory snapshot
#[derive(Debug, Clone, Copy)]
pub struct IngredientCostResolver<'a> {
    inventory: &'a Inventory,
    converter: UnitConverter,
}

impl<'a> IngredientCostResolver<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        Self {
            inventory,
            converter: UnitConverter::new(),
        }
    }

    /// Cost of one line for a single unit of the product
    ///
    /// A linked raw material with stock always wins over the static cost.
    /// Dangling links and empty stock fall back to `quantity × cost_per_unit`.
    pub fn resolve_cost(&self, line: &IngredientLine) -> ResolvedCost {
        let Some(raw_material_id) = line.raw_material_id else {
            return ResolvedCost::static_cost(line, CostSource::Static);
        };

        let Some(material) = self.inventory.get(raw_material_id) else {
            tracing::debug!(
                ingredient = %line.name,
                raw_material_id = %raw_material_id,
                "Raw material not found, using static cost"
            );
            return ResolvedCost::static_cost(line, CostSource::MissingRawMaterial);
        };

        if !material.has_stock() {
            return ResolvedCost::static_cost(line, CostSource::EmptyStock);
        }

        let (quantity, conversion) = self
            .converter
            .convert(line.quantity, &line.unit, &material.unit);

        ResolvedCost {
            cost: quantity * material.unit_cost(),
            source: CostSource::RawMaterial,
            warning: conversion.ambiguity.map(|ambiguity| CostWarning {
                ingredient: line.name.clone(),
                raw_material_id,
                from_unit: ambiguity.from_unit,
                to_unit: ambiguity.to_unit,
            }),
        }
    }
}
