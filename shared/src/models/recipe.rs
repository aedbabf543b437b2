//! Recipe models
//!
//! A recipe either belongs to a product (base recipe) or to one option of a
//! modifier group (variant recipe).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingredient requirement inside a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    /// Static cost per unit, used when no raw material is linked
    pub cost_per_unit: Decimal,
    /// Weak reference to a raw material; when it resolves it overrides `cost_per_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_material_id: Option<Uuid>,
}

impl IngredientLine {
    /// Static cost of the line, ignoring any raw-material link
    pub fn static_cost(&self) -> Decimal {
        self.quantity * self.cost_per_unit
    }

    pub fn is_raw_material_linked(&self) -> bool {
        self.raw_material_id.is_some()
    }
}

/// What a recipe is attached to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecipeTarget {
    /// Applied when a specific modifier option is selected on an order line
    Variant {
        modifier_group_id: Uuid,
        modifier_option: String,
    },
    /// Applied to every unit of the product
    Product { product_id: Uuid },
}

/// A bill of ingredients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: RecipeTarget,
    pub ingredients: Vec<IngredientLine>,
}
