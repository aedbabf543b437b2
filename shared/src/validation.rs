//! Catalog validation for the Aloe costing engine
//!
//! These checks run when a catalog snapshot is indexed. Reports assume a
//! validated catalog and never re-check it.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    GeneralCost, IngredientLine, ModifierGroup, Product, RawMaterial, Recipe, RecipeTarget,
};

/// Catalog integrity errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product {product_id} has more than one base recipe")]
    DuplicateBaseRecipe { product_id: Uuid },

    #[error("Option '{option}' of modifier group {modifier_group_id} has more than one recipe")]
    DuplicateVariantRecipe {
        modifier_group_id: Uuid,
        option: String,
    },

    #[error("Modifier group {group_id} lists option '{option}' more than once")]
    DuplicateOption { group_id: Uuid, option: String },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: Uuid },

    #[error("{field} of {owner} cannot be negative")]
    NegativeValue { field: &'static str, owner: String },

    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },
}

fn require_non_negative(
    value: Decimal,
    field: &'static str,
    owner: &str,
) -> Result<(), CatalogError> {
    if value < Decimal::ZERO {
        return Err(CatalogError::NegativeValue {
            field,
            owner: owner.to_string(),
        });
    }
    Ok(())
}

fn require_name(name: &str, kind: &'static str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName { kind });
    }
    Ok(())
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a raw-material stock record
pub fn validate_raw_material(material: &RawMaterial) -> Result<(), CatalogError> {
    require_name(&material.name, "Raw material")?;
    require_non_negative(material.total_quantity, "Total quantity", &material.name)?;
    require_non_negative(material.total_price, "Total price", &material.name)?;
    Ok(())
}

/// Validate a single ingredient requirement
pub fn validate_ingredient_line(line: &IngredientLine) -> Result<(), CatalogError> {
    require_name(&line.name, "Ingredient")?;
    require_non_negative(line.quantity, "Quantity", &line.name)?;
    require_non_negative(line.cost_per_unit, "Cost per unit", &line.name)?;
    Ok(())
}

/// Validate a modifier group (options must be unique)
pub fn validate_modifier_group(group: &ModifierGroup) -> Result<(), CatalogError> {
    require_name(&group.name, "Modifier group")?;
    let mut seen = HashSet::new();
    for option in &group.options {
        if !seen.insert(option.as_str()) {
            return Err(CatalogError::DuplicateOption {
                group_id: group.id,
                option: option.clone(),
            });
        }
    }
    Ok(())
}

/// Validate product prices and costs
pub fn validate_product(product: &Product) -> Result<(), CatalogError> {
    require_name(&product.name, "Product")?;
    require_non_negative(product.price, "Price", &product.name)?;
    require_non_negative(product.cost_per_item, "Cost per item", &product.name)?;
    require_non_negative(product.labour_cost, "Labour cost", &product.name)?;
    require_non_negative(product.external_commission, "External commission", &product.name)?;
    Ok(())
}

/// Validate a general cost entry
pub fn validate_general_cost(cost: &GeneralCost) -> Result<(), CatalogError> {
    require_name(&cost.name, "General cost")?;
    require_non_negative(cost.amount, "Amount", &cost.name)?;
    Ok(())
}

/// Validate a recipe's ingredient lines
pub fn validate_recipe(recipe: &Recipe) -> Result<(), CatalogError> {
    recipe.ingredients.iter().try_for_each(validate_ingredient_line)
}

// ============================================================================
// Collection Validations
// ============================================================================

/// At most one base recipe per product and one recipe per (group, option)
pub fn validate_recipe_uniqueness(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut targets = HashSet::new();
    for recipe in recipes {
        if !targets.insert(&recipe.target) {
            return Err(match &recipe.target {
                RecipeTarget::Product { product_id } => CatalogError::DuplicateBaseRecipe {
                    product_id: *product_id,
                },
                RecipeTarget::Variant {
                    modifier_group_id,
                    modifier_option,
                } => CatalogError::DuplicateVariantRecipe {
                    modifier_group_id: *modifier_group_id,
                    option: modifier_option.clone(),
                },
            });
        }
    }
    Ok(())
}

/// Ids must be unique within one kind of record
pub fn validate_unique_ids<I>(kind: &'static str, ids: I) -> Result<(), CatalogError>
where
    I: IntoIterator<Item = Uuid>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
