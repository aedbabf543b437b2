//! Per-unit production cost of a product and variant selection

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{IngredientLine, Recipe};

use crate::catalog::Catalog;
use crate::services::ingredient::{CostWarning, IngredientCostResolver, ResolvedCost};

/// Recipe-derived cost for one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeCost {
    /// Base recipe share, zero without a base recipe
    pub base: Decimal,
    /// Sum of matched variant recipes
    pub variants: Decimal,
    pub total: Decimal,
    pub has_base_recipe: bool,
    pub matched_variant_recipes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CostWarning>,
}

/// Recipes that apply to a product and variant selection
#[derive(Debug, Clone, Default)]
pub struct AppliedRecipes<'a> {
    pub base: Option<&'a Recipe>,
    pub variants: Vec<&'a Recipe>,
}

impl<'a> AppliedRecipes<'a> {
    /// All ingredient lines, base first, without merging duplicates
    pub fn lines(&self) -> impl Iterator<Item = &'a IngredientLine> + '_ {
        self.base
            .into_iter()
            .chain(self.variants.iter().copied())
            .flat_map(|recipe| recipe.ingredients.iter())
    }
}

/// Calculates recipe costs against a catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct RecipeCostCalculator<'a> {
    catalog: &'a Catalog,
    resolver: IngredientCostResolver<'a>,
}

impl<'a> RecipeCostCalculator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            resolver: IngredientCostResolver::new(catalog.inventory()),
        }
    }

    pub fn resolver(&self) -> &IngredientCostResolver<'a> {
        &self.resolver
    }

    /// Base recipe of the product plus every variant recipe matched by a
    /// non-blank selection; options match recipe keys exactly
    pub fn applied_recipes(
        &self,
        product_id: Uuid,
        selected_modifiers: &BTreeMap<Uuid, String>,
    ) -> AppliedRecipes<'a> {
        let catalog = self.catalog;
        let variants = selected_modifiers
            .iter()
            .filter(|(_, option)| !option.trim().is_empty())
            .filter_map(|(group_id, option)| catalog.variant_recipe(*group_id, option))
            .collect();

        AppliedRecipes {
            base: catalog.base_recipe(product_id),
            variants,
        }
    }

    /// Resolve every line of a recipe
    pub fn resolve_recipe(&self, recipe: &Recipe) -> Vec<ResolvedCost> {
        recipe
            .ingredients
            .iter()
            .map(|line| self.resolver.resolve_cost(line))
            .collect()
    }

    /// Per-unit cost of a product with the given variant selection
    pub fn cost_for_selection(
        &self,
        product_id: Uuid,
        selected_modifiers: &BTreeMap<Uuid, String>,
    ) -> RecipeCost {
        let applied = self.applied_recipes(product_id, selected_modifiers);
        let mut warnings = BTreeSet::new();

        let mut sum = |recipe: &Recipe| -> Decimal {
            self.resolve_recipe(recipe)
                .into_iter()
                .map(|resolved| {
                    if let Some(warning) = resolved.warning {
                        warnings.insert(warning);
                    }
                    resolved.cost
                })
                .sum()
        };

        let base = applied.base.map(&mut sum).unwrap_or(Decimal::ZERO);
        let variants: Decimal = applied.variants.iter().map(|recipe| sum(*recipe)).sum();

        RecipeCost {
            base,
            variants,
            total: base + variants,
            has_base_recipe: applied.base.is_some(),
            matched_variant_recipes: applied.variants.len(),
            warnings: warnings.into_iter().collect(),
        }
    }

    /// Cost of the product's base recipe alone, if it has one
    pub fn base_cost(&self, product_id: Uuid) -> Option<RecipeCost> {
        self.catalog
            .base_recipe(product_id)
            .map(|_| self.cost_for_selection(product_id, &BTreeMap::new()))
    }
}
