//! Indexed catalog and directory snapshots
//!
//! Collaborators hand the engine plain record lists ([`CatalogData`],
//! [`DirectoryData`]). Indexing validates them once and gives every service
//! id lookups that return `None` for dangling references.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;

use shared::{
    validate_general_cost, validate_modifier_group, validate_product, validate_raw_material,
    validate_recipe, validate_recipe_uniqueness, validate_unique_ids, CatalogError, GeneralCost,
    ModifierGroup, Order, Patient, Product, RawMaterial, Recipe, RecipeTarget, Salesperson,
};

/// Catalog and inventory records as supplied by the catalog provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub raw_materials: Vec<RawMaterial>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Patient and salesperson records used for report labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryData {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub salespersons: Vec<Salesperson>,
}

/// Everything a report needs, in one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub catalog: CatalogData,
    #[serde(default)]
    pub directory: DirectoryData,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub general_costs: Vec<GeneralCost>,
}

/// A snapshot whose catalog and directory have been validated and indexed
#[derive(Debug, Clone)]
pub struct IndexedSnapshot {
    pub catalog: Catalog,
    pub directory: Directory,
    pub orders: Vec<Order>,
    pub general_costs: Vec<GeneralCost>,
}

impl EngineSnapshot {
    /// Validate the general costs; orders need no validation
    pub fn validate_costs(&self) -> Result<(), CatalogError> {
        self.general_costs.iter().try_for_each(validate_general_cost)
    }

    /// Validate and index the snapshot for reporting
    pub fn index(self) -> EngineResult<IndexedSnapshot> {
        self.validate_costs()?;
        Ok(IndexedSnapshot {
            catalog: Catalog::new(self.catalog)?,
            directory: Directory::new(self.directory),
            orders: self.orders,
            general_costs: self.general_costs,
        })
    }
}

/// Raw-material stock indexed by id
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    materials: HashMap<Uuid, RawMaterial>,
}

impl Inventory {
    pub fn new(materials: Vec<RawMaterial>) -> Result<Self, CatalogError> {
        validate_unique_ids("raw material", materials.iter().map(|m| m.id))?;
        materials.iter().try_for_each(validate_raw_material)?;
        Ok(Self {
            materials: materials.into_iter().map(|m| (m.id, m)).collect(),
        })
    }

    pub fn get(&self, id: Uuid) -> Option<&RawMaterial> {
        self.materials.get(&id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Validated, indexed catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inventory: Inventory,
    /// Products keep provider order for exports
    products: Vec<Product>,
    product_index: HashMap<Uuid, usize>,
    modifier_groups: HashMap<Uuid, ModifierGroup>,
    base_recipes: HashMap<Uuid, Recipe>,
    /// group id -> option -> recipe
    variant_recipes: HashMap<Uuid, HashMap<String, Recipe>>,
}

impl Catalog {
    /// Validate and index a catalog snapshot
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let CatalogData {
            raw_materials,
            products,
            modifier_groups,
            recipes,
        } = data;

        validate_unique_ids("product", products.iter().map(|p| p.id))?;
        validate_unique_ids("modifier group", modifier_groups.iter().map(|g| g.id))?;
        validate_unique_ids("recipe", recipes.iter().map(|r| r.id))?;
        products.iter().try_for_each(validate_product)?;
        modifier_groups.iter().try_for_each(validate_modifier_group)?;
        recipes.iter().try_for_each(validate_recipe)?;
        validate_recipe_uniqueness(&recipes)?;

        let inventory = Inventory::new(raw_materials)?;

        let product_index = products
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id, idx))
            .collect();

        let mut base_recipes = HashMap::new();
        let mut variant_recipes: HashMap<Uuid, HashMap<String, Recipe>> = HashMap::new();
        for recipe in recipes {
            match &recipe.target {
                RecipeTarget::Product { product_id } => {
                    base_recipes.insert(*product_id, recipe);
                }
                RecipeTarget::Variant {
                    modifier_group_id,
                    modifier_option,
                } => {
                    let option = modifier_option.clone();
                    variant_recipes
                        .entry(*modifier_group_id)
                        .or_default()
                        .insert(option, recipe);
                }
            }
        }

        tracing::debug!(
            products = products.len(),
            raw_materials = inventory.len(),
            base_recipes = base_recipes.len(),
            "Catalog indexed"
        );

        Ok(Self {
            inventory,
            products,
            product_index,
            modifier_groups: modifier_groups.into_iter().map(|g| (g.id, g)).collect(),
            base_recipes,
            variant_recipes,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn raw_material(&self, id: Uuid) -> Option<&RawMaterial> {
        self.inventory.get(id)
    }

    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.product_index
            .get(&id)
            .and_then(|idx| self.products.get(*idx))
    }

    /// Products in provider order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn modifier_group(&self, id: Uuid) -> Option<&ModifierGroup> {
        self.modifier_groups.get(&id)
    }

    /// Linked modifier groups of a product in link order, skipping deleted groups
    pub fn linked_groups(&self, product: &Product) -> Vec<&ModifierGroup> {
        product
            .modifier_group_ids
            .iter()
            .filter_map(|id| self.modifier_group(*id))
            .collect()
    }

    pub fn base_recipe(&self, product_id: Uuid) -> Option<&Recipe> {
        self.base_recipes.get(&product_id)
    }

    pub fn variant_recipe(&self, modifier_group_id: Uuid, option: &str) -> Option<&Recipe> {
        self.variant_recipes
            .get(&modifier_group_id)
            .and_then(|options| options.get(option))
    }
}

/// Patients and salespersons indexed by id
#[derive(Debug, Clone, Default)]
pub struct Directory {
    patients: HashMap<Uuid, Patient>,
    salespersons: HashMap<Uuid, Salesperson>,
}

impl Directory {
    pub fn new(data: DirectoryData) -> Self {
        Self {
            patients: data.patients.into_iter().map(|p| (p.id, p)).collect(),
            salespersons: data.salespersons.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn patient(&self, id: Uuid) -> Option<&Patient> {
        self.patients.get(&id)
    }

    pub fn salesperson(&self, id: Uuid) -> Option<&Salesperson> {
        self.salespersons.get(&id)
    }
}
