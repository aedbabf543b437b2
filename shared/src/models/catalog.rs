//! Product catalog models

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of mutually exclusive variant options (e.g. "Formato": Small, Big)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModifierGroup {
    pub id: Uuid,
    pub name: String,
    /// Option labels, unique within the group, in display order
    pub options: Vec<String>,
}

/// Custom SKU table: SKU -> (group name -> option)
pub type VariantSkuMap = BTreeMap<String, BTreeMap<String, String>>;

/// A sellable product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// SKUs defined by hand for specific variant combinations (e.g. Shopify variants)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variant_skus: VariantSkuMap,
    pub price: Decimal,
    /// Stored material cost; may drift from the recipe until synced
    pub cost_per_item: Decimal,
    pub labour_cost: Decimal,
    /// Paid per unit to the salesperson on external orders
    #[serde(default)]
    pub external_commission: Decimal,
    #[serde(default)]
    pub modifier_group_ids: Vec<Uuid>,
}

impl Product {
    /// Explicit SKU if set, otherwise one derived from the name
    pub fn base_sku(&self, max_len: usize) -> String {
        match self.sku.as_deref().map(str::trim) {
            Some(sku) if !sku.is_empty() => sku.to_string(),
            _ => generate_base_sku(&self.name, max_len),
        }
    }
}

/// Generate a base SKU from a product name
///
/// Uppercases, drops anything that is not an ASCII letter, digit or space,
/// turns whitespace runs into `-` and truncates to `max_len` characters.
pub fn generate_base_sku(name: &str, max_len: usize) -> String {
    let cleaned: String = name
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(max_len)
        .collect()
}

/// SKU fragment for a single variant option ("Small" -> "SMA")
pub fn option_sku_prefix(option: &str, len: usize) -> String {
    option
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(len)
        .collect()
}
