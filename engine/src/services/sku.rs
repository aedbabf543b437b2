//! Variant SKU expansion
//!
//! Expands a product's linked modifier groups into one row per option
//! combination, for catalog exports and storefront imports.

use serde::Serialize;
use uuid::Uuid;

use shared::{option_sku_prefix, ModifierGroup, Product};

use crate::catalog::Catalog;
use crate::config::EngineConfig;

/// How a row's SKU was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkuOrigin {
    /// Product without variants
    Base,
    /// Base SKU plus option prefixes
    Generated,
    /// Hand-defined SKU from the product's variant table
    Custom,
    /// A linked group has no options yet
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuRow {
    /// "Small / Limone"
    pub combination: String,
    pub sku: String,
    pub origin: SkuOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSkus {
    pub product_id: Uuid,
    pub product_name: String,
    pub rows: Vec<SkuRow>,
}

/// Expands variant combinations into SKU rows
#[derive(Debug, Clone)]
pub struct VariantSkuExpander {
    base_max_len: usize,
    option_prefix_len: usize,
    no_variants_label: String,
    not_configured_label: String,
}

impl Default for VariantSkuExpander {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl VariantSkuExpander {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base_max_len: config.sku.base_max_len,
            option_prefix_len: config.sku.option_prefix_len,
            no_variants_label: config.labels.no_variants.clone(),
            not_configured_label: config.labels.variants_not_configured.clone(),
        }
    }

    /// One row per combination, groups in link order and options in group order
    pub fn expand(&self, product: &Product, linked_groups: &[&ModifierGroup]) -> Vec<SkuRow> {
        let base_sku = product.base_sku(self.base_max_len);

        if linked_groups.is_empty() {
            return vec![SkuRow {
                combination: self.no_variants_label.clone(),
                sku: base_sku,
                origin: SkuOrigin::Base,
            }];
        }

        if linked_groups.iter().any(|group| group.options.is_empty()) {
            return vec![SkuRow {
                combination: self.not_configured_label.clone(),
                sku: base_sku,
                origin: SkuOrigin::NotConfigured,
            }];
        }

        combinations(linked_groups)
            .into_iter()
            .map(|combination| {
                let label = combination
                    .iter()
                    .map(|(_, option)| option.as_str())
                    .collect::<Vec<_>>()
                    .join(" / ");

                match custom_sku(product, &combination) {
                    Some(sku) => SkuRow {
                        combination: label,
                        sku: sku.to_string(),
                        origin: SkuOrigin::Custom,
                    },
                    None => SkuRow {
                        combination: label,
                        sku: self.generated_sku(&base_sku, &combination),
                        origin: SkuOrigin::Generated,
                    },
                }
            })
            .collect()
    }

    /// Rows for every product, resolving linked groups through the catalog
    pub fn expand_catalog(&self, catalog: &Catalog) -> Vec<ProductSkus> {
        catalog
            .products()
            .iter()
            .map(|product| ProductSkus {
                product_id: product.id,
                product_name: product.name.clone(),
                rows: self.expand(product, &catalog.linked_groups(product)),
            })
            .collect()
    }

    fn generated_sku(&self, base_sku: &str, combination: &[(&ModifierGroup, &String)]) -> String {
        combination.iter().fold(base_sku.to_string(), |mut sku, (_, option)| {
            sku.push('-');
            sku.push_str(&option_sku_prefix(option, self.option_prefix_len));
            sku
        })
    }
}

/// Cartesian product of the groups' options
fn combinations<'g>(groups: &[&'g ModifierGroup]) -> Vec<Vec<(&'g ModifierGroup, &'g String)>> {
    groups.iter().fold(vec![Vec::new()], |acc, &group| {
        acc.iter()
            .flat_map(|prefix| {
                group.options.iter().map(move |option| {
                    let mut next = prefix.clone();
                    next.push((group, option));
                    next
                })
            })
            .collect()
    })
}

/// First custom SKU whose table matches every group of the combination
fn custom_sku<'p>(product: &'p Product, combination: &[(&ModifierGroup, &String)]) -> Option<&'p str> {
    product
        .variant_skus
        .iter()
        .find(|(_, options)| {
            combination
                .iter()
                .all(|(group, option)| options.get(&group.name) == Some(*option))
        })
        .map(|(sku, _)| sku.as_str())
}
