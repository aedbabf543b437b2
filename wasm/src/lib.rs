//! WebAssembly bindings for the Aloe costing engine
//!
//! Every function takes JSON documents and returns a JSON document, so the
//! browser UI can cost products and build reports without a round trip:
//! - Unit conversion factors
//! - Unit cost of a product and variant selection
//! - Order costing
//! - Production, shipping, procurement and P&L reports for a month
//! - External sales, SKU expansion and product margins

use std::collections::BTreeMap;

use costing_engine::{
    Catalog, CatalogData, Directory, EngineConfig, EngineSnapshot, OrderCostingService,
    RecipeCostCalculator, ReportingService, SalesFilter, UnitConverter, VariantSkuExpander,
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use shared::{Order, ReportingPeriod};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("Aloe costing engine loaded"));
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn build_catalog(catalog_json: &str) -> Result<Catalog, String> {
    let data: CatalogData = parse("catalog", catalog_json)?;
    Catalog::new(data).map_err(|e| e.to_string())
}

fn period(year: i32, month: u32) -> Result<ReportingPeriod, String> {
    ReportingPeriod::month(year, month).ok_or_else(|| format!("Invalid month: {}", month))
}

/// Indexed snapshot ready for reporting
struct Workspace {
    catalog: Catalog,
    directory: Directory,
    orders: Vec<Order>,
    general_costs: Vec<shared::GeneralCost>,
    config: EngineConfig,
}

impl Workspace {
    fn from_json(snapshot_json: &str) -> Result<Self, String> {
        let snapshot: EngineSnapshot = parse("snapshot", snapshot_json)?;
        let indexed = snapshot.index().map_err(|e| e.to_string())?;
        Ok(Self {
            catalog: indexed.catalog,
            directory: indexed.directory,
            orders: indexed.orders,
            general_costs: indexed.general_costs,
            config: EngineConfig::default(),
        })
    }

    fn reports(&self) -> ReportingService<'_> {
        ReportingService::new(&self.catalog, &self.directory, &self.config)
    }
}

#[derive(Serialize)]
struct FactorResult {
    factor: Decimal,
    ambiguous: bool,
}

// ============================================================================
// Costing
// ============================================================================

fn unit_factor_json(from_unit: &str, to_unit: &str) -> Result<String, String> {
    let conversion = UnitConverter::new().factor(from_unit, to_unit);
    render(&FactorResult {
        factor: conversion.factor,
        ambiguous: !conversion.is_exact(),
    })
}

fn unit_cost_json(catalog_json: &str, product_id: &str, selection_json: &str) -> Result<String, String> {
    let catalog = build_catalog(catalog_json)?;
    let product_id = Uuid::parse_str(product_id).map_err(|e| format!("Invalid product id: {}", e))?;
    let selection: BTreeMap<Uuid, String> = if selection_json.trim().is_empty() {
        BTreeMap::new()
    } else {
        parse("selection", selection_json)?
    };

    render(&RecipeCostCalculator::new(&catalog).cost_for_selection(product_id, &selection))
}

fn cost_order_json(catalog_json: &str, order_json: &str) -> Result<String, String> {
    let catalog = build_catalog(catalog_json)?;
    let order: Order = parse("order", order_json)?;
    render(&OrderCostingService::new(&catalog).cost_order(&order))
}

// ============================================================================
// Reports
// ============================================================================

fn production_summary_json(snapshot_json: &str, year: i32, month: u32) -> Result<String, String> {
    let workspace = Workspace::from_json(snapshot_json)?;
    let period = period(year, month)?;
    render(&workspace.reports().production_summary(&workspace.orders, Some(period)))
}

fn shipping_manifest_json(snapshot_json: &str, year: i32, month: u32) -> Result<String, String> {
    let workspace = Workspace::from_json(snapshot_json)?;
    let period = period(year, month)?;
    render(&workspace.reports().shipping_manifest(&workspace.orders, Some(period)))
}

fn material_procurement_json(snapshot_json: &str, year: i32, month: u32) -> Result<String, String> {
    let workspace = Workspace::from_json(snapshot_json)?;
    let period = period(year, month)?;
    render(&workspace.reports().material_procurement(&workspace.orders, Some(period)))
}

fn profit_and_loss_json(snapshot_json: &str, year: i32, month: u32) -> Result<String, String> {
    let workspace = Workspace::from_json(snapshot_json)?;
    let period = period(year, month)?;
    render(&workspace.reports().profit_and_loss(
        &workspace.orders,
        &workspace.general_costs,
        Some(period),
    ))
}

fn external_sales_json(snapshot_json: &str, filter_json: &str) -> Result<String, String> {
    let workspace = Workspace::from_json(snapshot_json)?;
    let filter: SalesFilter = if filter_json.trim().is_empty() {
        SalesFilter::default()
    } else {
        parse("filter", filter_json)?
    };
    render(&workspace.reports().external_sales(&workspace.orders, filter))
}

fn expand_skus_json(catalog_json: &str) -> Result<String, String> {
    let catalog = build_catalog(catalog_json)?;
    render(&VariantSkuExpander::new(&EngineConfig::default()).expand_catalog(&catalog))
}

fn product_margins_json(catalog_json: &str) -> Result<String, String> {
    let catalog = build_catalog(catalog_json)?;
    let directory = Directory::default();
    let config = EngineConfig::default();
    render(&ReportingService::new(&catalog, &directory, &config).product_margins())
}

// ============================================================================
// JavaScript Exports
// ============================================================================

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

/// Conversion factor between two units, `{"factor": "1000", "ambiguous": false}`
#[wasm_bindgen]
pub fn unit_conversion_factor(from_unit: &str, to_unit: &str) -> Result<String, JsValue> {
    to_js(unit_factor_json(from_unit, to_unit))
}

/// Per-unit recipe cost of a product with a `{groupId: option}` selection
#[wasm_bindgen]
pub fn unit_cost(catalog_json: &str, product_id: &str, selection_json: &str) -> Result<String, JsValue> {
    to_js(unit_cost_json(catalog_json, product_id, selection_json))
}

/// Revenue and cost breakdown of one order
#[wasm_bindgen]
pub fn cost_order(catalog_json: &str, order_json: &str) -> Result<String, JsValue> {
    to_js(cost_order_json(catalog_json, order_json))
}

#[wasm_bindgen]
pub fn production_summary(snapshot_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    to_js(production_summary_json(snapshot_json, year, month))
}

#[wasm_bindgen]
pub fn shipping_manifest(snapshot_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    to_js(shipping_manifest_json(snapshot_json, year, month))
}

#[wasm_bindgen]
pub fn material_procurement(snapshot_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    to_js(material_procurement_json(snapshot_json, year, month))
}

#[wasm_bindgen]
pub fn profit_and_loss(snapshot_json: &str, year: i32, month: u32) -> Result<String, JsValue> {
    to_js(profit_and_loss_json(snapshot_json, year, month))
}

/// External sales, optionally filtered by `{"salesperson_id", "period"}`
#[wasm_bindgen]
pub fn external_sales(snapshot_json: &str, filter_json: &str) -> Result<String, JsValue> {
    to_js(external_sales_json(snapshot_json, filter_json))
}

#[wasm_bindgen]
pub fn expand_skus(catalog_json: &str) -> Result<String, JsValue> {
    to_js(expand_skus_json(catalog_json))
}

#[wasm_bindgen]
pub fn product_margins(catalog_json: &str) -> Result<String, JsValue> {
    to_js(product_margins_json(catalog_json))
}

/// Current month in the browser's local time, as `YYYY-MM`
#[wasm_bindgen]
pub fn current_period_label() -> String {
    let now = js_sys::Date::new_0();
    ReportingPeriod::month(now.get_full_year() as i32, now.get_month() + 1)
        .map(|period| period.label())
        .unwrap_or_default()
}
