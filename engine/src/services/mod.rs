//! Costing and aggregation services for the Aloe engine

pub mod ingredient;
pub mod order_costing;
pub mod recipe;
pub mod reporting;
pub mod sku;
pub mod sync;
pub mod units;

pub use ingredient::{CostSource, CostWarning, IngredientCostResolver, ResolvedCost};
pub use order_costing::{
    CommissionReconciliation, CostTotals, LineCosting, MaterialCostSource, OrderCosting,
    OrderCostingService,
};
pub use recipe::{AppliedRecipes, RecipeCost, RecipeCostCalculator};
pub use reporting::{
    orders_in_period, ExternalSale, ExternalSalesReport, MaterialRequirement, ProcurementReport,
    ProductMargin, ProductionEntry, ProductionLine, ProductionSummary, ProfitAndLoss,
    ReportingService, SalesFilter, Shipment, ShipmentItem, ShippingManifest, VariantLabel,
};
pub use sku::{ProductSkus, SkuOrigin, SkuRow, VariantSkuExpander};
pub use sync::{
    detect_drift, CostDrift, CostSyncOutcome, CostSyncService, MemoryCostStore, ProductCostStore,
};
pub use units::{Conversion, ConversionAmbiguity, UnitConverter, UnitFamily};
