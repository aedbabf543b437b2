//! Aggregation reports over orders and general costs
//!
//! Each report is a pure fold over the orders passed in, optionally
//! restricted to one calendar month. Dangling references never fail a
//! report; they print the configured "unknown" labels instead.

mod margin;
mod procurement;
mod production;
mod profit_loss;
mod sales;
mod shipping;

pub use margin::ProductMargin;
pub use procurement::{MaterialRequirement, ProcurementReport};
pub use production::{ProductionEntry, ProductionLine, ProductionSummary};
pub use profit_loss::ProfitAndLoss;
pub use sales::{ExternalSale, ExternalSalesReport, SalesFilter};
pub use shipping::{Shipment, ShipmentItem, ShippingManifest};

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use shared::{Order, OrderItem, ReportingPeriod};

use crate::catalog::{Catalog, Directory};
use crate::config::{EngineConfig, LabelConfig};
use crate::services::order_costing::OrderCostingService;

/// A chosen variant as printed on manifests ("Formato: Small")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantLabel {
    pub group: String,
    pub option: String,
}

impl fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group, self.option)
    }
}

/// Orders dated inside `period`, or all orders when no period is given
pub fn orders_in_period(
    orders: &[Order],
    period: Option<ReportingPeriod>,
) -> impl Iterator<Item = &Order> + '_ {
    orders
        .iter()
        .filter(move |order| period.map_or(true, |p| p.contains(order.date)))
}

/// Builds report views from catalog, directory and order snapshots
#[derive(Debug, Clone, Copy)]
pub struct ReportingService<'a> {
    catalog: &'a Catalog,
    directory: &'a Directory,
    config: &'a EngineConfig,
    costing: OrderCostingService<'a>,
}

impl<'a> ReportingService<'a> {
    pub fn new(catalog: &'a Catalog, directory: &'a Directory, config: &'a EngineConfig) -> Self {
        Self {
            catalog,
            directory,
            config,
            costing: OrderCostingService::new(catalog),
        }
    }

    fn labels(&self) -> &'a LabelConfig {
        &self.config.labels
    }

    fn product_name(&self, product_id: Uuid) -> String {
        self.catalog
            .product(product_id)
            .map(|product| product.name.clone())
            .unwrap_or_else(|| self.labels().unknown.clone())
    }

    fn patient_name(&self, patient_id: Uuid) -> String {
        self.directory
            .patient(patient_id)
            .map(|patient| patient.full_name())
            .unwrap_or_else(|| self.labels().unknown.clone())
    }

    /// Who sold the order: the salesperson for external orders, else "Interno"
    fn seller_label(&self, order: &Order) -> String {
        if !order.is_external {
            return self.labels().internal.clone();
        }
        order
            .salesperson_id
            .and_then(|id| self.directory.salesperson(id))
            .map(|salesperson| salesperson.name.clone())
            .unwrap_or_else(|| self.labels().external.clone())
    }

    /// Active selections of an item, ordered like the product's linked groups
    fn variant_labels(&self, item: &OrderItem) -> Vec<VariantLabel> {
        let active: Vec<(Uuid, &str)> = item.active_selections().collect();
        let linked: &[Uuid] = self
            .catalog
            .product(item.product_id)
            .map(|product| product.modifier_group_ids.as_slice())
            .unwrap_or_default();

        let in_product_order = linked
            .iter()
            .filter_map(|group_id| active.iter().find(|(id, _)| id == group_id));
        let unlinked = active.iter().filter(|(id, _)| !linked.contains(id));

        in_product_order
            .chain(unlinked)
            .map(|(group_id, option)| VariantLabel {
                group: self
                    .catalog
                    .modifier_group(*group_id)
                    .map(|group| group.name.clone())
                    .unwrap_or_else(|| self.labels().unknown.clone()),
                option: option.to_string(),
            })
            .collect()
    }
}
