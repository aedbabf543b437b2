//! Shipping manifest for orders that leave by courier

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use shared::{Order, ReportingPeriod};

use super::{orders_in_period, ReportingService, VariantLabel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentItem {
    pub product_name: String,
    pub quantity: u32,
    pub variants: Vec<VariantLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    pub order_id: Uuid,
    pub date: NaiveDate,
    pub patient_name: String,
    /// "address, city", or the no-address label when the patient is gone
    pub destination: String,
    pub seller: String,
    pub items: Vec<ShipmentItem>,
    pub total_items: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingManifest {
    pub period: Option<ReportingPeriod>,
    pub shipments: Vec<Shipment>,
    pub total_items: u64,
}

impl<'a> ReportingService<'a> {
    /// Shipping orders of the period, in order list order
    pub fn shipping_manifest(
        &self,
        orders: &[Order],
        period: Option<ReportingPeriod>,
    ) -> ShippingManifest {
        let shipments: Vec<Shipment> = orders_in_period(orders, period)
            .filter(|order| order.is_shipping)
            .map(|order| self.shipment(order))
            .collect();

        ShippingManifest {
            period,
            total_items: shipments.iter().map(|s| s.total_items).sum(),
            shipments,
        }
    }

    fn shipment(&self, order: &Order) -> Shipment {
        let patient = self.directory.patient(order.patient_id);

        Shipment {
            order_id: order.id,
            date: order.date,
            patient_name: self.patient_name(order.patient_id),
            destination: patient
                .map(|p| p.destination())
                .unwrap_or_else(|| self.labels().no_address.clone()),
            seller: self.seller_label(order),
            items: order
                .items
                .iter()
                .map(|item| ShipmentItem {
                    product_name: self.product_name(item.product_id),
                    quantity: item.quantity,
                    variants: self.variant_labels(item),
                })
                .collect(),
            total_items: order.total_items(),
        }
    }
}
