//! Monthly production summary

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use shared::{Order, ReportingPeriod};

use super::{orders_in_period, ReportingService, VariantLabel};

/// One order line feeding a product's production total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionEntry {
    pub order_id: Uuid,
    pub date: NaiveDate,
    pub patient_name: String,
    pub quantity: u32,
    pub variants: Vec<VariantLabel>,
    pub seller: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: u64,
    pub breakdown: Vec<ProductionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub period: Option<ReportingPeriod>,
    /// Sorted by product name, ignoring case
    pub products: Vec<ProductionLine>,
    pub total_quantity: u64,
}

impl<'a> ReportingService<'a> {
    /// Units to produce per product, with the order lines behind them
    pub fn production_summary(
        &self,
        orders: &[Order],
        period: Option<ReportingPeriod>,
    ) -> ProductionSummary {
        let mut lines: HashMap<Uuid, ProductionLine> = HashMap::new();

        for order in orders_in_period(orders, period) {
            let patient_name = self.patient_name(order.patient_id);
            let seller = self.seller_label(order);

            for item in &order.items {
                let line = lines
                    .entry(item.product_id)
                    .or_insert_with(|| ProductionLine {
                        product_id: item.product_id,
                        product_name: self.product_name(item.product_id),
                        total_quantity: 0,
                        breakdown: Vec::new(),
                    });

                line.total_quantity += u64::from(item.quantity);
                line.breakdown.push(ProductionEntry {
                    order_id: order.id,
                    date: order.date,
                    patient_name: patient_name.clone(),
                    quantity: item.quantity,
                    variants: self.variant_labels(item),
                    seller: seller.clone(),
                });
            }
        }

        let mut products: Vec<ProductionLine> = lines.into_values().collect();
        products.sort_by_cached_key(|line| {
            (
                line.product_name.to_lowercase(),
                line.product_name.clone(),
                line.product_id,
            )
        });

        ProductionSummary {
            period,
            total_quantity: products.iter().map(|line| line.total_quantity).sum(),
            products,
        }
    }
}
