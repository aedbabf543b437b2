//! External sales and commissions owed to salespersons

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{Order, ReportingPeriod};

use super::{orders_in_period, ReportingService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    #[serde(default)]
    pub salesperson_id: Option<Uuid>,
    #[serde(default)]
    pub period: Option<ReportingPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalSale {
    pub order_id: Uuid,
    pub date: NaiveDate,
    pub salesperson: String,
    pub patient_name: String,
    pub is_free: bool,
    /// Zero for gifts
    pub sale_value: Decimal,
    /// From current product data, not the order's stored value
    pub commission: Decimal,
    pub stored_commission: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalSalesReport {
    pub filter: SalesFilter,
    pub sales: Vec<ExternalSale>,
    pub total_sales: Decimal,
    pub total_commissions: Decimal,
    /// Sales minus commissions owed
    pub net_retention: Decimal,
}

impl<'a> ReportingService<'a> {
    /// External orders with the commission each salesperson is owed
    pub fn external_sales(&self, orders: &[Order], filter: SalesFilter) -> ExternalSalesReport {
        let sales: Vec<ExternalSale> = orders_in_period(orders, filter.period)
            .filter(|order| order.is_external)
            .filter(|order| {
                filter
                    .salesperson_id
                    .map_or(true, |id| order.salesperson_id == Some(id))
            })
            .map(|order| {
                let totals = self.costing.cost_order(order).totals;
                ExternalSale {
                    order_id: order.id,
                    date: order.date,
                    salesperson: order
                        .salesperson_id
                        .and_then(|id| self.directory.salesperson(id))
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| self.labels().unknown_salesperson.clone()),
                    patient_name: self.patient_name(order.patient_id),
                    is_free: order.is_free,
                    sale_value: totals.revenue,
                    commission: totals.commission,
                    stored_commission: order.commission,
                    net: totals.revenue - totals.commission,
                }
            })
            .collect();

        let total_sales: Decimal = sales.iter().map(|s| s.sale_value).sum();
        let total_commissions: Decimal = sales.iter().map(|s| s.commission).sum();

        ExternalSalesReport {
            filter,
            sales,
            total_sales,
            total_commissions,
            net_retention: total_sales - total_commissions,
        }
    }
}
