//! Profit and loss statement

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use shared::{GeneralCost, Order, ReportingPeriod};

use super::{orders_in_period, ReportingService};
use crate::services::ingredient::CostWarning;
use crate::services::order_costing::CostTotals;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitAndLoss {
    pub period: Option<ReportingPeriod>,
    pub order_count: usize,
    pub gross_revenue: Decimal,
    pub materials_cost: Decimal,
    pub labour_cost: Decimal,
    pub commissions: Decimal,
    /// Revenue minus material, labour and commission
    pub operating_profit: Decimal,
    pub general_costs: Decimal,
    pub general_costs_by_category: BTreeMap<String, Decimal>,
    pub net_profit: Decimal,
    /// Net profit over gross revenue, in percent with two decimals; 0 without revenue
    pub net_margin_percent: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CostWarning>,
}

/// Net margin in percent, zero when there is no revenue
pub fn net_margin_percent(net_profit: Decimal, gross_revenue: Decimal) -> Decimal {
    if gross_revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (net_profit / gross_revenue * Decimal::ONE_HUNDRED).round_dp(2)
}

impl<'a> ReportingService<'a> {
    /// P&L over the period's orders
    ///
    /// Recurring general costs count in every period, one-time costs only in
    /// the month of their date. Without a period every order and every
    /// general cost is included.
    pub fn profit_and_loss(
        &self,
        orders: &[Order],
        general_costs: &[GeneralCost],
        period: Option<ReportingPeriod>,
    ) -> ProfitAndLoss {
        let mut totals = CostTotals::default();
        let mut warnings = BTreeSet::new();
        let mut order_count = 0;

        for costing in self.costing.cost_orders(orders_in_period(orders, period)) {
            totals += costing.totals;
            warnings.extend(costing.warnings);
            order_count += 1;
        }

        let mut general_costs_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for cost in general_costs
            .iter()
            .filter(|cost| period.map_or(true, |p| cost.applies_to(&p)))
        {
            *general_costs_by_category
                .entry(cost.category.clone())
                .or_default() += cost.amount;
        }
        let general: Decimal = general_costs_by_category.values().copied().sum();

        let operating_profit = totals.contribution();
        let net_profit = operating_profit - general;

        ProfitAndLoss {
            period,
            order_count,
            gross_revenue: totals.revenue,
            materials_cost: totals.material_cost,
            labour_cost: totals.labour_cost,
            commissions: totals.commission,
            operating_profit,
            general_costs: general,
            general_costs_by_category,
            net_profit,
            net_margin_percent: net_margin_percent(net_profit, totals.revenue),
            warnings: warnings.into_iter().collect(),
        }
    }
}
