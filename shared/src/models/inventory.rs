//! Raw-material inventory models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchased stock of raw material (e.g. 5000 ml of aloe juice for 100.00)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMaterial {
    pub id: Uuid,
    pub name: String,
    /// Unit the stock is measured in ("ml", "gr", "Unità", ...)
    pub unit: String,
    pub total_quantity: Decimal,
    /// Price paid for the whole stock
    pub total_price: Decimal,
}

impl RawMaterial {
    /// Cost of one unit of stock, zero when the stock size is not positive
    pub fn unit_cost(&self) -> Decimal {
        calculate_unit_cost(self.total_price, self.total_quantity)
    }

    /// Whether the stock can be used to derive a dynamic cost
    pub fn has_stock(&self) -> bool {
        self.total_quantity > Decimal::ZERO
    }
}

/// Calculate the per-unit cost of a stock purchase
pub fn calculate_unit_cost(total_price: Decimal, total_quantity: Decimal) -> Decimal {
    if total_quantity <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total_price / total_quantity
    }
}
