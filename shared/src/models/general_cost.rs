//! General (overhead) cost models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ReportingPeriod;

/// A fixed or one-off business expense (rent, utilities, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralCost {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    /// Free-text category ("Affitto", "Utenze", "Altro", ...)
    pub category: String,
    pub date: NaiveDate,
    /// Recurring costs apply to every reporting period
    #[serde(default)]
    pub is_recurring: bool,
}

impl GeneralCost {
    /// Whether the cost is charged to `period`
    pub fn applies_to(&self, period: &ReportingPeriod) -> bool {
        self.is_recurring || period.contains(self.date)
    }
}
