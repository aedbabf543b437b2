//! Order models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product line of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Modifier group id -> chosen option; empty options mean "standard"
    #[serde(default)]
    pub selected_modifiers: BTreeMap<Uuid, String>,
}

impl OrderItem {
    /// Selections with a non-blank option, in group id order
    ///
    /// Options are returned as stored; recipes are keyed by the exact label.
    pub fn active_selections(&self) -> impl Iterator<Item = (Uuid, &str)> + '_ {
        self.selected_modifiers
            .iter()
            .filter(|(_, option)| !option.trim().is_empty())
            .map(|(group_id, option)| (*group_id, option.as_str()))
    }

    pub fn quantity_decimal(&self) -> Decimal {
        Decimal::from(self.quantity)
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "In attesa")]
    Pending,
    #[serde(alias = "Completato")]
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "In attesa"),
            OrderStatus::Completed => write!(f, "Completato"),
        }
    }
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub items: Vec<OrderItem>,
    /// Sold through a third-party salesperson
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_shipping: bool,
    /// Gift: no revenue, full cost
    #[serde(default)]
    pub is_free: bool,
    /// Commission total stored with the order at entry time
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesperson_id: Option<Uuid>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Total number of units across all lines
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
