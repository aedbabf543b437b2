//! Patient and salesperson directory records
//!
//! Only the fields the reports print are modelled here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient (customer) an order is delivered to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Shipping destination as printed on the manifest ("Via Roma 1, Bari")
    pub fn destination(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }
}

/// A third-party salesperson earning commission on external orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Salesperson {
    pub id: Uuid,
    pub name: String,
}
