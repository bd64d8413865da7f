//! Call-to-order dialog data

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// A restaurant the customer can call to place the order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub phone: String,
}

impl Location {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(), phone: phone.into() }
    }

    /// Deep link for dialing, whitespace stripped
    pub fn tel_uri(&self) -> String {
        let digits: String = self.phone.split_whitespace().collect();
        format!("tel:{digits}")
    }
}

/// What the customer reads out when calling
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CallToOrder {
    /// e.g. "2x Margherita (Petit), 1x Coca Cola"
    pub order_text: String,
    pub total: Price,
    pub locations: Vec<Location>,
}
