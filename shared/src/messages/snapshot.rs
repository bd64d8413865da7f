//! Read-only cart view

use serde::{Deserialize, Serialize};

use crate::types::{Price, SessionId};

/// One rendered cart row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SnapshotLine {
    /// Rendered line key; `remove` accepts it back
    pub display_key: String,
    pub display_name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Everything a presenter needs to draw the order summary
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderSnapshot {
    pub session_id: SessionId,
    pub lines: Vec<SnapshotLine>,
    pub total: Price,
    /// Sum of quantities, used for the cart badge
    pub item_count: u32,
    /// Varieties waiting to be combined into a meter pizza
    pub pending_quarters: Vec<String>,
}

impl OrderSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
