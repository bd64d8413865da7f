//! Shared error types for the ordering system

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ItemId, SizeLabel};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid price: {input}")]
    InvalidPrice { input: String },

    #[error("Invalid size list segment '{segment}' in: {input}")]
    InvalidSizeList { input: String, segment: String },

    #[error("Invalid item id: '{input}'")]
    InvalidItemId { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

/// How far a pending quarter selection is from one combination tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub tier: SizeLabel,
    pub needed: usize,
}

/// Conditions the customer can fix; raising one never mutates the order
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please choose a size for {item}")]
    NoSizeSelected { item: ItemId },

    #[error("{item} has no '{size}' size")]
    UnknownSize { item: ItemId, size: SizeLabel },

    #[error("{item} is already part of the quarter selection")]
    DuplicateQuarterSelection { item: ItemId },

    #[error("{item} is already selected")]
    AlreadySelected { item: ItemId },

    #[error("Quarter selection is full ({max} pizzas)")]
    SelectionFull { max: usize },

    #[error("{count} quarter(s) selected: {}", describe_shortfalls(.shortfalls))]
    IncompleteSelection {
        count: usize,
        shortfalls: Vec<Shortfall>,
    },
}

impl ValidationError {
    /// Short heading suitable for a toast title
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::NoSizeSelected { .. } | ValidationError::UnknownSize { .. } => {
                "Size required"
            }
            ValidationError::DuplicateQuarterSelection { .. }
            | ValidationError::AlreadySelected { .. } => "Already selected",
            ValidationError::SelectionFull { .. } => "Selection full",
            ValidationError::IncompleteSelection { .. } => "Incomplete selection",
        }
    }
}

fn describe_shortfalls(shortfalls: &[Shortfall]) -> String {
    if shortfalls.is_empty() {
        return "no combination can be completed".to_string();
    }
    let parts: Vec<String> = shortfalls
        .iter()
        .map(|s| format!("add {} more for {}", s.needed, s.tier))
        .collect();
    parts.join(" or ")
}
