//! Shared types for the storefront ordering system
//!
//! Contains the value types (prices, size labels, item ids), the user-facing
//! validation taxonomy and the messages handed to whatever presents an order.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

// Re-export presenter-facing messages
pub use messages::{
    // Cart rendering
    OrderSnapshot, SnapshotLine,

    // User notifications
    Notice, NoticeLevel,

    // Call-to-order dialog
    CallToOrder, Location,
};
