//! Storefront ordering library
//!
//! Turns a customer's selections (unit items, sized items, quarter-pizza
//! slices) into a priced order, validates each step, and hands the result
//! to a presenter and a call-to-order dialog.

pub mod command;
pub mod config;
pub mod core;
pub mod desk;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use command::Command;
pub use config::{ConfigOverrides, DeskConfig};
pub use core::{Catalog, CombinationPolicy, OrderBuilder, OrderSession, QuarterAssembler};
pub use desk::{OrderDesk, OrderEvent};
pub use error::{OrderingError, OrderingResult};
pub use traits::{CatalogSource, Presenter};
