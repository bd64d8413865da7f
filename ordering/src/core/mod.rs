//! Core ordering logic
//!
//! Pure, synchronous business rules with no I/O: the catalog, the cart, the
//! quarter-pizza assembler and the session that ties them together.

pub mod cart;
pub mod catalog;
pub mod policy;
pub mod quarter;
pub mod session;

pub use cart::{CartLine, OrderBuilder, RemoveOutcome};
pub use catalog::{Catalog, CatalogItem, CatalogRecord};
pub use policy::{CombinationPolicy, Tier};
pub use quarter::{AssemblerState, CombinedPizza, PendingSlice, PendingState, QuarterAssembler};
pub use session::{OrderSession, SizedOutcome};
