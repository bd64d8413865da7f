//! Trait definitions with mockall annotations for testing
//!
//! The desk talks to the outside world through these seams: a presenter
//! that displays order state and notifications, and a source of catalog
//! records.

use shared::{CallToOrder, Notice, OrderSnapshot};

use crate::core::{Catalog, CatalogRecord};
use crate::error::OrderingResult;

/// Display abstraction for the order summary and user notifications
///
/// Implementations decide the channel (terminal, toast, inline text); the
/// desk only decides *what* to show.
#[mockall::automock]
pub trait Presenter: Send + Sync {
    /// Redraw the order summary after a mutation or on request
    fn render(&self, snapshot: &OrderSnapshot);

    /// Surface a success, info or validation message
    fn notify(&self, notice: &Notice);

    /// List the menu by category
    fn show_menu(&self, catalog: &Catalog);

    /// Show the call-to-order dialog
    fn show_call_to_order(&self, call: &CallToOrder);
}

/// Source of catalog records, loaded once at process start
#[mockall::automock]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every record of the catalog table
    async fn load_records(&self) -> OrderingResult<Vec<CatalogRecord>>;

    /// Human-readable origin, for logging
    fn describe(&self) -> String;
}
