//! Service implementations
//!
//! Real implementations of the desk's trait seams.

pub mod catalog_source;
pub mod console_presenter;

// Re-export all service implementations
pub use catalog_source::{load_catalog, EmbeddedCatalog, FileCatalog};
pub use console_presenter::{ConsolePresenter, OutputFormat};
