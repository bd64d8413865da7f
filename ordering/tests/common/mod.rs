//! Common test utilities and infrastructure
//!
//! Shared catalogs, builders and assertion helpers used across the ordering
//! test suites.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{DeskBuilder, RecordingPresenter, TestHelpers};
