//! Catalog record sources
//!
//! The storefront menu ships embedded in the binary; a JSON file with the
//! same shape can replace it at startup.

use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::core::{Catalog, CatalogRecord};
use crate::error::{OrderingError, OrderingResult};
use crate::traits::CatalogSource;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// The menu table compiled into the binary
pub struct EmbeddedCatalog;

#[async_trait::async_trait]
impl CatalogSource for EmbeddedCatalog {
    async fn load_records(&self) -> OrderingResult<Vec<CatalogRecord>> {
        Ok(serde_json::from_str(EMBEDDED_CATALOG)?)
    }

    fn describe(&self) -> String {
        "embedded menu".to_string()
    }
}

/// A JSON catalog file on disk
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalog {
    async fn load_records(&self) -> OrderingResult<Vec<CatalogRecord>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            OrderingError::catalog(format!("cannot read {}: {e}", self.path.display()))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

/// Load and validate the process-wide catalog
pub async fn load_catalog(source: &dyn CatalogSource) -> OrderingResult<Catalog> {
    let records = source.load_records().await?;
    let catalog = Catalog::from_records(records)?;
    if catalog.is_empty() {
        return Err(OrderingError::catalog(format!("{} has no items", source.describe())));
    }
    info!("📋 Loaded {} items from {}", catalog.len(), source.describe());
    Ok(catalog)
}
