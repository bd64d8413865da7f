//! Read-only menu catalog
//!
//! Built once per process from a fixed table of records and shared across
//! sessions behind an `Arc`. Unknown ids are reported as `None`; callers
//! decide whether that degrades to a zero price.

use serde::{Deserialize, Serialize};
use shared::{parse_size_list, ItemId, Price, SizeLabel, SizeVariants};
use std::collections::HashMap;

use crate::error::{OrderingError, OrderingResult};

/// One row of the catalog table as stored in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Text size list, e.g. "Petit 9dt - Moyen 12dt - 1/4m 12dt"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default)]
    pub supplement: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub display_name: String,
    pub category: String,
    pub description: Option<String>,
    pub base_price: Option<Price>,
    pub size_variants: Option<SizeVariants>,
    pub supplement: bool,
}

impl CatalogItem {
    pub fn size_price(&self, size: &SizeLabel) -> Option<Price> {
        self.size_variants
            .as_ref()?
            .iter()
            .find(|(label, _)| label == size)
            .map(|(_, price)| *price)
    }

    pub fn has_sizes(&self) -> bool {
        self.size_variants.is_some()
    }
}

impl TryFrom<CatalogRecord> for CatalogItem {
    type Error = OrderingError;

    fn try_from(record: CatalogRecord) -> OrderingResult<Self> {
        let size_variants = record.sizes.as_deref().map(parse_size_list).transpose()?;
        if record.price.is_none() && size_variants.is_none() {
            return Err(OrderingError::catalog(format!(
                "item '{}' has neither a price nor sizes",
                record.id
            )));
        }

        Ok(Self {
            id: record.id,
            display_name: record.name,
            category: record.category,
            description: record.description,
            base_price: record.price,
            size_variants,
            supplement: record.supplement,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> OrderingResult<Self> {
        let mut catalog = Catalog::default();
        for record in records {
            let item = CatalogItem::try_from(record)?;
            if catalog.index.contains_key(&item.id) {
                return Err(OrderingError::catalog(format!("duplicate item id '{}'", item.id)));
            }
            catalog.index.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(item);
        }
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> OrderingResult<Self> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn lookup(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    /// Base price without a size, or the given size's price
    pub fn price_for(&self, id: &ItemId, size: Option<&SizeLabel>) -> Option<Price> {
        let item = self.lookup(id)?;
        match size {
            Some(size) => item.size_price(size),
            None => item.base_price,
        }
    }

    /// Exact id first, then a unique case-insensitive id, then a unique
    /// case-insensitive name. Ambiguous matches are not found.
    pub fn find(&self, query: &str) -> Option<&CatalogItem> {
        let query = query.trim();
        if let Some(item) = ItemId::new(query).ok().and_then(|id| self.lookup(&id)) {
            return Some(item);
        }
        let lowered = query.to_lowercase();
        self.unique_match(|item| item.id.as_str().to_lowercase() == lowered)
            .or_else(|| self.unique_match(|item| item.display_name.to_lowercase() == lowered))
    }

    fn unique_match(&self, matches: impl Fn(&CatalogItem) -> bool) -> Option<&CatalogItem> {
        let mut found = self.items.iter().filter(|item| matches(item));
        match (found.next(), found.next()) {
            (Some(item), None) => Some(item),
            _ => None,
        }
    }

    /// Categories in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn items_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
