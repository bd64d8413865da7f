//! Order builder: the cart of one session
//!
//! Absence of a key encodes quantity zero; a line never exists with
//! quantity below one.

use serde::{Deserialize, Serialize};
use shared::{CartKey, ItemId, Price, SizeLabel, SnapshotLine, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;

use super::catalog::Catalog;

/// One priced, quantified row in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: CartKey,
    pub item_name: String,
    pub size_label: Option<SizeLabel>,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    pub fn display_name(&self) -> String {
        match &self.size_label {
            Some(size) => format!("{} ({size})", self.item_name),
            None => self.item_name.clone(),
        }
    }

    pub fn to_snapshot_line(&self) -> SnapshotLine {
        SnapshotLine {
            display_key: self.key.to_string(),
            display_name: self.display_name(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            line_total: self.line_total(),
        }
    }
}

/// Result of taking one unit off a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No such line; nothing changed
    Absent,
    /// Quantity went down and the line is still present
    Decremented { remaining: u32 },
    /// Quantity reached zero and the line was deleted
    Removed,
}

pub struct OrderBuilder {
    catalog: Arc<Catalog>,
    lines: HashMap<CartKey, CartLine>,
    /// Keys in first-insertion order, for stable display
    order: Vec<CartKey>,
}

impl OrderBuilder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            lines: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Add one unit of an unsized item.
    ///
    /// Price comes from the catalog base price, then `price_override`,
    /// then zero for unknown items.
    pub fn add_unit_item(&mut self, item: &ItemId, price_override: Option<Price>) -> CartLine {
        let entry = self.catalog.lookup(item);
        let name = entry
            .map(|entry| entry.display_name.clone())
            .unwrap_or_else(|| item.to_string());
        let price = entry
            .and_then(|entry| entry.base_price)
            .or(price_override)
            .unwrap_or(Price::ZERO);

        self.insert_line(CartKey::unit(item), name, None, price)
    }

    /// Take one unit off the unsized line for `item`
    pub fn remove_unit_item(&mut self, item: &ItemId) -> RemoveOutcome {
        self.remove_by_key(&CartKey::unit(item))
    }

    /// Take one unit off any line
    pub fn remove_by_key(&mut self, key: &CartKey) -> RemoveOutcome {
        let Some(line) = self.lines.get_mut(key) else {
            return RemoveOutcome::Absent;
        };

        if line.quantity > 1 {
            line.quantity -= 1;
            return RemoveOutcome::Decremented { remaining: line.quantity };
        }

        self.lines.remove(key);
        self.order.retain(|k| k != key);
        RemoveOutcome::Removed
    }

    /// Add one unit of an item in a given size (never the quarter size;
    /// the session routes that to the quarter assembler).
    pub fn add_sized_item(
        &mut self,
        item: &ItemId,
        size: Option<&SizeLabel>,
    ) -> Result<CartLine, ValidationError> {
        let size = size.ok_or_else(|| ValidationError::NoSizeSelected { item: item.clone() })?;

        let (name, price) = match self.catalog.lookup(item) {
            Some(entry) => {
                let price = entry.size_price(size).ok_or_else(|| ValidationError::UnknownSize {
                    item: item.clone(),
                    size: size.clone(),
                })?;
                (entry.display_name.clone(), price)
            }
            None => (item.to_string(), Price::ZERO),
        };

        Ok(self.insert_line(CartKey::sized(item, size), name, Some(size.clone()), price))
    }

    /// Create the line with quantity 1 or bump an existing one
    pub fn insert_line(
        &mut self,
        key: CartKey,
        item_name: String,
        size_label: Option<SizeLabel>,
        unit_price: Price,
    ) -> CartLine {
        if let Some(line) = self.lines.get_mut(&key) {
            line.quantity += 1;
            return line.clone();
        }

        let line = CartLine {
            key: key.clone(),
            item_name,
            size_label,
            unit_price,
            quantity: 1,
        };
        self.order.push(key.clone());
        self.lines.insert(key, line.clone());
        line
    }

    /// Sum of unit price times quantity, recomputed on every call
    pub fn total(&self) -> Price {
        self.lines.values().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, for the cart badge
    pub fn line_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartLine> {
        self.lines.get(key)
    }

    /// Lines in first-insertion order
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.order.iter().filter_map(|key| self.lines.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogRecord;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn size(s: &str) -> SizeLabel {
        SizeLabel::new(s).unwrap()
    }

    fn builder() -> OrderBuilder {
        let records = vec![
            CatalogRecord {
                id: id("Margherita"),
                name: "Margherita".to_string(),
                category: "Pizzas".to_string(),
                description: None,
                price: None,
                sizes: Some("Petite 11dt - 1/4 m 12dt".to_string()),
                supplement: false,
            },
            CatalogRecord {
                id: id("coca-cola"),
                name: "Coca Cola".to_string(),
                category: "Boissons".to_string(),
                description: None,
                price: Some(Price::from_millimes(2_500)),
                sizes: None,
                supplement: false,
            },
        ];
        OrderBuilder::new(Arc::new(Catalog::from_records(records).unwrap()))
    }

    #[test]
    fn test_sized_item_twice_merges_into_one_line() {
        let mut cart = builder();
        cart.add_sized_item(&id("Margherita"), Some(&size("Petite"))).unwrap();
        let line = cart.add_sized_item(&id("Margherita"), Some(&size("Petite"))).unwrap();

        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Price::from_dinars(11));
        assert_eq!(cart.lines().count(), 1);
        assert_eq!(cart.total(), Price::from_dinars(22));
    }

    #[test]
    fn test_missing_size_leaves_cart_empty() {
        let mut cart = builder();
        let err = cart.add_sized_item(&id("Margherita"), None).unwrap_err();
        assert!(matches!(err, ValidationError::NoSizeSelected { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_size_not_offered_is_rejected() {
        let mut cart = builder();
        let err = cart.add_sized_item(&id("Margherita"), Some(&size("Large"))).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownSize { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_items_degrade_to_zero_or_override() {
        let mut cart = builder();
        let free = cart.add_unit_item(&id("mystery"), None);
        assert_eq!(free.unit_price, Price::ZERO);

        let priced = cart.add_unit_item(&id("legacy-row"), Some(Price::from_dinars(7)));
        assert_eq!(priced.unit_price, Price::from_dinars(7));

        // Catalog price wins over the override
        let cola = cart.add_unit_item(&id("coca-cola"), Some(Price::from_dinars(99)));
        assert_eq!(cola.unit_price, Price::from_millimes(2_500));
        assert_eq!(cola.item_name, "Coca Cola");
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = builder();
        let cola = id("coca-cola");
        cart.add_unit_item(&cola, None);
        cart.add_unit_item(&cola, None);

        assert_eq!(cart.remove_unit_item(&cola), RemoveOutcome::Decremented { remaining: 1 });
        assert_eq!(cart.remove_unit_item(&cola), RemoveOutcome::Removed);
        assert!(cart.get(&CartKey::unit(&cola)).is_none());
        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = builder();
        cart.add_unit_item(&id("coca-cola"), None);
        let before: Vec<CartLine> = cart.lines().cloned().collect();

        assert_eq!(cart.remove_unit_item(&id("fanta")), RemoveOutcome::Absent);
        let after: Vec<CartLine> = cart.lines().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_line_count_tracks_net_additions() {
        let mut cart = builder();
        let cola = id("coca-cola");
        let water = id("eau");
        let ops: [(bool, &ItemId); 9] = [
            (true, &cola),
            (true, &water),
            (false, &cola),
            (false, &cola),
            (false, &water),
            (false, &water),
            (true, &cola),
            (true, &cola),
            (true, &water),
        ];

        let mut expected: HashMap<ItemId, u32> = HashMap::new();
        for (add, item) in ops {
            let count = expected.entry(item.clone()).or_insert(0);
            if add {
                cart.add_unit_item(item, None);
                *count += 1;
            } else {
                cart.remove_unit_item(item);
                *count = count.saturating_sub(1);
            }
            assert_eq!(cart.line_count(), expected.values().sum::<u32>());
        }
        assert_eq!(cart.line_count(), 3);
    }

    #[test]
    fn test_total_is_recomputed_and_idempotent() {
        let mut cart = builder();
        cart.add_unit_item(&id("coca-cola"), None);
        cart.add_sized_item(&id("Margherita"), Some(&size("Petite"))).unwrap();
        cart.add_unit_item(&id("coca-cola"), None);

        let expected: Price = cart.lines().map(|l| l.unit_price * l.quantity).sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), cart.total());
        assert_eq!(cart.total(), Price::from_dinars(16));
    }

    #[test]
    fn test_colon_id_and_sized_line_stay_apart() {
        let mut cart = builder();
        cart.add_unit_item(&id("Margherita:Petite"), Some(Price::from_dinars(7)));
        let sized = cart.add_sized_item(&id("Margherita"), Some(&size("Petite"))).unwrap();

        assert_eq!(sized.quantity, 1);
        assert_eq!(sized.unit_price, Price::from_dinars(11));
        assert_eq!(sized.item_name, "Margherita");
        assert_eq!(cart.lines().count(), 2);
        assert_eq!(cart.total(), Price::from_dinars(18));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = builder();
        cart.add_unit_item(&id("b"), None);
        cart.add_unit_item(&id("a"), None);
        cart.add_unit_item(&id("b"), None);

        let keys: Vec<String> = cart.lines().map(|l| l.key.to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(
            cart.lines().next().unwrap().to_snapshot_line().line_total,
            Price::ZERO
        );
    }
}
