//! Test fixtures and data for ordering tests

use ordering::Catalog;
use shared::{ItemId, Price};
use std::sync::Arc;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const MARGHERITA: &'static str = "Margherita";
    pub const TUNA: &'static str = "Tuna";
    pub const PEPPERONI: &'static str = "Pepperoni";
    pub const FOUR_CHEESE: &'static str = "four-cheese";
    pub const NEPTUNE: &'static str = "Neptune";
    pub const CALZONE: &'static str = "Calzone";
    pub const COLA: &'static str = "Cola";

    /// Fixed session id for snapshot comparisons
    pub const SESSION: &'static str = "550e8400-e29b-41d4-a716-446655440001";

    /// A small menu: quarter-capable pizzas, one pizza without a quarter
    /// size, and a plain drink
    pub const CATALOG_JSON: &'static str = r#"[
        { "id": "Margherita", "name": "Margherita", "category": "Pizzas",
          "sizes": "Petite 11dt - 1/4 m 12dt" },
        { "id": "Tuna", "name": "Tuna", "category": "Pizzas",
          "sizes": "Petite 12dt - 1/4 m 14.5dt" },
        { "id": "Pepperoni", "name": "Pepperoni", "category": "Pizzas",
          "sizes": "Petite 12dt - 1/4m 13dt" },
        { "id": "four-cheese", "name": "Four Cheese", "category": "Pizzas",
          "sizes": "Petite 13dt - 1/4m 15dt", "supplement": true },
        { "id": "Neptune", "name": "Neptune", "category": "Pizzas",
          "sizes": "Petite 14dt - 1/4m 16dt" },
        { "id": "Calzone", "name": "Calzone", "category": "Pizzas",
          "sizes": "Petite 13dt" },
        { "id": "Cola", "name": "Cola", "category": "Drinks", "price": "2.5dt" }
    ]"#;

    pub fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_json(Self::CATALOG_JSON).unwrap())
    }

    pub fn id(name: &str) -> ItemId {
        ItemId::new(name).unwrap()
    }

    pub fn dt(text: &str) -> Price {
        text.parse().unwrap()
    }

    /// Four distinct quarter-capable varieties
    pub fn four_varieties() -> Vec<ItemId> {
        [Self::MARGHERITA, Self::TUNA, Self::PEPPERONI, Self::NEPTUNE]
            .into_iter()
            .map(Self::id)
            .collect()
    }
}
