//! Menu Catalog Service
//!
//! Fixed, in-memory price list. Item names are matched exactly; the catalog
//! is the only price authority, client-submitted prices are never trusted.

use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    prices: HashMap<String, Decimal>,
}

impl MenuCatalog {
    /// Build a catalog from `(name, price)` pairs
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            prices: items.into_iter().map(|(n, p)| (n.into(), p)).collect(),
        }
    }

    /// The stock menu served when no external catalog is wired in
    pub fn default_menu() -> Self {
        Self::from_items([
            ("Burger", Decimal::from(150)),
            ("Pizza", Decimal::from(250)),
            ("Chicken Adobo", Decimal::from(120)),
            ("Sinigang", Decimal::from(150)),
            ("Tacos", Decimal::from(100)),
            ("Halo-Halo", Decimal::from(80)),
            ("Pancit Canton", Decimal::from(110)),
            ("Lechon Kawali", Decimal::from(220)),
        ])
    }

    pub fn contains(&self, item_name: &str) -> bool {
        self.prices.contains_key(item_name)
    }

    pub fn price_of(&self, item_name: &str) -> Option<Decimal> {
        self.prices.get(item_name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
