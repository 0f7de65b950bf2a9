use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest quantity a basket line can carry.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity a basket line can carry.
pub const MAX_QUANTITY: u32 = 999;

/// A product from the catalog.
///
/// Identity is `id`; `name` is what gets matched against price-feed labels
/// (case-insensitive, whitespace-normalized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,
    /// Display name, also the matching key against feed labels.
    pub name: String,
    /// Optional category hint.
    pub category: Option<String>,
}

/// A retail chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Derived identifier (see [`Store::from_name`]).
    pub id: String,
    /// Chain name as reported by the feed.
    pub name: String,
}

impl Store {
    /// Builds a store from its chain name.
    ///
    /// The id is the lower-cased name with whitespace runs collapsed to a
    /// single underscore. Two chains with the same normalized name collide
    /// into one store id.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let id = name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        Self {
            id,
            name: name.trim().to_string(),
        }
    }
}

/// One line of the user's basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    /// Product this line refers to.
    pub product_id: String,
    /// Product name, kept for feed lookups keyed by label.
    pub name: String,
    /// Units of the product, always within [`MIN_QUANTITY`]..=[`MAX_QUANTITY`].
    pub quantity: u32,
}

impl BasketItem {
    /// Creates a basket line, clamping the quantity into the valid range.
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity: quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
        }
    }

    /// Replaces the quantity, clamped into the valid range.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.clamp(MIN_QUANTITY, MAX_QUANTITY);
    }
}

/// A single observation in a product's price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Observed price.
    pub value: Decimal,
}

/// Price history for one product.
///
/// Points need not be contiguous or evenly spaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSeries {
    /// Catalog id of the product.
    pub product_id: String,
    /// Product name, used as the column key in merged tables.
    pub product_name: String,
    /// Unit the prices are quoted in (e.g. "$/kilo").
    pub unit: String,
    /// Sparse, irregular observations.
    pub points: Vec<SeriesPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_id_is_lowercased_and_underscored() {
        let store = Store::from_name("Lider Express");
        assert_eq!(store.id, "lider_express");
        assert_eq!(store.name, "Lider Express");
    }

    #[test]
    fn store_ids_collide_for_same_normalized_name() {
        assert_eq!(
            Store::from_name("JUMBO  Norte").id,
            Store::from_name("jumbo norte").id
        );
    }

    #[test]
    fn basket_quantity_is_clamped() {
        assert_eq!(BasketItem::new("p1", "Arroz", 0).quantity, 1);
        assert_eq!(BasketItem::new("p1", "Arroz", 5).quantity, 5);
        assert_eq!(BasketItem::new("p1", "Arroz", 5000).quantity, 999);

        let mut item = BasketItem::new("p1", "Arroz", 3);
        item.set_quantity(0);
        assert_eq!(item.quantity, 1);
    }
}
