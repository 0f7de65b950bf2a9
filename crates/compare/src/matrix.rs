//! Sparse store-by-product price table.
//!
//! Absence of an entry means "unknown", never zero. A zero (or negative)
//! upstream price is dropped on insert so it cannot count toward
//! comparisons; whether a genuinely free product should survive this rule
//! is an open business question.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Sparse `product_id -> store_id -> price` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceMatrix {
    entries: HashMap<String, HashMap<String, Decimal>>,
}

impl PriceMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a price for a product/store pair, replacing any prior entry.
    ///
    /// Non-positive prices clear the pair instead: the feed reports 0 when
    /// it has no data, and that must stay distinct from a real price.
    pub fn insert(&mut self, product_id: &str, store_id: &str, price: Decimal) {
        if price > Decimal::ZERO {
            self.entries
                .entry(product_id.to_string())
                .or_default()
                .insert(store_id.to_string(), price);
        } else {
            debug!(product_id, store_id, %price, "dropping non-positive price as unknown");
            if let Some(row) = self.entries.get_mut(product_id) {
                row.remove(store_id);
            }
        }
    }

    /// Price for a product at a store, if known.
    #[must_use]
    pub fn price(&self, product_id: &str, store_id: &str) -> Option<Decimal> {
        self.entries.get(product_id)?.get(store_id).copied()
    }

    /// Known prices for one product, keyed by store id.
    #[must_use]
    pub fn product_prices(&self, product_id: &str) -> Option<&HashMap<String, Decimal>> {
        self.entries.get(product_id)
    }

    /// Removes every entry for a product.
    pub fn clear_product(&mut self, product_id: &str) {
        self.entries.remove(product_id);
    }

    /// Removes every entry for a store across all products.
    pub fn clear_store(&mut self, store_id: &str) {
        for row in self.entries.values_mut() {
            row.remove(store_id);
        }
    }

    /// Keeps only the rows of products still present in `product_ids`.
    pub fn retain_products(&mut self, product_ids: &[String]) {
        self.entries.retain(|id, _| product_ids.iter().any(|p| p == id));
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn insert_and_lookup() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("p1", "s1", dec!(990));
        assert_eq!(matrix.price("p1", "s1"), Some(dec!(990)));
        assert_eq!(matrix.price("p1", "s2"), None);
    }

    #[test]
    fn zero_price_clears_the_pair() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("p1", "s1", dec!(990));
        matrix.insert("p1", "s1", Decimal::ZERO);
        assert_eq!(matrix.price("p1", "s1"), None);
    }

    #[test]
    fn negative_price_is_never_stored() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("p1", "s1", dec!(-10));
        assert_eq!(matrix.price("p1", "s1"), None);
    }

    #[test]
    fn refresh_replaces_the_pair() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("p1", "s1", dec!(990));
        matrix.insert("p1", "s1", dec!(1050));
        assert_eq!(matrix.price("p1", "s1"), Some(dec!(1050)));
    }

    #[test]
    fn retain_products_drops_stale_rows() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("p1", "s1", dec!(100));
        matrix.insert("p2", "s1", dec!(200));
        matrix.retain_products(&["p2".to_string()]);
        assert_eq!(matrix.price("p1", "s1"), None);
        assert_eq!(matrix.price("p2", "s1"), Some(dec!(200)));
    }
}
