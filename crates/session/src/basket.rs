//! Basket comparison session.
//!
//! Owns the basket lines, the enabled-store selection and the price matrix,
//! and enforces the lifecycle rules around them: any change to the basket or
//! the store selection clears the matrix (stale prices must not leak into a
//! new comparison), and a lookup response only commits when its generation
//! is still current.

use feria_compare::{product_min_max, summarize, BasketSummary, PriceMatrix, PriceSpread};
use feria_core::{BasketItem, Product, Store};
use feria_feed::{find_product, PriceQuote};
use tracing::{debug, info, warn};

use crate::generation::GenerationCounter;

/// A pending compound price lookup: which labels and chains to ask for,
/// under which generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub product_labels: Vec<String>,
    pub store_names: Vec<String>,
}

/// State of one basket-comparison session.
#[derive(Debug, Default)]
pub struct BasketSession {
    catalog: Vec<Product>,
    stores: Vec<Store>,
    items: Vec<BasketItem>,
    enabled: Vec<String>,
    matrix: PriceMatrix,
    generations: GenerationCounter,
    max_items: usize,
}

impl BasketSession {
    #[must_use]
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            ..Self::default()
        }
    }

    /// Replaces the product catalog. Basket lines whose product vanished
    /// from the catalog are dropped, along with their prices.
    pub fn set_catalog(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
        let catalog = &self.catalog;
        self.items
            .retain(|item| catalog.iter().any(|p| p.id == item.product_id));
        let keep: Vec<String> = self.items.iter().map(|i| i.product_id.clone()).collect();
        self.matrix.retain_products(&keep);
    }

    /// Replaces the store list and resets the selection to the first
    /// `default_enabled` stores.
    pub fn set_stores(&mut self, stores: Vec<Store>, default_enabled: usize) {
        self.enabled = stores
            .iter()
            .take(default_enabled)
            .map(|s| s.id.clone())
            .collect();
        self.stores = stores;
        self.invalidate();
    }

    /// Adds a product to the basket with quantity 1.
    ///
    /// Returns false when the product is unknown, already present, or the
    /// basket is full.
    pub fn add_item(&mut self, product_id: &str) -> bool {
        if self.items.len() >= self.max_items {
            debug!(product_id, "basket full, not adding");
            return false;
        }
        if self.items.iter().any(|i| i.product_id == product_id) {
            return false;
        }
        let Some(product) = self.catalog.iter().find(|p| p.id == product_id) else {
            warn!(product_id, "product not in catalog");
            return false;
        };
        self.items
            .push(BasketItem::new(product.id.as_str(), product.name.as_str(), 1));
        self.invalidate();
        true
    }

    /// Removes a product from the basket.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() != before {
            self.invalidate();
        }
    }

    /// Sets a line's quantity (clamped into the valid range).
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.set_quantity(quantity);
        }
    }

    /// Empties the basket.
    pub fn clear_basket(&mut self) {
        self.items.clear();
        self.invalidate();
    }

    /// Enables or disables a store, preserving first-seen order.
    pub fn toggle_store(&mut self, store_id: &str) {
        if let Some(pos) = self.enabled.iter().position(|id| id == store_id) {
            self.enabled.remove(pos);
        } else if self.stores.iter().any(|s| s.id == store_id) {
            self.enabled.push(store_id.to_string());
        } else {
            warn!(store_id, "unknown store");
            return;
        }
        self.invalidate();
    }

    /// Restricts the comparison to a single store.
    pub fn select_single_store(&mut self, store_id: &str) {
        if self.stores.iter().any(|s| s.id == store_id) {
            self.enabled = vec![store_id.to_string()];
            self.invalidate();
        }
    }

    /// Whether a compound lookup should fire at all: both the basket and
    /// the store selection must be non-empty.
    #[must_use]
    pub fn wants_lookup(&self) -> bool {
        !self.items.is_empty() && !self.enabled.is_empty()
    }

    /// Opens a new lookup generation for the current basket and selection.
    ///
    /// Returns `None` when there is nothing to look up.
    pub fn begin_lookup(&mut self) -> Option<LookupRequest> {
        if !self.wants_lookup() {
            return None;
        }
        let generation = self.generations.advance();
        Some(LookupRequest {
            generation,
            product_labels: self.items.iter().map(|i| i.name.clone()).collect(),
            store_names: self
                .stores
                .iter()
                .filter(|s| self.enabled.contains(&s.id))
                .map(|s| s.name.clone())
                .collect(),
        })
    }

    /// Commits a lookup response into the matrix.
    ///
    /// A response from a superseded generation is discarded (returns
    /// false): a fast filter change must never be overwritten by a slow,
    /// stale answer. Quotes are matched back to the catalog by label and
    /// to stores by derived id; unmatched quotes are dropped.
    pub fn commit_prices(&mut self, generation: u64, quotes: &[PriceQuote]) -> bool {
        if !self.generations.is_current(generation) {
            info!(
                generation,
                current = self.generations.current(),
                "discarding stale price response"
            );
            return false;
        }

        for quote in quotes {
            let Some(product) = find_product(&self.catalog, &quote.product_label) else {
                debug!(label = %quote.product_label, "quote label not in catalog");
                continue;
            };
            let store_id = Store::from_name(&quote.store_name).id;
            self.matrix.insert(&product.id, &store_id, quote.price);
        }
        true
    }

    /// Compares the basket across the enabled stores from current state.
    #[must_use]
    pub fn comparison(&self) -> BasketSummary {
        summarize(&self.matrix, &self.items, &self.enabled)
    }

    /// Cheapest/dearest known price for one basket product.
    #[must_use]
    pub fn price_spread(&self, product_id: &str) -> Option<PriceSpread> {
        product_min_max(&self.matrix, product_id, &self.enabled)
    }

    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    #[must_use]
    pub fn enabled_stores(&self) -> &[String] {
        &self.enabled
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    // A basket or selection change invalidates every price on file; the
    // next lookup generation repopulates the matrix.
    fn invalidate(&mut self) {
        self.matrix.clear();
        self.generations.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: "prod_0".to_string(),
                name: "Arroz Grado 1kg".to_string(),
                category: Some("arroz".to_string()),
            },
            Product {
                id: "prod_1".to_string(),
                name: "Leche Entera 1l".to_string(),
                category: Some("leche".to_string()),
            },
        ]
    }

    fn stores() -> Vec<Store> {
        vec![Store::from_name("Lider"), Store::from_name("Santa Isabel")]
    }

    fn quote(label: &str, store: &str, price: rust_decimal::Decimal) -> PriceQuote {
        PriceQuote {
            product_label: label.to_string(),
            store_name: store.to_string(),
            price,
            promo: None,
        }
    }

    fn loaded_session() -> BasketSession {
        let mut session = BasketSession::new(10);
        session.set_catalog(catalog());
        session.set_stores(stores(), 3);
        session
    }

    #[test]
    fn add_item_dedupes_and_respects_the_limit() {
        let mut session = BasketSession::new(1);
        session.set_catalog(catalog());
        session.set_stores(stores(), 3);

        assert!(session.add_item("prod_0"));
        assert!(!session.add_item("prod_0"));
        assert!(!session.add_item("prod_1"));
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn lookup_requires_basket_and_stores() {
        let mut session = loaded_session();
        assert!(session.begin_lookup().is_none());

        session.add_item("prod_0");
        let request = session.begin_lookup().unwrap();
        assert_eq!(request.product_labels, vec!["Arroz Grado 1kg".to_string()]);
        assert_eq!(
            request.store_names,
            vec!["Lider".to_string(), "Santa Isabel".to_string()]
        );

        session.toggle_store("lider");
        session.toggle_store("santa_isabel");
        assert!(session.begin_lookup().is_none());
    }

    #[test]
    fn commit_populates_the_matrix_and_comparison() {
        let mut session = loaded_session();
        session.add_item("prod_0");
        let request = session.begin_lookup().unwrap();

        let committed = session.commit_prices(
            request.generation,
            &[
                quote("arroz grado 1kg", "Lider", dec!(1000)),
                quote("arroz grado 1kg", "Santa Isabel", dec!(1200)),
            ],
        );
        assert!(committed);

        let summary = session.comparison();
        assert_eq!(summary.best.as_ref().unwrap().store_id, "lider");
        assert_eq!(summary.savings, dec!(200));
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut session = loaded_session();
        session.add_item("prod_0");
        let stale = session.begin_lookup().unwrap();
        // A newer lookup supersedes the one in flight.
        let fresh = session.begin_lookup().unwrap();

        assert!(!session.commit_prices(stale.generation, &[quote(
            "arroz grado 1kg",
            "Lider",
            dec!(999)
        )]));
        assert!(session.commit_prices(fresh.generation, &[quote(
            "arroz grado 1kg",
            "Lider",
            dec!(1000)
        )]));
        assert_eq!(
            session.comparison().best.as_ref().unwrap().total,
            dec!(1000)
        );
    }

    #[test]
    fn basket_change_clears_prices_and_supersedes_lookups() {
        let mut session = loaded_session();
        session.add_item("prod_0");
        let request = session.begin_lookup().unwrap();
        session.commit_prices(
            request.generation,
            &[quote("arroz grado 1kg", "Lider", dec!(1000))],
        );

        session.add_item("prod_1");
        // Prices on file are gone and the old generation can no longer commit.
        let summary = session.comparison();
        assert_eq!(summary.best.as_ref().unwrap().total, dec!(0));
        assert!(!session.commit_prices(request.generation, &[]));
    }

    #[test]
    fn zero_priced_quotes_never_reach_the_comparison() {
        let mut session = loaded_session();
        session.add_item("prod_0");
        let request = session.begin_lookup().unwrap();
        session.commit_prices(
            request.generation,
            &[
                quote("arroz grado 1kg", "Lider", dec!(0)),
                quote("arroz grado 1kg", "Santa Isabel", dec!(1200)),
            ],
        );

        let spread = session.price_spread("prod_0").unwrap();
        assert_eq!(spread.min_store, "santa_isabel");
        assert_eq!(spread.max_store, "santa_isabel");
    }
}
