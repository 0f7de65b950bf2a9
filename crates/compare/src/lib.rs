//! Basket price comparison across retail chains.
//!
//! Feeds a sparse [`PriceMatrix`] plus a basket (products with quantities)
//! and an enabled-store list through a pure aggregation pipeline:
//!
//! ```text
//! PriceMatrix + basket + enabled stores
//!         |
//!         v
//! compute_totals / summarize      per-store totals, best, worst, savings
//!         |
//!         v
//! RankThresholds::classify        tier per store for visual coding
//! ```
//!
//! # Modules
//!
//! - [`matrix`]: sparse store-by-product price table
//! - [`aggregator`]: totals, best/worst store, savings, per-product spread
//! - [`rank`]: discrete price tiers
//!
//! Everything is deterministic and never panics on data content: absent or
//! invalid prices degrade to zero contribution.

pub mod aggregator;
pub mod matrix;
pub mod rank;

pub use aggregator::{
    compute_totals, product_min_max, sorted_totals, summarize, BasketSummary, PriceSpread,
    StoreTotal,
};
pub use matrix::PriceMatrix;
pub use rank::{PriceTier, RankThresholds};

#[cfg(test)]
mod tests {
    use super::*;
    use feria_core::BasketItem;
    use rust_decimal_macros::dec;

    #[test]
    fn pipeline_from_matrix_to_tier() {
        let mut matrix = PriceMatrix::new();
        matrix.insert("a", "s1", dec!(1000));
        matrix.insert("a", "s2", dec!(1200));
        let basket = vec![BasketItem::new("a", "Arroz 1kg", 1)];
        let enabled = vec!["s1".to_string(), "s2".to_string()];

        let summary = summarize(&matrix, &basket, &enabled);
        let best = summary.best.as_ref().map(|t| t.total);
        let worst = summary.worst.as_ref().map(|t| t.total);

        let tiers = RankThresholds::default();
        assert_eq!(tiers.classify(dec!(1000), best, worst), PriceTier::Best);
        assert_eq!(tiers.classify(dec!(1200), best, worst), PriceTier::Worst);
    }
}
