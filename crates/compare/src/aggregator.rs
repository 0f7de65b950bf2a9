//! Basket totals, best/worst store and savings.
//!
//! Everything here is a pure function of the price matrix, the basket and
//! the enabled-store list. A missing price contributes 0 to a store's total
//! rather than excluding the store: a chain with no data for one item still
//! competes on the rest of the basket. That is a deliberate product rule,
//! not an accident.

use crate::matrix::PriceMatrix;
use feria_core::BasketItem;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A store's basket total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTotal {
    pub store_id: String,
    pub total: Decimal,
}

/// Outcome of comparing one basket across the enabled stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketSummary {
    /// Totals in enabled-store order.
    pub totals: Vec<StoreTotal>,
    /// Cheapest store; ties go to the first-seen store.
    pub best: Option<StoreTotal>,
    /// Most expensive store; ties go to the first-seen store.
    pub worst: Option<StoreTotal>,
    /// `worst - best`, never negative.
    pub savings: Decimal,
    /// `savings / worst` as a fraction, 0 when the worst total is 0.
    pub savings_percent: f64,
}

/// Cheapest and dearest known price for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSpread {
    pub min_store: String,
    pub min_price: Decimal,
    pub max_store: String,
    pub max_price: Decimal,
}

/// Computes each enabled store's basket total.
///
/// `quantity × price` summed over the basket; unknown prices count as 0.
/// Deterministic and side-effect free: identical inputs always produce
/// identical totals.
#[must_use]
pub fn compute_totals(
    matrix: &PriceMatrix,
    basket: &[BasketItem],
    enabled_stores: &[String],
) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = enabled_stores
        .iter()
        .map(|id| (id.clone(), Decimal::ZERO))
        .collect();

    for item in basket {
        let quantity = Decimal::from(item.quantity);
        for store_id in enabled_stores {
            let price = matrix.price(&item.product_id, store_id).unwrap_or(Decimal::ZERO);
            if let Some(total) = totals.get_mut(store_id) {
                *total += price * quantity;
            }
        }
    }

    totals
}

/// Compares the basket across the enabled stores.
#[must_use]
pub fn summarize(
    matrix: &PriceMatrix,
    basket: &[BasketItem],
    enabled_stores: &[String],
) -> BasketSummary {
    let by_store = compute_totals(matrix, basket, enabled_stores);

    let totals: Vec<StoreTotal> = enabled_stores
        .iter()
        .map(|id| StoreTotal {
            store_id: id.clone(),
            total: by_store.get(id).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();

    // Strict comparisons keep the first-seen store on ties.
    let best = totals
        .iter()
        .fold(None::<&StoreTotal>, |acc, t| match acc {
            Some(current) if current.total <= t.total => Some(current),
            _ => Some(t),
        })
        .cloned();
    let worst = totals
        .iter()
        .fold(None::<&StoreTotal>, |acc, t| match acc {
            Some(current) if current.total >= t.total => Some(current),
            _ => Some(t),
        })
        .cloned();

    let savings = match (&best, &worst) {
        (Some(b), Some(w)) => w.total - b.total,
        _ => Decimal::ZERO,
    };
    let savings_percent = match &worst {
        Some(w) if w.total > Decimal::ZERO => {
            (savings / w.total).to_f64().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    BasketSummary {
        totals,
        best,
        worst,
        savings,
        savings_percent,
    }
}

/// Totals reordered by amount; stable for equal totals.
#[must_use]
pub fn sorted_totals(summary: &BasketSummary, ascending: bool) -> Vec<StoreTotal> {
    let mut totals = summary.totals.clone();
    if ascending {
        totals.sort_by(|a, b| a.total.cmp(&b.total));
    } else {
        totals.sort_by(|a, b| b.total.cmp(&a.total));
    }
    totals
}

/// Cheapest and dearest store for one product, over enabled stores with a
/// strictly positive price. `None` when no store qualifies.
#[must_use]
pub fn product_min_max(
    matrix: &PriceMatrix,
    product_id: &str,
    enabled_stores: &[String],
) -> Option<PriceSpread> {
    let mut spread: Option<PriceSpread> = None;

    for store_id in enabled_stores {
        let Some(price) = matrix.price(product_id, store_id) else {
            continue;
        };
        if price <= Decimal::ZERO {
            continue;
        }
        match spread.as_mut() {
            None => {
                spread = Some(PriceSpread {
                    min_store: store_id.clone(),
                    min_price: price,
                    max_store: store_id.clone(),
                    max_price: price,
                });
            }
            Some(s) => {
                if price < s.min_price {
                    s.min_store = store_id.clone();
                    s.min_price = price;
                }
                if price > s.max_price {
                    s.max_store = store_id.clone();
                    s.max_price = price;
                }
            }
        }
    }

    spread
}
