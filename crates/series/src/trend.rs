//! Scalar KPIs derived from a merged series table.

use crate::merger::MergedRow;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product with the greatest first-to-last relative rise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMover {
    /// Product name, `"-"` when there is nothing to rank.
    pub name: String,
    /// `(last - first) / first` as a fraction.
    pub change: f64,
}

impl Default for TopMover {
    fn default() -> Self {
        Self {
            name: "-".to_string(),
            change: 0.0,
        }
    }
}

/// KPIs over a merged table.
///
/// The averages treat a missing cell as 0 — a deliberate lossy
/// simplification carried over from the dashboard this feeds, kept rather
/// than silently "fixed" so the KPI cards agree with what users saw before.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Mean of the last row's values across the compared products.
    pub latest_average: Decimal,
    /// Relative change of that mean between the first and last row.
    pub variation: f64,
    /// Mean, over products, of each column's `max - min`.
    pub average_volatility: Decimal,
    /// Product with the greatest relative rise.
    pub top_mover: TopMover,
}

/// Per-product relative change between the first and last row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChange {
    pub name: String,
    /// Percent change, rounded to two decimals.
    pub change_percent: f64,
}

/// A product's slice of the latest period's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductShare {
    pub name: String,
    /// Last row's value.
    pub value: Decimal,
    /// Fraction of the last row's total across products.
    pub share: f64,
}

fn cell_or_zero(row: &MergedRow, name: &str) -> Decimal {
    row.value(name).unwrap_or(Decimal::ZERO)
}

fn ratio(delta: Decimal, base: Decimal) -> f64 {
    if base.is_zero() {
        0.0
    } else {
        (delta / base).to_f64().unwrap_or(0.0)
    }
}

/// Derives the four dashboard KPIs from a merged table.
#[must_use]
pub fn summarize(rows: &[MergedRow], product_names: &[String]) -> TrendSummary {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return TrendSummary::default();
    };
    if product_names.is_empty() {
        return TrendSummary::default();
    }
    let count = Decimal::from(product_names.len() as u64);

    let first_average = product_names
        .iter()
        .map(|name| cell_or_zero(first, name))
        .sum::<Decimal>()
        / count;
    let latest_average = product_names
        .iter()
        .map(|name| cell_or_zero(last, name))
        .sum::<Decimal>()
        / count;
    let variation = ratio(latest_average - first_average, first_average);

    let average_volatility = product_names
        .iter()
        .map(|name| {
            let column: Vec<Decimal> = rows.iter().filter_map(|row| row.value(name)).collect();
            match (column.iter().min(), column.iter().max()) {
                (Some(min), Some(max)) => *max - *min,
                _ => Decimal::ZERO,
            }
        })
        .sum::<Decimal>()
        / count;

    let top_mover = product_names
        .iter()
        .map(|name| TopMover {
            name: name.clone(),
            change: ratio(
                cell_or_zero(last, name) - cell_or_zero(first, name),
                cell_or_zero(first, name),
            ),
        })
        // Strict comparison keeps the earliest product on ties.
        .fold(TopMover::default(), |acc, candidate| {
            if acc.name == "-" || candidate.change > acc.change {
                candidate
            } else {
                acc
            }
        });

    TrendSummary {
        latest_average,
        variation,
        average_volatility,
        top_mover,
    }
}

/// Per-product percent change, sorted by greatest rise first.
#[must_use]
pub fn per_product_change(rows: &[MergedRow], product_names: &[String]) -> Vec<ProductChange> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Vec::new();
    };

    let mut changes: Vec<ProductChange> = product_names
        .iter()
        .map(|name| {
            let change = ratio(
                cell_or_zero(last, name) - cell_or_zero(first, name),
                cell_or_zero(first, name),
            ) * 100.0;
            ProductChange {
                name: name.clone(),
                change_percent: (change * 100.0).round() / 100.0,
            }
        })
        .collect();
    changes.sort_by(|a, b| {
        b.change_percent
            .partial_cmp(&a.change_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    changes
}

/// The last row's positive values with their share of the row total.
#[must_use]
pub fn latest_shares(rows: &[MergedRow], product_names: &[String]) -> Vec<ProductShare> {
    let Some(last) = rows.last() else {
        return Vec::new();
    };

    let values: Vec<(String, Decimal)> = product_names
        .iter()
        .filter_map(|name| {
            let value = last.value(name)?;
            (value > Decimal::ZERO).then(|| (name.clone(), value))
        })
        .collect();
    let total: Decimal = values.iter().map(|(_, v)| *v).sum();

    values
        .into_iter()
        .map(|(name, value)| ProductShare {
            name,
            value,
            share: ratio(value, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rust_decimal_macros::dec;

    fn row(period: &str, cells: &[(&str, Decimal)]) -> MergedRow {
        MergedRow {
            period: period.to_string(),
            cells: cells
                .iter()
                .map(|&(name, value)| (name.to_string(), value))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample_rows() -> Vec<MergedRow> {
        vec![
            row("2024-01", &[("Arroz", dec!(100)), ("Pan", dec!(50))]),
            row("2024-02", &[("Arroz", dec!(90)), ("Pan", dec!(60))]),
            row("2024-03", &[("Arroz", dec!(120)), ("Pan", dec!(55))]),
        ]
    }

    #[test]
    fn latest_average_and_variation() {
        let summary = summarize(&sample_rows(), &names(&["Arroz", "Pan"]));
        // last row mean: (120 + 55) / 2
        assert_eq!(summary.latest_average, dec!(87.5));
        // first row mean 75 -> (87.5 - 75) / 75
        assert!((summary.variation - 12.5 / 75.0).abs() < 1e-12);
    }

    #[test]
    fn volatility_averages_column_ranges() {
        let summary = summarize(&sample_rows(), &names(&["Arroz", "Pan"]));
        // Arroz range 30, Pan range 10
        assert_eq!(summary.average_volatility, dec!(20));
    }

    #[test]
    fn top_mover_prefers_greatest_rise() {
        let summary = summarize(&sample_rows(), &names(&["Arroz", "Pan"]));
        assert_eq!(summary.top_mover.name, "Arroz");
        assert!((summary.top_mover.change - 0.2).abs() < 1e-12);
    }

    #[test]
    fn top_mover_ties_break_by_input_order() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(100)), ("Pan", dec!(50))]),
            row("2024-02", &[("Arroz", dec!(110)), ("Pan", dec!(55))]),
        ];
        let summary = summarize(&rows, &names(&["Arroz", "Pan"]));
        assert_eq!(summary.top_mover.name, "Arroz");
    }

    #[test]
    fn empty_inputs_yield_the_sentinel() {
        let summary = summarize(&[], &names(&["Arroz"]));
        assert_eq!(summary.top_mover.name, "-");
        assert_eq!(summary.top_mover.change, 0.0);
        assert_eq!(summary.latest_average, Decimal::ZERO);

        let summary = summarize(&sample_rows(), &[]);
        assert_eq!(summary.top_mover.name, "-");
        assert_eq!(summary.variation, 0.0);
    }

    #[test]
    fn missing_cells_count_as_zero_in_the_averages() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(100))]),
            row("2024-02", &[("Arroz", dec!(90)), ("Pan", dec!(60))]),
        ];
        let summary = summarize(&rows, &names(&["Arroz", "Pan"]));
        assert_eq!(summary.latest_average, dec!(75));
    }

    #[test]
    fn product_with_no_cells_contributes_zero_volatility() {
        let rows = vec![row("2024-01", &[("Arroz", dec!(100))])];
        let summary = summarize(&rows, &names(&["Arroz", "Pan"]));
        assert_eq!(summary.average_volatility, Decimal::ZERO);
    }

    #[test]
    fn per_product_change_sorts_descending() {
        let changes = per_product_change(&sample_rows(), &names(&["Arroz", "Pan"]));
        assert_eq!(changes[0].name, "Arroz");
        assert_eq!(changes[0].change_percent, 20.0);
        assert_eq!(changes[1].name, "Pan");
        assert_eq!(changes[1].change_percent, 10.0);
    }

    #[test]
    fn latest_shares_skip_absent_and_non_positive_cells() {
        let rows = vec![row(
            "2024-03",
            &[("Arroz", dec!(120)), ("Pan", dec!(0))],
        )];
        let shares = latest_shares(&rows, &names(&["Arroz", "Pan", "Leche"]));
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].name, "Arroz");
        assert!((shares[0].share - 1.0).abs() < 1e-12);
    }
}
