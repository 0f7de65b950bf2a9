//! Merges independent per-product price series into one row-per-period table.

use chrono::{Datelike, NaiveDate};
use feria_core::ProductSeries;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Period width used to bucket series points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Month,
    Year,
}

impl Granularity {
    /// Truncates a calendar day to its period key.
    ///
    /// Keys are zero-padded fixed-width strings (`YYYY-MM` or `YYYY`), so
    /// lexicographic order is chronological order and no date parsing is
    /// needed downstream.
    #[must_use]
    pub fn period_key(self, date: NaiveDate) -> String {
        match self {
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Year => format!("{:04}", date.year()),
        }
    }
}

/// One calendar period of the merged table.
///
/// A product's cell is present only when its series had at least one point
/// in the period; an absent cell means "no data", never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRow {
    /// Period key (`YYYY-MM` or `YYYY`).
    pub period: String,
    /// Period value per product name.
    pub cells: HashMap<String, Decimal>,
}

impl MergedRow {
    /// The cell for a product, if populated.
    #[must_use]
    pub fn value(&self, product_name: &str) -> Option<Decimal> {
        self.cells.get(product_name).copied()
    }
}

/// Merges the included series into rows keyed by calendar period.
///
/// Multiple points of one series inside a period are averaged, matching the
/// monthly-average semantics of the series feed. Rows are the union of all
/// periods across the included series, ascending.
#[must_use]
pub fn merge(
    series_list: &[ProductSeries],
    included_names: &[String],
    granularity: Granularity,
) -> Vec<MergedRow> {
    // period -> product -> (sum, count)
    let mut buckets: BTreeMap<String, HashMap<String, (Decimal, u32)>> = BTreeMap::new();

    for series in series_list {
        if !included_names.contains(&series.product_name) {
            continue;
        }
        for point in &series.points {
            let period = granularity.period_key(point.date);
            let (sum, count) = buckets
                .entry(period)
                .or_default()
                .entry(series.product_name.clone())
                .or_insert((Decimal::ZERO, 0));
            *sum += point.value;
            *count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(period, products)| MergedRow {
            period,
            cells: products
                .into_iter()
                .map(|(name, (sum, count))| (name, sum / Decimal::from(count)))
                .collect(),
        })
        .collect()
}
