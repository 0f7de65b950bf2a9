//! Time-series aggregation for price histories.
//!
//! Takes N independent per-product series (sparse, irregular dates) and
//! produces a common-axis table plus scalar KPIs:
//!
//! ```text
//! ProductSeries[]
//!       |
//!       v
//! coverage::filter     drop products with no data in the window
//!       |
//!       v
//! merger::merge        one row per calendar period, cells averaged
//!       |
//!       v
//! indexer::to_index    optional rebase to first period = 100
//!       |
//!       v
//! trend::summarize     latest average, variation, volatility, top mover
//! ```
//!
//! Coverage filtering must run before the merge; indexing must run after it
//! (the index transform is row-order dependent).

pub mod coverage;
pub mod indexer;
pub mod merger;
pub mod trend;

pub use coverage::{filter, Coverage, DateWindow, WindowError};
pub use indexer::to_index;
pub use merger::{merge, Granularity, MergedRow};
pub use trend::{
    latest_shares, per_product_change, summarize, ProductChange, ProductShare, TopMover,
    TrendSummary,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use feria_core::{ProductSeries, SeriesPoint};
    use rust_decimal_macros::dec;

    #[test]
    fn full_pipeline_filters_merges_and_indexes() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let list = vec![
            ProductSeries {
                product_id: "1".to_string(),
                product_name: "Arroz".to_string(),
                unit: "$/kilo".to_string(),
                points: vec![
                    SeriesPoint { date: date(2024, 1, 5), value: dec!(100) },
                    SeriesPoint { date: date(2024, 1, 20), value: dec!(120) },
                    SeriesPoint { date: date(2024, 2, 10), value: dec!(80) },
                ],
            },
            ProductSeries {
                product_id: "2".to_string(),
                product_name: "Pan".to_string(),
                unit: "$/kilo".to_string(),
                points: vec![SeriesPoint { date: date(2022, 6, 1), value: dec!(50) }],
            },
        ];

        let window = DateWindow::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap();
        let coverage = filter(&list, &window);
        assert_eq!(coverage.excluded, vec!["Pan".to_string()]);

        let rows = merge(&list, &coverage.valid, Granularity::Month);
        assert_eq!(rows[0].value("Arroz"), Some(dec!(110)));

        let indexed = to_index(&rows, &coverage.valid);
        assert_eq!(indexed[0].value("Arroz"), Some(dec!(100)));

        let kpis = summarize(&rows, &coverage.valid);
        assert_eq!(kpis.latest_average, dec!(80));
        assert_eq!(kpis.top_mover.name, "Arroz");
    }
}
