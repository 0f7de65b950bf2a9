//! Rebases a merged table to a common index (first period = 100).

use crate::merger::MergedRow;
use rust_decimal::Decimal;

const INDEX_BASE: Decimal = Decimal::ONE_HUNDRED;

/// Rebases each product column so its first-row value maps to 100.
///
/// The base is the product's value in the first input row; when the first
/// row lacks that product the current row's own value serves as base, so a
/// late-starting series opens at 100 instead of propagating NaN. A zero
/// base indexes to 0.
///
/// Row-order dependent: merge first, index second — never the reverse.
#[must_use]
pub fn to_index(rows: &[MergedRow], product_names: &[String]) -> Vec<MergedRow> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            let cells = product_names
                .iter()
                .filter_map(|name| {
                    let value = row.value(name)?;
                    let base = first.value(name).unwrap_or(value);
                    let indexed = if base.is_zero() {
                        Decimal::ZERO
                    } else {
                        value / base * INDEX_BASE
                    };
                    Some((name.clone(), indexed))
                })
                .collect();
            MergedRow {
                period: row.period.clone(),
                cells,
            }
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

    #[test]
    fn first_row_indexes_to_one_hundred() {
        let rows = vec![row("2024-01", &[("Arroz", dec!(110))])];
        let indexed = to_index(&rows, &names(&["Arroz"]));
        assert_eq!(indexed[0].value("Arroz"), Some(dec!(100)));
    }

    #[test]
    fn later_rows_scale_against_the_base() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(110))]),
            row("2024-02", &[("Arroz", dec!(80))]),
        ];
        let indexed = to_index(&rows, &names(&["Arroz"]));
        assert_eq!(indexed[0].value("Arroz"), Some(dec!(100)));
        let feb = indexed[1].value("Arroz").unwrap();
        // 80 / 110 * 100
        assert!((feb - dec!(72.7272)).abs() < dec!(0.001));
    }

    #[test]
    fn missing_base_falls_back_to_own_value() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(110))]),
            row("2024-02", &[("Arroz", dec!(80)), ("Pan", dec!(60))]),
            row("2024-03", &[("Pan", dec!(90))]),
        ];
        let indexed = to_index(&rows, &names(&["Arroz", "Pan"]));
        // Pan is absent from the first row, so its first appearance self-bases.
        assert_eq!(indexed[1].value("Pan"), Some(dec!(100)));
        assert_eq!(indexed[2].value("Pan"), Some(dec!(150)));
    }

    #[test]
    fn absent_cells_stay_absent() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(110))]),
            row("2024-02", &[("Pan", dec!(60))]),
        ];
        let indexed = to_index(&rows, &names(&["Arroz", "Pan"]));
        assert_eq!(indexed[1].value("Arroz"), None);
        assert_eq!(indexed[0].value("Pan"), None);
    }

    #[test]
    fn zero_base_indexes_to_zero() {
        let rows = vec![
            row("2024-01", &[("Arroz", dec!(0))]),
            row("2024-02", &[("Arroz", dec!(80))]),
        ];
        let indexed = to_index(&rows, &names(&["Arroz"]));
        assert_eq!(indexed[0].value("Arroz"), Some(dec!(0)));
        assert_eq!(indexed[1].value("Arroz"), Some(dec!(0)));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(to_index(&[], &names(&["Arroz"])).is_empty());
    }
}
