//! Excludes products with no data inside the active date window.
//!
//! Runs before merging: a zero-coverage product would otherwise inject an
//! all-absent column that indexing silently zeroes out, hiding a "no data"
//! condition the user must be told about instead.

use chrono::NaiveDate;
use feria_core::ProductSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window start {start} is after end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Inclusive calendar-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, rejecting a start after the end before any
    /// aggregation gets attempted.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::StartAfterEnd`] for an inverted range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both bounds inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Split of the compared products into covered and uncovered.
///
/// `excluded` is not an error state: callers must report those products as
/// "no data in the selected window", distinct from a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Products with at least one point inside the window, in input order.
    pub valid: Vec<String>,
    /// Products with none, in input order.
    pub excluded: Vec<String>,
}

/// Partitions the series by coverage inside the window.
///
/// Idempotent: filtering the surviving series again with the same window
/// returns the same split.
#[must_use]
pub fn filter(series_list: &[ProductSeries], window: &DateWindow) -> Coverage {
    let mut coverage = Coverage::default();

    for series in series_list {
        let covered = series.points.iter().any(|p| window.contains(p.date));
        if covered {
            coverage.valid.push(series.product_name.clone());
        } else {
            debug!(product = %series.product_name, "no points in window, excluding");
            coverage.excluded.push(series.product_name.clone());
        }
    }

    coverage
}
