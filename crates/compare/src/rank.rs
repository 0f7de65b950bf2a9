//! Maps a store total's position between the best and worst totals into a
//! discrete tier for visual coding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a total sits relative to the cheapest and dearest store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTier {
    /// Best/worst undefined (nothing to compare against).
    None,
    /// Within the cheapest band.
    Best,
    /// Mid-range.
    Fair,
    /// Within the most expensive band.
    Worst,
}

/// Cutoffs on the normalized `(total - best) / (worst - best)` ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankThresholds {
    /// Ratio at or below this is [`PriceTier::Best`].
    pub best_cutoff: f64,
    /// Ratio at or below this (but above `best_cutoff`) is [`PriceTier::Fair`].
    pub fair_cutoff: f64,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            best_cutoff: 0.2,
            fair_cutoff: 0.6,
        }
    }
}

impl RankThresholds {
    /// Classifies a total against the best and worst totals.
    ///
    /// Total function: undefined bounds yield [`PriceTier::None`], a
    /// degenerate single-value spread yields [`PriceTier::Best`] for
    /// everyone, and the ratio is clamped to [0, 1] since floating
    /// rounding can overshoot either end.
    #[must_use]
    pub fn classify(
        &self,
        total: Decimal,
        best: Option<Decimal>,
        worst: Option<Decimal>,
    ) -> PriceTier {
        let (Some(best), Some(worst)) = (best, worst) else {
            return PriceTier::None;
        };
        if best == worst {
            return PriceTier::Best;
        }

        let span = (worst - best).to_f64().unwrap_or(0.0);
        if span == 0.0 {
            return PriceTier::Best;
        }
        let ratio = ((total - best).to_f64().unwrap_or(0.0) / span).clamp(0.0, 1.0);

        if ratio <= self.best_cutoff {
            PriceTier::Best
        } else if ratio <= self.fair_cutoff {
            PriceTier::Fair
        } else {
            PriceTier::Worst
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mid_ratio_is_fair() {
        let tiers = RankThresholds::default();
        // ratio = (90 - 80) / (100 - 80) = 0.5
        assert_eq!(
            tiers.classify(dec!(90), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Fair
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        let tiers = RankThresholds::default();
        assert_eq!(
            tiers.classify(dec!(84), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Best
        );
        assert_eq!(
            tiers.classify(dec!(92), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Fair
        );
        assert_eq!(
            tiers.classify(dec!(93), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Worst
        );
    }

    #[test]
    fn undefined_bounds_yield_none() {
        let tiers = RankThresholds::default();
        assert_eq!(tiers.classify(dec!(90), None, Some(dec!(100))), PriceTier::None);
        assert_eq!(tiers.classify(dec!(90), Some(dec!(80)), None), PriceTier::None);
    }

    #[test]
    fn degenerate_spread_is_best_for_all() {
        let tiers = RankThresholds::default();
        assert_eq!(
            tiers.classify(dec!(90), Some(dec!(90)), Some(dec!(90))),
            PriceTier::Best
        );
    }

    #[test]
    fn out_of_range_totals_clamp() {
        let tiers = RankThresholds::default();
        assert_eq!(
            tiers.classify(dec!(70), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Best
        );
        assert_eq!(
            tiers.classify(dec!(130), Some(dec!(80)), Some(dec!(100))),
            PriceTier::Worst
        );
    }
}
