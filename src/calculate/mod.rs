//! Statistics calculation engine.
//!
//! Pure functions over already-materialized match results:
//! - Filter composition
//! - Per-player aggregation (win rate, streaks, medians, trends)
//! - Records and ratings across players
//! - Rolling history and day-to-day progress
//! - Scoreline prediction
//!
//! Rates and averages go through `Decimal` and are rounded half-up before
//! being exposed as `f64`, so repeated aggregations never drift.

mod aggregate;
mod filter;
mod history;
mod predict;
mod ranking;

pub use aggregate::*;
pub use filter::*;
pub use history::*;
pub use predict::*;
pub use ranking::*;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::MatchResult;

/// The only failure the engine reports. Empty inputs are not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Half-up rounding to `scale` decimal places.
pub(crate) fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub(crate) fn from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// `value / divide_on` rounded to 2 decimals, with the denominator clamped to 1.
pub fn divide(value: u32, divide_on: u32) -> f64 {
    let quotient = Decimal::from(value) / Decimal::from(divide_on.max(1));
    to_f64(round_half_up(quotient, 2))
}

/// Share of `part` in `total`, in percent.
pub fn calculate_percent(total: u32, part: u32) -> f64 {
    let quotient = Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(total.max(1));
    to_f64(round_half_up(quotient, 2))
}

/// Change relative to `before`, in percent; 0 when `before` is 0.
pub fn diff_percent(diff: f64, before: f64) -> f64 {
    let before = from_f64(before);
    if before.is_zero() {
        return 0.0;
    }
    to_f64(round_half_up(
        from_f64(diff) * Decimal::ONE_HUNDRED / before,
        2,
    ))
}

/// 50th percentile, truncated. Uses the classic `(n + 1) * p` estimate with
/// linear interpolation between neighbours: 0 for no values, the value
/// itself for one.
pub fn median(values: &[u32]) -> u32 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    match n {
        0 => return 0,
        1 => return sorted[0],
        _ => {}
    }

    let pos = 0.5 * (n as f64 + 1.0);
    let floor = pos.floor();
    if pos >= n as f64 {
        return sorted[n - 1];
    }

    let idx = floor as usize;
    let lower = f64::from(sorted[idx - 1]);
    let upper = f64::from(sorted[idx]);
    (lower + (pos - floor) * (upper - lower)) as u32
}

/// Longest run of consecutive matches (in date order) satisfying `predicate`.
/// 0 when no match satisfies it.
pub fn longest_streak<F>(matches: &[&MatchResult], predicate: F) -> u32
where
    F: Fn(&MatchResult) -> bool,
{
    let mut ordered = matches.to_vec();
    ordered.sort_by_key(|mr| mr.date);

    let (_, longest) = ordered.iter().fold((0u32, 0u32), |(current, longest), mr| {
        let current = if predicate(mr) { current + 1 } else { 0 };
        (current, longest.max(current))
    });
    longest
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::{MatchResult, MatchType, PlayerRef};

    pub fn base_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    /// `player` vs `opponent`, played `minutes` after the base date.
    pub fn result(
        player: &str,
        opponent: &str,
        scored: u32,
        missed: u32,
        match_type: MatchType,
        minutes: i64,
    ) -> MatchResult {
        MatchResult::new(
            PlayerRef::named(player),
            PlayerRef::named(opponent),
            scored,
            missed,
            match_type,
            base_date() + Duration::minutes(minutes),
        )
    }

    /// Short matches of Alice against Bob, one minute apart.
    pub fn short_series(scores: &[(u32, u32)]) -> Vec<MatchResult> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &(s, m))| result("Alice", "Bob", s, m, MatchType::Short, i as i64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_divide() {
        assert_eq!(divide(29, 3), 9.67);
        assert_eq!(divide(1, 8), 0.13); // 0.125 rounds half-up
        assert_eq!(divide(3, 0), 3.0);
        assert_eq!(divide(0, 0), 0.0);
    }

    #[test]
    fn test_calculate_percent() {
        assert_eq!(calculate_percent(3, 2), 66.67);
        assert_eq!(calculate_percent(0, 3), 300.0);
        assert_eq!(calculate_percent(0, 0), 0.0);
    }

    #[test]
    fn test_diff_percent() {
        assert_eq!(diff_percent(0.5, 4.0), 12.5);
        assert_eq!(diff_percent(-1.0, 3.0), -33.33);
        assert_eq!(diff_percent(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_median_small_sets() {
        assert_eq!(median(&[]), 0);
        assert_eq!(median(&[7]), 7);
        assert_eq!(median(&[4, 11]), 7); // 7.5 truncated
        assert_eq!(median(&[11, 3, 9]), 9);
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median(&[1, 2, 3, 4]), 2); // 2.5 truncated
        assert_eq!(median(&[11, 11, 5, 9]), 10);
    }

    #[test]
    fn test_longest_streak_all_wins() {
        let matches = short_series(&[(11, 1), (11, 2), (11, 3), (11, 4), (11, 5)]);
        let refs: Vec<_> = matches.iter().collect();
        assert_eq!(longest_streak(&refs, |mr| mr.winner), 5);
        assert_eq!(longest_streak(&refs, |mr| !mr.winner), 0);
    }

    #[test]
    fn test_longest_streak_uses_date_order() {
        let matches = short_series(&[(11, 1), (2, 11), (11, 3), (11, 4)]);
        // Reverse the input: the streak must still be computed chronologically.
        let refs: Vec<_> = matches.iter().rev().collect();
        assert_eq!(longest_streak(&refs, |mr| mr.winner), 2);
        assert_eq!(longest_streak(&refs, |mr| !mr.winner), 1);
    }

    #[test]
    fn test_longest_streak_empty() {
        assert_eq!(longest_streak(&[], |mr| mr.winner), 0);
    }
}
