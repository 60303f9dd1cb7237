//! Rolling history and day-to-day progress of a player's metrics.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use tracing::debug;

use super::{
    aggregate, diff_percent, filter_matches, from_f64, of_type, round_half_up, to_f64, StatsError,
};
use crate::models::{
    ByType, DayProgress, HistorySeries, MatchFilter, MatchResult, MatchType, PlayerHistory,
    PlayerStatsSnapshot, ProgressDelta, ProgressDeltas, ProgressInterval,
};

/// Delta record between two readings of the same metric.
pub fn progress_delta(name: Option<String>, before: f64, after: f64) -> ProgressDelta {
    let diff = to_f64(round_half_up(from_f64(after) - from_f64(before), 2));
    ProgressDelta {
        name,
        before,
        after,
        diff,
        diff_percent: diff_percent(diff, before),
    }
}

/// Snapshots over growing prefixes of the chronological history: point `n`
/// covers the first `min(n * chunk_size, total)` matches, so the series has
/// `ceil(total / chunk_size)` points and the last one covers everything.
pub fn rolling_history(
    matches: &[&MatchResult],
    chunk_size: usize,
) -> Result<Vec<PlayerStatsSnapshot>, StatsError> {
    if chunk_size == 0 {
        return Err(StatsError::InvalidInput(
            "Chunk size must be greater than 0".to_string(),
        ));
    }

    let mut ordered = matches.to_vec();
    ordered.sort_by_key(|mr| mr.date);

    let total = ordered.len();
    let chunks = total.div_ceil(chunk_size);
    debug!("Rolling history over {} matches in {} chunks", total, chunks);

    Ok((1..=chunks)
        .map(|n| aggregate(ordered[..(n * chunk_size).min(total)].iter().copied()))
        .collect())
}

/// Rolling history flattened into per-metric series for charting.
pub fn history_series(matches: &[&MatchResult], chunk_size: usize) -> Result<HistorySeries, StatsError> {
    let snapshots = rolling_history(matches, chunk_size)?;

    let mut ordered = matches.to_vec();
    ordered.sort_by_key(|mr| mr.date);

    Ok(HistorySeries {
        matches_count: ordered.len(),
        win_rate: snapshots.iter().map(|s| s.win_rate).collect(),
        points_scored: ordered.iter().map(|mr| mr.scored).collect(),
        avg_points_scored: snapshots.iter().map(|s| s.avg_points_scored).collect(),
        points_missed: ordered.iter().map(|mr| mr.missed).collect(),
        avg_points_missed: snapshots.iter().map(|s| s.avg_points_missed).collect(),
        points_rate: snapshots.iter().map(|s| s.points_rate).collect(),
    })
}

/// History series of `player`'s filtered matches, per format.
pub fn player_history(
    player: &str,
    matches: &[MatchResult],
    filter: &MatchFilter,
    chunk_size: usize,
) -> Result<PlayerHistory, StatsError> {
    let filtered: Vec<&MatchResult> = filter_matches(matches, filter)
        .into_iter()
        .filter(|mr| mr.player.name == player)
        .collect();
    Ok(PlayerHistory {
        chunk_size,
        history: ByType {
            short: history_series(&of_type(&filtered, Some(MatchType::Short)), chunk_size)?,
            long: history_series(&of_type(&filtered, Some(MatchType::Long)), chunk_size)?,
        },
    })
}

fn deltas_between(before: &PlayerStatsSnapshot, after: &PlayerStatsSnapshot) -> ProgressDeltas {
    ProgressDeltas {
        win_rate: progress_delta(None, before.win_rate, after.win_rate),
        avg_points_scored: progress_delta(None, before.avg_points_scored, after.avg_points_scored),
        avg_points_missed: progress_delta(None, before.avg_points_missed, after.avg_points_missed),
        points_rate: progress_delta(None, before.points_rate, after.points_rate),
    }
}

/// Compare each playing day with the previous one. Days are calendar dates
/// at `offset`; each day is aggregated on its own, not cumulatively.
///
/// Fails when the matches span fewer than two days.
pub fn day_progress(
    matches: &[MatchResult],
    match_type: Option<MatchType>,
    offset: FixedOffset,
) -> Result<DayProgress, StatsError> {
    let all: Vec<&MatchResult> = matches.iter().collect();
    let selected = of_type(&all, match_type);

    let mut days: BTreeMap<NaiveDate, Vec<&MatchResult>> = BTreeMap::new();
    for mr in selected {
        let day = mr.date.with_timezone(&offset).date_naive();
        days.entry(day).or_default().push(mr);
    }

    if days.len() < 2 {
        return Err(StatsError::InvalidInput(format!(
            "Cannot get progress of player due to lack of matches: {} distinct day(s)",
            days.len()
        )));
    }

    let daily: Vec<(NaiveDate, PlayerStatsSnapshot)> = days
        .into_iter()
        .map(|(day, group)| (day, aggregate(group)))
        .collect();

    let intervals: Vec<ProgressInterval> = daily
        .windows(2)
        .map(|pair| ProgressInterval {
            start: pair[0].0,
            end: pair[1].0,
            deltas: deltas_between(&pair[0].1, &pair[1].1),
        })
        .collect();
    debug!("Computed {} day intervals", intervals.len());

    Ok(DayProgress {
        match_type,
        intervals,
    })
}
