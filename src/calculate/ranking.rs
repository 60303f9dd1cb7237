//! Records and ratings across players.
//!
//! Players are always visited in name order (then ID), so equal metric
//! values resolve to the alphabetically first player in records and keep
//! alphabetical order in ratings.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use tracing::{debug, info};

use super::{aggregate, filter_matches, of_type, progress_delta};
use crate::models::{
    MatchFilter, MatchResult, MatchType, Metric, MetricRating, MetricRecord, PlayerId,
    PlayerStatsSnapshot, PlayerValue, ProgressDelta, RatingBoard, RatingProgress, RecordBoard,
    Scoped,
};

/// Group results by player, ordered by display name then ID.
pub fn group_by_player<'a>(matches: &[&'a MatchResult]) -> Vec<(String, Vec<&'a MatchResult>)> {
    let mut groups: BTreeMap<(String, PlayerId), Vec<&'a MatchResult>> = BTreeMap::new();
    for &mr in matches {
        groups
            .entry((mr.player.name.clone(), mr.player.id.clone()))
            .or_default()
            .push(mr);
    }
    groups
        .into_iter()
        .map(|((name, _), group)| (name, group))
        .collect()
}

/// Each player's `limit` most recent results; all of them when `limit` is `None`.
fn most_recent<'a>(group: &[&'a MatchResult], limit: Option<usize>) -> Vec<&'a MatchResult> {
    let mut ordered = group.to_vec();
    ordered.sort_by_key(|mr| Reverse(mr.date));
    ordered.truncate(limit.unwrap_or(ordered.len()));
    ordered
}

/// Everything but the `chunk` most recent results. A chunk of 0 or one
/// larger than the group keeps the whole group.
fn before_recent<'a>(group: &[&'a MatchResult], chunk: usize) -> Vec<&'a MatchResult> {
    let mut ordered = group.to_vec();
    ordered.sort_by_key(|mr| Reverse(mr.date));
    let skip = if chunk > 0 && chunk <= ordered.len() {
        chunk
    } else {
        0
    };
    ordered.split_off(skip)
}

fn player_stats(matches: &[&MatchResult], limit: Option<usize>) -> Vec<(String, PlayerStatsSnapshot)> {
    group_by_player(matches)
        .into_iter()
        .map(|(name, group)| {
            let stats = aggregate(most_recent(&group, limit));
            (name, stats)
        })
        .collect()
}

/// The player whose metric compares as `wanted` against every other player.
fn extreme(
    stats: &[(String, PlayerStatsSnapshot)],
    metric: Metric,
    wanted: Ordering,
) -> Option<PlayerValue> {
    stats
        .iter()
        .fold(None::<&(String, PlayerStatsSnapshot)>, |best, candidate| match best {
            Some(current)
                if metric.value(&candidate.1).total_cmp(&metric.value(&current.1)) != wanted =>
            {
                Some(current)
            }
            _ => Some(candidate),
        })
        .map(|(name, snapshot)| PlayerValue::new(name.as_str(), metric.value(snapshot)))
}

/// Highest and lowest holder of every tracked metric.
pub fn record_board(matches: &[&MatchResult]) -> RecordBoard {
    let stats = player_stats(matches, None);
    debug!("Computing records over {} players", stats.len());

    RecordBoard {
        records: Metric::ALL
            .iter()
            .map(|&metric| MetricRecord {
                metric,
                highest: extreme(&stats, metric, Ordering::Greater),
                lowest: extreme(&stats, metric, Ordering::Less),
            })
            .collect(),
    }
}

/// All players ordered by every tracked metric, best first.
pub fn rating_board(matches: &[&MatchResult], limit: Option<usize>) -> RatingBoard {
    let stats = player_stats(matches, limit);
    debug!("Computing ratings over {} players", stats.len());

    RatingBoard {
        ratings: Metric::ALL
            .iter()
            .map(|&metric| {
                let mut ordered: Vec<&(String, PlayerStatsSnapshot)> = stats.iter().collect();
                ordered.sort_by(|a, b| metric.value(&b.1).total_cmp(&metric.value(&a.1)));
                MetricRating {
                    metric,
                    entries: ordered
                        .into_iter()
                        .map(|(name, snapshot)| PlayerValue::new(name.as_str(), metric.value(snapshot)))
                        .collect(),
                }
            })
            .collect(),
    }
}

/// Records for all matches, short-only and long-only.
pub fn records(matches: &[MatchResult], filter: &MatchFilter) -> Scoped<RecordBoard> {
    let filtered = filter_matches(matches, filter);
    info!("Computing records from {} results", filtered.len());
    Scoped::compute(|t| record_board(&of_type(&filtered, t)))
}

/// Ratings for all matches, short-only and long-only. With `limit`, each
/// player is rated on their most recent `limit` results only.
pub fn ratings(matches: &[MatchResult], filter: &MatchFilter, limit: Option<usize>) -> Scoped<RatingBoard> {
    let filtered = filter_matches(matches, filter);
    info!(
        "Computing ratings from {} results (limit: {:?})",
        filtered.len(),
        limit
    );
    Scoped::compute(|t| rating_board(&of_type(&filtered, t), limit))
}

/// How every player's metrics moved over their `chunk` most recent results.
/// Each leaderboard is ordered by relative change, largest gain first.
pub fn rating_progress(
    matches: &[MatchResult],
    filter: &MatchFilter,
    match_type: Option<MatchType>,
    chunk: usize,
) -> RatingProgress {
    let filtered = of_type(&filter_matches(matches, filter), match_type);

    let pairs: Vec<(String, PlayerStatsSnapshot, PlayerStatsSnapshot)> = group_by_player(&filtered)
        .into_iter()
        .map(|(name, group)| {
            let before = aggregate(before_recent(&group, chunk));
            let after = aggregate(group);
            (name, before, after)
        })
        .collect();

    let leaderboard = |extract: fn(&PlayerStatsSnapshot) -> f64| -> Vec<ProgressDelta> {
        let mut deltas: Vec<ProgressDelta> = pairs
            .iter()
            .map(|(name, before, after)| {
                progress_delta(Some(name.clone()), extract(before), extract(after))
            })
            .collect();
        deltas.sort_by(|a, b| b.diff_percent.total_cmp(&a.diff_percent));
        deltas
    };

    RatingProgress {
        match_type,
        matches_interval: chunk,
        win_rate: leaderboard(|s| s.win_rate),
        avg_scored: leaderboard(|s| s.avg_points_scored),
        avg_missed: leaderboard(|s| s.avg_points_missed),
        points_rate: leaderboard(|s| s.points_rate),
    }
}
