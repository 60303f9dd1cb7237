//! Reduction of match results into a stats snapshot.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{calculate_percent, divide, filter_matches, longest_streak, median, of_type};
use crate::models::{
    ByType, MatchDetails, MatchFilter, MatchResult, PlayerReport, PlayerStatsSnapshot, Scoped,
};

/// Aggregate a collection of match results. Never fails: an empty input
/// yields an all-zero snapshot.
pub fn aggregate<'a, I>(matches: I) -> PlayerStatsSnapshot
where
    I: IntoIterator<Item = &'a MatchResult>,
{
    let matches: Vec<&MatchResult> = matches.into_iter().collect();

    let match_count = matches.len() as u32;
    let wins = matches.iter().filter(|mr| mr.winner).count() as u32;
    let scored: Vec<u32> = matches.iter().map(|mr| mr.scored).collect();
    let missed: Vec<u32> = matches.iter().map(|mr| mr.missed).collect();
    let points_scored: u32 = scored.iter().sum();
    let points_missed: u32 = missed.iter().sum();

    PlayerStatsSnapshot {
        match_count,
        wins,
        losses: match_count - wins,
        win_rate: calculate_percent(match_count, wins),
        win_streak: longest_streak(&matches, |mr| mr.winner),
        lose_streak: longest_streak(&matches, |mr| !mr.winner),
        points_scored,
        avg_points_scored: divide(points_scored, match_count),
        median_points_scored: median(&scored),
        points_missed,
        avg_points_missed: divide(points_missed, match_count),
        median_points_missed: median(&missed),
        points_rate: divide(points_scored, points_missed),
        overtime_count: matches.iter().filter(|mr| mr.extra_round).count() as u32,
        scored_trend: trend(&scored),
        missed_trend: trend(&missed),
    }
}

fn trend(values: &[u32]) -> BTreeMap<u32, u32> {
    values.iter().fold(BTreeMap::new(), |mut histogram, value| {
        *histogram.entry(*value).or_default() += 1;
        histogram
    })
}

/// Statistics of one player under `filter`: overall, per format and per opponent.
///
/// `matches` is expected to be the player's own results; results belonging to
/// other players are ignored.
pub fn player_report(player: &str, matches: &[MatchResult], filter: &MatchFilter) -> PlayerReport {
    let filtered: Vec<&MatchResult> = filter_matches(matches, filter)
        .into_iter()
        .filter(|mr| mr.player.name == player)
        .collect();

    let opponents: BTreeSet<&str> = filtered.iter().map(|mr| mr.opponent.name.as_str()).collect();
    debug!(
        "Report for {}: {} matches against {} opponents",
        player,
        filtered.len(),
        opponents.len()
    );

    let versus = opponents
        .into_iter()
        .map(|opponent| {
            let against: Vec<&MatchResult> = filtered
                .iter()
                .copied()
                .filter(|mr| mr.opponent.name == opponent)
                .collect();
            let scoped = Scoped::compute(|t| aggregate(of_type(&against, t)));
            (opponent.to_string(), scoped)
        })
        .collect();

    PlayerReport {
        player: player.to_string(),
        filter: filter.clone(),
        overall: aggregate(filtered.iter().copied()),
        by_type: ByType::compute(|t| aggregate(of_type(&filtered, Some(t)))),
        versus,
    }
}

/// Match listing of `player` per format, newest first. With `best_first` the
/// listing is re-ordered by score ratio, keeping date order among equal ratios.
pub fn player_matches(
    player: &str,
    matches: &[MatchResult],
    filter: &MatchFilter,
    best_first: bool,
) -> ByType<Vec<MatchDetails>> {
    let mut filtered: Vec<&MatchResult> = filter_matches(matches, filter)
        .into_iter()
        .filter(|mr| mr.player.name == player)
        .collect();
    filtered.sort_by_key(|mr| Reverse(mr.date));

    ByType::compute(|t| {
        let mut details: Vec<MatchDetails> = of_type(&filtered, Some(t))
            .into_iter()
            .map(MatchDetails::from)
            .collect();
        if best_first {
            details.sort_by(|a, b| b.score_ratio().total_cmp(&a.score_ratio()));
        }
        details
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::{result, short_series};
    use crate::models::MatchType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aggregate_basic_counts() {
        let matches = short_series(&[(11, 7), (9, 11), (11, 4)]);
        let stats = aggregate(&matches);

        assert_eq!(stats.match_count, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 66.67);
        assert_eq!(stats.points_scored, 31);
        assert_eq!(stats.points_missed, 22);
        assert_eq!(stats.avg_points_scored, 10.33);
        assert_eq!(stats.avg_points_missed, 7.33);
        assert_eq!(stats.points_rate, 1.41);
        assert_eq!(stats.median_points_scored, 11);
        assert_eq!(stats.median_points_missed, 7);
        assert_eq!(stats.win_streak, 1);
        assert_eq!(stats.lose_streak, 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&Vec::<MatchResult>::new());

        assert_eq!(stats, PlayerStatsSnapshot::default());
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.points_rate, 0.0);
    }

    #[test]
    fn test_aggregate_all_wins_streak() {
        let matches = short_series(&[(11, 1), (11, 2), (11, 3), (11, 4), (11, 5)]);
        let stats = aggregate(&matches);

        assert_eq!(stats.win_streak, 5);
        assert_eq!(stats.lose_streak, 0);
        assert_eq!(stats.win_rate, 100.0);
    }

    #[test]
    fn test_aggregate_all_losses() {
        let matches = short_series(&[(3, 11), (10, 11)]);
        let stats = aggregate(&matches);

        assert_eq!(stats.win_streak, 0);
        assert_eq!(stats.lose_streak, 2);
        assert_eq!(stats.overtime_count, 1);
        assert_eq!(stats.wins + stats.losses, stats.match_count);
    }

    #[test]
    fn test_points_rate_clamps_zero_missed() {
        let matches = short_series(&[(11, 0), (11, 0)]);
        let stats = aggregate(&matches);
        assert_eq!(stats.points_rate, 22.0);
    }

    #[test]
    fn test_trends() {
        let matches = short_series(&[(11, 7), (11, 7), (5, 11)]);
        let stats = aggregate(&matches);

        assert_eq!(stats.scored_trend, BTreeMap::from([(5, 1), (11, 2)]));
        assert_eq!(stats.missed_trend, BTreeMap::from([(7, 2), (11, 1)]));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let matches = short_series(&[(11, 7), (9, 11), (11, 10), (2, 11)]);
        assert_eq!(aggregate(&matches), aggregate(&matches));
    }

    #[test]
    fn test_player_report_breakdown() {
        let matches = vec![
            result("Alice", "Bob", 11, 5, MatchType::Short, 0),
            result("Alice", "Bob", 19, 21, MatchType::Long, 1),
            result("Alice", "Carol", 11, 9, MatchType::Short, 2),
            result("Carol", "Alice", 9, 11, MatchType::Short, 2),
        ];

        let report = player_report("Alice", &matches, &MatchFilter::new());

        assert_eq!(report.overall.match_count, 3);
        assert_eq!(report.by_type.short.match_count, 2);
        assert_eq!(report.by_type.long.match_count, 1);
        assert_eq!(
            report.versus.keys().collect::<Vec<_>>(),
            vec!["Bob", "Carol"]
        );
        let bob = &report.versus["Bob"];
        assert_eq!(bob.all.match_count, 2);
        assert_eq!(bob.short.wins, 1);
        assert_eq!(bob.long.losses, 1);
    }

    #[test]
    fn test_player_report_respects_filter() {
        let matches = vec![
            result("Alice", "Bob", 11, 5, MatchType::Short, 0),
            result("Alice", "Carol", 11, 9, MatchType::Short, 1),
        ];
        let report = player_report("Alice", &matches, &MatchFilter::new().opponent("Carol"));

        assert_eq!(report.overall.match_count, 1);
        assert!(!report.versus.contains_key("Bob"));
    }

    #[test]
    fn test_player_matches_ordering() {
        let matches = vec![
            result("Alice", "Bob", 11, 9, MatchType::Short, 0),
            result("Alice", "Bob", 11, 2, MatchType::Short, 1),
            result("Alice", "Bob", 4, 11, MatchType::Short, 2),
            result("Alice", "Bob", 21, 3, MatchType::Long, 3),
            result("Bob", "Alice", 11, 0, MatchType::Short, 4),
        ];

        let newest_first = player_matches("Alice", &matches, &MatchFilter::new(), false);
        let scores: Vec<_> = newest_first.short.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![4, 11, 11]);
        assert_eq!(newest_first.long.len(), 1);

        let best_first = player_matches("Alice", &matches, &MatchFilter::new(), true);
        let scores: Vec<_> = best_first
            .short
            .iter()
            .map(|d| (d.score, d.opponent_score))
            .collect();
        assert_eq!(scores, vec![(11, 2), (11, 9), (4, 11)]);

        let bob = player_matches("Bob", &matches, &MatchFilter::new(), false);
        assert_eq!(bob.short.len(), 1);
        assert_eq!(bob.short[0].name, "Bob");
        assert!(bob.long.is_empty());
    }
}
