//! Derived statistics models.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ByType, MatchFilter, Scoped};

/// Aggregated statistics over a set of match results. Carries no identity;
/// the same input always produces the same snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsSnapshot {
    pub match_count: u32,
    pub wins: u32,
    pub losses: u32,

    /// Percent of matches won (0-100, 2 decimals)
    pub win_rate: f64,

    /// Longest run of consecutive wins in date order
    pub win_streak: u32,

    /// Longest run of consecutive losses in date order
    pub lose_streak: u32,

    pub points_scored: u32,
    pub avg_points_scored: f64,
    pub median_points_scored: u32,

    pub points_missed: u32,
    pub avg_points_missed: f64,
    pub median_points_missed: u32,

    /// Points scored per point missed
    pub points_rate: f64,

    /// Matches decided by a single point
    pub overtime_count: u32,

    /// Scored value -> number of matches with that value
    pub scored_trend: BTreeMap<u32, u32>,

    /// Missed value -> number of matches with that value
    pub missed_trend: BTreeMap<u32, u32>,
}

/// The metrics tracked by records and ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MatchCount,
    Wins,
    Losses,
    WinRate,
    WinStreak,
    LoseStreak,
    PointsScored,
    AvgPointsScored,
    PointsMissed,
    AvgPointsMissed,
    PointsRate,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::MatchCount,
        Metric::Wins,
        Metric::Losses,
        Metric::WinRate,
        Metric::WinStreak,
        Metric::LoseStreak,
        Metric::PointsScored,
        Metric::AvgPointsScored,
        Metric::PointsMissed,
        Metric::AvgPointsMissed,
        Metric::PointsRate,
    ];

    /// Read this metric out of a snapshot.
    pub fn value(&self, stats: &PlayerStatsSnapshot) -> MetricValue {
        match self {
            Metric::MatchCount => MetricValue::Count(stats.match_count),
            Metric::Wins => MetricValue::Count(stats.wins),
            Metric::Losses => MetricValue::Count(stats.losses),
            Metric::WinRate => MetricValue::Rate(stats.win_rate),
            Metric::WinStreak => MetricValue::Count(stats.win_streak),
            Metric::LoseStreak => MetricValue::Count(stats.lose_streak),
            Metric::PointsScored => MetricValue::Count(stats.points_scored),
            Metric::AvgPointsScored => MetricValue::Rate(stats.avg_points_scored),
            Metric::PointsMissed => MetricValue::Count(stats.points_missed),
            Metric::AvgPointsMissed => MetricValue::Rate(stats.avg_points_missed),
            Metric::PointsRate => MetricValue::Rate(stats.points_rate),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::MatchCount => "match_count",
            Metric::Wins => "wins",
            Metric::Losses => "losses",
            Metric::WinRate => "win_rate",
            Metric::WinStreak => "win_streak",
            Metric::LoseStreak => "lose_streak",
            Metric::PointsScored => "points_scored",
            Metric::AvgPointsScored => "avg_points_scored",
            Metric::PointsMissed => "points_missed",
            Metric::AvgPointsMissed => "avg_points_missed",
            Metric::PointsRate => "points_rate",
        };
        write!(f, "{}", name)
    }
}

/// A metric reading: whole counts or 2-decimal rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u32),
    Rate(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Count(n) => f64::from(*n),
            MetricValue::Rate(r) => *r,
        }
    }

    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.as_f64().total_cmp(&other.as_f64())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Rate(r) => write!(f, "{:.2}", r),
        }
    }
}

/// Full statistics breakdown for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player: String,

    /// Filter the report was computed under
    pub filter: MatchFilter,

    pub overall: PlayerStatsSnapshot,

    pub by_type: ByType<PlayerStatsSnapshot>,

    /// Opponent name -> stats against that opponent
    pub versus: BTreeMap<String, Scoped<PlayerStatsSnapshot>>,
}
