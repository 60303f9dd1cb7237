//! History and progress models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ByType, MatchType};

/// Change of one metric between two aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Player the delta belongs to, when it is part of a leaderboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub before: f64,
    pub after: f64,
    pub diff: f64,
    pub diff_percent: f64,
}

impl ProgressDelta {
    /// e.g. `+12.5% (+0.5)`
    pub fn progress(&self) -> String {
        format!(
            "{}% ({})",
            with_sign(self.diff_percent),
            with_sign(self.diff)
        )
    }
}

fn with_sign(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", value)
    } else {
        format!("{}", value)
    }
}

/// Per-metric deltas between two aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDeltas {
    pub win_rate: ProgressDelta,
    pub avg_points_scored: ProgressDelta,
    pub avg_points_missed: ProgressDelta,
    pub points_rate: ProgressDelta,
}

/// Comparison of two consecutive playing days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub deltas: ProgressDeltas,
}

/// Day-by-day progress of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProgress {
    pub match_type: Option<MatchType>,
    pub intervals: Vec<ProgressInterval>,
}

/// Leaderboards of how players moved over their most recent matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingProgress {
    pub match_type: Option<MatchType>,
    pub matches_interval: usize,
    pub win_rate: Vec<ProgressDelta>,
    pub avg_scored: Vec<ProgressDelta>,
    pub avg_missed: Vec<ProgressDelta>,
    pub points_rate: Vec<ProgressDelta>,
}

/// Rolling history of one player's metrics, one point per chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub matches_count: usize,
    pub win_rate: Vec<f64>,
    /// Raw per-match values, oldest first
    pub points_scored: Vec<u32>,
    pub avg_points_scored: Vec<f64>,
    /// Raw per-match values, oldest first
    pub points_missed: Vec<u32>,
    pub avg_points_missed: Vec<f64>,
    pub points_rate: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub chunk_size: usize,
    pub history: ByType<HistorySeries>,
}
