//! Cross-player leaderboards.

use serde::{Deserialize, Serialize};

use super::Metric;

/// A player paired with a formatted metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerValue {
    pub holder: String,
    pub value: String,
}

impl PlayerValue {
    pub fn new(holder: impl Into<String>, value: impl ToString) -> Self {
        Self {
            holder: holder.into(),
            value: value.to_string(),
        }
    }
}

/// Extremes of one metric across players. Both are `None` when there are no players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub metric: Metric,
    pub highest: Option<PlayerValue>,
    pub lowest: Option<PlayerValue>,
}

/// Records for every tracked metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBoard {
    pub records: Vec<MetricRecord>,
}

impl RecordBoard {
    pub fn get(&self, metric: Metric) -> Option<&MetricRecord> {
        self.records.iter().find(|r| r.metric == metric)
    }
}

/// Every player ordered by one metric, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRating {
    pub metric: Metric,
    pub entries: Vec<PlayerValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBoard {
    pub ratings: Vec<MetricRating>,
}

impl RatingBoard {
    pub fn get(&self, metric: Metric) -> Option<&MetricRating> {
        self.ratings.iter().find(|r| r.metric == metric)
    }
}
