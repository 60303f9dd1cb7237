//! Scoreline prediction from three Laplace-smoothed historical samples.
//!
//! Every legal finishing scoreline of the format gets one ratio per source
//! (head-to-head, player-general, opponent-general). A ratio is the smoothed
//! frequency of that scoreline in percent, scaled by the source weight. The
//! probability of a scoreline is the mean of its three ratios.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{divide, from_f64, round_half_up, to_f64};
use crate::models::{MatchPrediction, MatchResult, MatchType, PredictionOutcome};

/// Weights, smoothing and rounding used by the prediction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_head_to_head_weight")]
    pub head_to_head_weight: f64,

    #[serde(default = "default_general_weight")]
    pub player_weight: f64,

    #[serde(default = "default_general_weight")]
    pub opponent_weight: f64,

    /// Pseudo-count added to every outcome.
    #[serde(default = "default_smoothing")]
    pub smoothing: u32,

    /// Decimal places kept for per-source ratios.
    #[serde(default = "default_ratio_scale")]
    pub ratio_scale: u32,

    /// Decimal places kept for final probabilities.
    #[serde(default = "default_probability_scale")]
    pub probability_scale: u32,
}

fn default_head_to_head_weight() -> f64 {
    2.0
}

fn default_general_weight() -> f64 {
    0.5
}

fn default_smoothing() -> u32 {
    1
}

fn default_ratio_scale() -> u32 {
    4
}

fn default_probability_scale() -> u32 {
    2
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            head_to_head_weight: default_head_to_head_weight(),
            player_weight: default_general_weight(),
            opponent_weight: default_general_weight(),
            smoothing: default_smoothing(),
            ratio_scale: default_ratio_scale(),
            probability_scale: default_probability_scale(),
        }
    }
}

/// Which side of the predicted match a source describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Scorelines are read as `(player, opponent)`.
    Player,
    /// Scorelines are the opponent's own, so `(s, m)` is looked up as `(m, s)`.
    Opponent,
}

/// Scoreline counts of one source with additive smoothing. Only legal
/// finished scorelines of the sample's format are counted.
#[derive(Debug, Clone)]
pub struct OutcomeSample {
    counts: BTreeMap<(u32, u32), u32>,
    observed: u32,
    match_type: MatchType,
    perspective: Perspective,
    smoothing: u32,
}

impl OutcomeSample {
    pub fn new(
        matches: &[&MatchResult],
        match_type: MatchType,
        perspective: Perspective,
        smoothing: u32,
    ) -> Self {
        let counts = matches
            .iter()
            .filter(|mr| {
                mr.match_type == match_type && match_type.is_valid_score(mr.scored, mr.missed)
            })
            .fold(BTreeMap::new(), |mut counts, mr| {
                *counts.entry((mr.scored, mr.missed)).or_insert(0u32) += 1;
                counts
            });
        let observed = counts.values().sum();

        Self {
            counts,
            observed,
            match_type,
            perspective,
            smoothing,
        }
    }

    /// Times the outcome `(scored, missed)` of the predicted player was seen.
    pub fn count(&self, scored: u32, missed: u32) -> u32 {
        let key = match self.perspective {
            Perspective::Player => (scored, missed),
            Perspective::Opponent => (missed, scored),
        };
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Smoothed denominator: one pseudo-count per legal outcome plus every observation.
    pub fn total(&self) -> u32 {
        self.smoothing
            .saturating_mul(2 * self.match_type.point_cap())
            .saturating_add(self.observed)
    }

    /// Weighted smoothed frequency of the outcome, in percent.
    ///
    /// The fraction `(count + smoothing) / total` is rounded to `scale`
    /// places first and only then multiplied by 100 and the weight, so the
    /// result differs from rounding the percentage directly. For example
    /// 1/22 becomes 0.0455 and then 4.55, not 4.5455.
    pub fn ratio(&self, scored: u32, missed: u32, weight: f64, scale: u32) -> Decimal {
        let hits = Decimal::from(self.count(scored, missed) + self.smoothing);
        let fraction = round_half_up(hits / Decimal::from(self.total().max(1)), scale);
        round_half_up(fraction * Decimal::ONE_HUNDRED * from_f64(weight), scale)
    }
}

/// Predict every finishing scoreline of `match_type` for `player` against
/// `opponent`, most likely first.
///
/// `player_matches` are the player's own results, `opponent_matches` the
/// opponent's own results and `head_to_head` the player's results against
/// the opponent. Empty sources are fine: smoothing turns them into a flat prior.
pub fn predict(
    player: &str,
    opponent: &str,
    player_matches: &[&MatchResult],
    opponent_matches: &[&MatchResult],
    head_to_head: &[&MatchResult],
    match_type: MatchType,
    config: &PredictionConfig,
) -> MatchPrediction {
    let sources = [
        (
            OutcomeSample::new(head_to_head, match_type, Perspective::Player, config.smoothing),
            config.head_to_head_weight,
        ),
        (
            OutcomeSample::new(player_matches, match_type, Perspective::Player, config.smoothing),
            config.player_weight,
        ),
        (
            OutcomeSample::new(opponent_matches, match_type, Perspective::Opponent, config.smoothing),
            config.opponent_weight,
        ),
    ];
    debug!(
        "Prediction sources for {} vs {}: h2h={} player={} opponent={}",
        player,
        opponent,
        head_to_head.len(),
        player_matches.len(),
        opponent_matches.len()
    );

    let source_count = Decimal::from(sources.len() as u32);
    let scored_outcomes: Vec<(PredictionOutcome, Decimal)> = match_type
        .outcomes()
        .into_iter()
        .map(|(scored, missed)| {
            let ratios: Decimal = sources
                .iter()
                .map(|(sample, weight)| sample.ratio(scored, missed, *weight, config.ratio_scale))
                .sum();
            let probability = round_half_up(ratios / source_count, config.probability_scale);
            (
                PredictionOutcome {
                    scored,
                    missed,
                    probability: to_f64(probability),
                },
                probability,
            )
        })
        .collect();

    let sum: Decimal = scored_outcomes.iter().map(|(_, p)| *p).sum();
    let mut outcomes: Vec<PredictionOutcome> =
        scored_outcomes.into_iter().map(|(outcome, _)| outcome).collect();
    outcomes.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| divide(b.scored, b.missed).total_cmp(&divide(a.scored, a.missed)))
            .then_with(|| b.scored.cmp(&a.scored))
            .then_with(|| a.missed.cmp(&b.missed))
    });

    MatchPrediction {
        sum: to_f64(sum),
        player: player.to_string(),
        opponent: opponent.to_string(),
        match_type,
        outcomes,
    }
}

/// Derive the three prediction sources from a mixed collection of results
/// and predict the match.
pub fn predict_match(
    matches: &[MatchResult],
    player: &str,
    opponent: &str,
    match_type: MatchType,
    config: &PredictionConfig,
) -> MatchPrediction {
    let of_format: Vec<&MatchResult> = matches
        .iter()
        .filter(|mr| mr.match_type == match_type)
        .collect();

    let own = |name: &str| {
        let mut selected: Vec<&MatchResult> = of_format
            .iter()
            .copied()
            .filter(|mr| mr.player.name == name)
            .collect();
        selected.sort_by_key(|mr| Reverse(mr.date));
        selected
    };

    let player_matches = own(player);
    let opponent_matches = own(opponent);
    let head_to_head: Vec<&MatchResult> = player_matches
        .iter()
        .copied()
        .filter(|mr| mr.opponent.name == opponent)
        .collect();

    info!(
        "Predicting {} {} vs {} from {} head-to-head results",
        match_type,
        player,
        opponent,
        head_to_head.len()
    );

    predict(
        player,
        opponent,
        &player_matches,
        &opponent_matches,
        &head_to_head,
        match_type,
        config,
    )
}
