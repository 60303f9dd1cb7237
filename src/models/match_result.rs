//! Match result model: one player's view of a finished match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{EntityId, MatchId, MatchType, PlayerRef, TournamentStage};

/// Errors raised while turning a submitted scoreline into match results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Max score is {cap} for type {match_type}, got {score}")]
    ScoreAboveCap {
        score: u32,
        cap: u32,
        match_type: MatchType,
    },

    #[error("Both players can not have max points")]
    BothAtCap,

    #[error("At least one player should reach max points ({0})")]
    NoneAtCap(u32),

    #[error("Player can not play against themselves: {0}")]
    SamePlayer(String),

    #[error("Stage not set for tournament {0}")]
    StageNotSet(String),
}

/// A single player's result in a match. Every match is stored as two
/// mirror-image results, one per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Shared by both mirrored results of the same match
    pub match_id: MatchId,

    pub player: PlayerRef,

    pub opponent: PlayerRef,

    /// Points won by `player`
    pub scored: u32,

    /// Points won by `opponent`
    pub missed: u32,

    /// `scored > missed`
    pub winner: bool,

    /// Decided by a single point
    pub extra_round: bool,

    pub date: DateTime<Utc>,

    pub match_type: MatchType,

    #[serde(default)]
    pub stage: TournamentStage,

    /// Tournament name, `None` for friendlies outside any tournament
    #[serde(default)]
    pub tournament: Option<String>,
}

impl MatchResult {
    /// Create a friendly result; `winner` and `extra_round` are derived from the score.
    pub fn new(
        player: PlayerRef,
        opponent: PlayerRef,
        scored: u32,
        missed: u32,
        match_type: MatchType,
        date: DateTime<Utc>,
    ) -> Self {
        let match_id = match_id_for(&date, &player.name, &opponent.name);
        Self {
            match_id,
            player,
            opponent,
            scored,
            missed,
            winner: scored > missed,
            extra_round: scored.abs_diff(missed) == 1,
            date,
            match_type,
            stage: TournamentStage::Friendly,
            tournament: None,
        }
    }

    /// Attach tournament context.
    pub fn with_tournament(mut self, name: impl Into<String>, stage: TournamentStage) -> Self {
        self.tournament = Some(name.into());
        self.stage = stage;
        self
    }

    /// The same match seen from the opponent's side.
    pub fn mirrored(&self) -> Self {
        Self {
            match_id: self.match_id.clone(),
            player: self.opponent.clone(),
            opponent: self.player.clone(),
            scored: self.missed,
            missed: self.scored,
            winner: self.missed > self.scored,
            extra_round: self.extra_round,
            date: self.date,
            match_type: self.match_type,
            stage: self.stage,
            tournament: self.tournament.clone(),
        }
    }
}

/// Both sides hash to the same ID regardless of which one is "player".
fn match_id_for(date: &DateTime<Utc>, a: &str, b: &str) -> MatchId {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    EntityId::generate(&["match", &date.to_rfc3339(), first, second])
}

/// One side of a submitted scoreline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub score: u32,
}

/// Tournament a submitted match belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentInfo {
    pub name: String,
    pub stage: Option<TournamentStage>,
}

/// A freshly played match, before it is split into mirrored results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub match_type: MatchType,
    pub date: DateTime<Utc>,
    pub tournament: Option<TournamentInfo>,
    pub player: PlayerScore,
    pub opponent: PlayerScore,
}

impl NewMatch {
    /// Check the players, the tournament stage and the scoreline against
    /// the match type's point cap.
    pub fn validate(&self) -> Result<(), MatchError> {
        let cap = self.match_type.point_cap();
        let (a, b) = (self.player.score, self.opponent.score);

        if self.player.name == self.opponent.name {
            return Err(MatchError::SamePlayer(self.player.name.clone()));
        }
        if let Some(info) = self.tournament.as_ref().filter(|t| t.stage.is_none()) {
            return Err(MatchError::StageNotSet(info.name.clone()));
        }
        if let Some(score) = [a, b].into_iter().find(|s| *s > cap) {
            return Err(MatchError::ScoreAboveCap {
                score,
                cap,
                match_type: self.match_type,
            });
        }
        if a == cap && b == cap {
            return Err(MatchError::BothAtCap);
        }
        if a != cap && b != cap {
            return Err(MatchError::NoneAtCap(cap));
        }
        Ok(())
    }

    /// Validate and produce the two mirror-image results.
    pub fn into_results(self) -> Result<[MatchResult; 2], MatchError> {
        self.validate()?;

        let mut first = MatchResult::new(
            PlayerRef::named(&self.player.name),
            PlayerRef::named(&self.opponent.name),
            self.player.score,
            self.opponent.score,
            self.match_type,
            self.date,
        );
        if let Some(TournamentInfo {
            name,
            stage: Some(stage),
        }) = self.tournament
        {
            first = first.with_tournament(name, stage);
        }
        let second = first.mirrored();
        Ok([first, second])
    }
}

/// Flattened view of a result for match listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub match_type: MatchType,
    pub name: String,
    pub score: u32,
    pub opponent_score: u32,
    pub opponent_name: String,
    pub stage: String,
    pub tournament_name: String,
}

impl MatchDetails {
    /// e.g. `[Alice 11 - 3 Bob] Group stage, Spring Cup`
    pub fn representation(&self) -> String {
        format!(
            "[{} {} - {} {}] {}, {}",
            self.name,
            self.score,
            self.opponent_score,
            self.opponent_name,
            self.stage,
            self.tournament_name
        )
    }

    pub fn score_ratio(&self) -> f64 {
        crate::calculate::divide(self.score, self.opponent_score)
    }
}

impl From<&MatchResult> for MatchDetails {
    fn from(mr: &MatchResult) -> Self {
        Self {
            match_type: mr.match_type,
            name: mr.player.name.clone(),
            score: mr.scored,
            opponent_score: mr.missed,
            opponent_name: mr.opponent.name.clone(),
            stage: mr.stage.details().to_string(),
            tournament_name: mr.tournament.clone().unwrap_or_default(),
        }
    }
}
