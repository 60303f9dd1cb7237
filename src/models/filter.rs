//! Match filter criteria supplied by the caller.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{MatchType, TournamentStage};

/// Optional inclusion criteria over match results. Every criterion left
/// empty is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFilter {
    /// Exact, case-sensitive opponent display name
    #[serde(default)]
    pub opponent: Option<String>,

    /// Exact tournament name; matches outside any tournament never pass
    #[serde(default)]
    pub tournament: Option<String>,

    #[serde(default)]
    pub stages: BTreeSet<TournamentStage>,

    #[serde(default)]
    pub match_types: BTreeSet<MatchType>,
}

impl MatchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opponent(mut self, name: impl Into<String>) -> Self {
        self.opponent = Some(name.into());
        self
    }

    pub fn tournament(mut self, name: impl Into<String>) -> Self {
        self.tournament = Some(name.into());
        self
    }

    pub fn stage(mut self, stage: TournamentStage) -> Self {
        self.stages.insert(stage);
        self
    }

    pub fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_types.insert(match_type);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.opponent.as_deref().map_or(true, str::is_empty)
            && self.tournament.as_deref().map_or(true, str::is_empty)
            && self.stages.is_empty()
            && self.match_types.is_empty()
    }
}
