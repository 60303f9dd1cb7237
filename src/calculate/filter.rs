//! Composite inclusion test over match results.

use std::fmt;

use crate::models::{MatchFilter, MatchResult, MatchType};

type Criterion = Box<dyn Fn(&MatchResult) -> bool + Send + Sync>;

/// Logical AND of the criteria present in a [`MatchFilter`].
#[derive(Default)]
pub struct MatchPredicate {
    criteria: Vec<Criterion>,
}

impl MatchPredicate {
    /// Accepts every match.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn test(&self, mr: &MatchResult) -> bool {
        self.criteria.iter().all(|criterion| criterion(mr))
    }

    pub fn is_pass_through(&self) -> bool {
        self.criteria.is_empty()
    }

    fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }
}

impl fmt::Debug for MatchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchPredicate({} criteria)", self.criteria.len())
    }
}

impl MatchFilter {
    /// Build the predicate for the criteria that are set.
    pub fn predicate(&self) -> MatchPredicate {
        let mut predicate = MatchPredicate::always();

        if let Some(opponent) = self.opponent.clone().filter(|s| !s.is_empty()) {
            predicate = predicate.with(Box::new(move |mr| mr.opponent.name == opponent));
        }
        if let Some(tournament) = self.tournament.clone().filter(|s| !s.is_empty()) {
            predicate = predicate.with(Box::new(move |mr| {
                mr.tournament.as_deref() == Some(tournament.as_str())
            }));
        }
        if !self.stages.is_empty() {
            let stages = self.stages.clone();
            predicate = predicate.with(Box::new(move |mr| stages.contains(&mr.stage)));
        }
        if !self.match_types.is_empty() {
            let types = self.match_types.clone();
            predicate = predicate.with(Box::new(move |mr| types.contains(&mr.match_type)));
        }

        predicate
    }
}

/// Matches passing `filter`, in input order.
pub fn filter_matches<'a>(matches: &'a [MatchResult], filter: &MatchFilter) -> Vec<&'a MatchResult> {
    if filter.is_empty() {
        return matches.iter().collect();
    }
    let predicate = filter.predicate();
    matches.iter().filter(|mr| predicate.test(mr)).collect()
}

/// Narrow an already filtered selection to one format; `None` keeps everything.
pub fn of_type<'a>(matches: &[&'a MatchResult], match_type: Option<MatchType>) -> Vec<&'a MatchResult> {
    matches
        .iter()
        .copied()
        .filter(|mr| match_type.map_or(true, |t| mr.match_type == t))
        .collect()
}
