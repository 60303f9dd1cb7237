//! Match formats and their point caps.

use serde::{Deserialize, Serialize};

/// The two supported match formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Played to 11 points
    Short,
    /// Played to 21 points
    Long,
}

impl MatchType {
    pub const ALL: [MatchType; 2] = [MatchType::Short, MatchType::Long];

    /// Points the winner must reach.
    pub fn point_cap(&self) -> u32 {
        match self {
            MatchType::Short => 11,
            MatchType::Long => 21,
        }
    }

    /// A finished scoreline is valid when exactly one side sits on the cap
    /// and the other is below it.
    pub fn is_valid_score(&self, scored: u32, missed: u32) -> bool {
        let cap = self.point_cap();
        (scored == cap && missed < cap) || (missed == cap && scored < cap)
    }

    /// Every legal finishing scoreline, wins first: `(cap, 0..cap)` then `(0..cap, cap)`.
    pub fn outcomes(&self) -> Vec<(u32, u32)> {
        let cap = self.point_cap();
        (0..cap)
            .map(|i| (cap, i))
            .chain((0..cap).map(|i| (i, cap)))
            .collect()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHORT" => Some(MatchType::Short),
            "LONG" => Some(MatchType::Long),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Short => write!(f, "SHORT"),
            MatchType::Long => write!(f, "LONG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_point_caps() {
        assert_eq!(MatchType::Short.point_cap(), 11);
        assert_eq!(MatchType::Long.point_cap(), 21);
    }

    #[test]
    fn test_outcome_counts() {
        assert_eq!(MatchType::Short.outcomes().len(), 22);
        assert_eq!(MatchType::Long.outcomes().len(), 42);
    }

    #[test]
    fn test_outcomes_distinct_and_legal() {
        for match_type in MatchType::ALL {
            let outcomes = match_type.outcomes();
            let unique: HashSet<_> = outcomes.iter().collect();
            assert_eq!(unique.len(), outcomes.len());
            assert!(outcomes
                .iter()
                .all(|&(s, m)| match_type.is_valid_score(s, m)));
        }
    }

    #[test]
    fn test_is_valid_score() {
        assert!(MatchType::Short.is_valid_score(11, 9));
        assert!(MatchType::Short.is_valid_score(0, 11));
        assert!(!MatchType::Short.is_valid_score(11, 11));
        assert!(!MatchType::Short.is_valid_score(10, 9));
        assert!(!MatchType::Short.is_valid_score(12, 10));
        assert!(MatchType::Long.is_valid_score(21, 20));
        assert!(!MatchType::Long.is_valid_score(11, 5));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(MatchType::parse("short"), Some(MatchType::Short));
        assert_eq!(MatchType::parse("LONG"), Some(MatchType::Long));
        assert_eq!(MatchType::parse("medium"), None);
        assert_eq!(format!("{}", MatchType::Long), "LONG");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MatchType::Short).unwrap();
        assert_eq!(json, "\"SHORT\"");
    }
}
