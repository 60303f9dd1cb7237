//! Scoreline prediction models.

use serde::{Deserialize, Serialize};

use super::MatchType;

/// One legal finishing scoreline and its estimated probability (percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub scored: u32,
    pub missed: u32,
    pub probability: f64,
}

impl PredictionOutcome {
    /// e.g. `11 - 3`
    pub fn score(&self) -> String {
        format!("{} - {}", self.scored, self.missed)
    }
}

/// Predicted scorelines for a hypothetical match, most likely first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    /// Sum of all probabilities. Not normalised to 100.
    pub sum: f64,
    pub player: String,
    pub opponent: String,
    pub match_type: MatchType,
    pub outcomes: Vec<PredictionOutcome>,
}

impl MatchPrediction {
    pub fn most_likely(&self) -> Option<&PredictionOutcome> {
        self.outcomes.first()
    }

    pub fn find(&self, scored: u32, missed: u32) -> Option<&PredictionOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.scored == scored && o.missed == missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_format() {
        let outcome = PredictionOutcome {
            scored: 11,
            missed: 3,
            probability: 4.2,
        };
        assert_eq!(outcome.score(), "11 - 3");
    }

    #[test]
    fn test_lookup() {
        let prediction = MatchPrediction {
            sum: 7.0,
            player: "Alice".to_string(),
            opponent: "Bob".to_string(),
            match_type: MatchType::Short,
            outcomes: vec![
                PredictionOutcome {
                    scored: 11,
                    missed: 3,
                    probability: 4.0,
                },
                PredictionOutcome {
                    scored: 9,
                    missed: 11,
                    probability: 3.0,
                },
            ],
        };

        assert_eq!(prediction.most_likely().unwrap().score(), "11 - 3");
        assert_eq!(prediction.find(9, 11).unwrap().probability, 3.0);
        assert!(prediction.find(11, 11).is_none());
    }
}
