//! Tournament phases a match can be played in.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStage {
    #[default]
    Friendly,
    Group,
    PlayOffUpperBracket,
    PlayOffLowBracket,
    FinalUpperBracket,
    FinalLowerBracket,
    GrandFinal,
}

impl TournamentStage {
    /// Human-readable label used in match listings.
    pub fn details(&self) -> &'static str {
        match self {
            TournamentStage::Friendly => "Friendly",
            TournamentStage::Group => "Group stage",
            TournamentStage::PlayOffUpperBracket => "Play-off upper bracket",
            TournamentStage::PlayOffLowBracket => "Play-off lower bracket",
            TournamentStage::FinalUpperBracket => "Upper bracket final",
            TournamentStage::FinalLowerBracket => "Lower bracket final",
            TournamentStage::GrandFinal => "Grand final",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "FRIENDLY" => Some(TournamentStage::Friendly),
            "GROUP" => Some(TournamentStage::Group),
            "PLAY_OFF_UPPER_BRACKET" => Some(TournamentStage::PlayOffUpperBracket),
            "PLAY_OFF_LOW_BRACKET" => Some(TournamentStage::PlayOffLowBracket),
            "FINAL_UPPER_BRACKET" => Some(TournamentStage::FinalUpperBracket),
            "FINAL_LOWER_BRACKET" => Some(TournamentStage::FinalLowerBracket),
            "GRAND_FINAL" => Some(TournamentStage::GrandFinal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(TournamentStage::parse("group"), Some(TournamentStage::Group));
        assert_eq!(
            TournamentStage::parse("grand-final"),
            Some(TournamentStage::GrandFinal)
        );
        assert_eq!(TournamentStage::parse("semi"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TournamentStage::PlayOffLowBracket).unwrap();
        assert_eq!(json, "\"PLAY_OFF_LOW_BRACKET\"");

        let stage: TournamentStage = serde_json::from_str("\"GRAND_FINAL\"").unwrap();
        assert_eq!(stage, TournamentStage::GrandFinal);
    }

    #[test]
    fn test_default_is_friendly() {
        assert_eq!(TournamentStage::default(), TournamentStage::Friendly);
        assert_eq!(TournamentStage::default().details(), "Friendly");
    }
}
