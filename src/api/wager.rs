use serde::{Deserialize, Serialize};

/// Games this robot knows how to encode wagers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Game {
    Sport,
    Multiscore,
}

/// One of the three fixed outcomes of a sport match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Tie,
    Away,
}

/// Selected outcomes for a single match position of a board.
///
/// Serializes straight into the two selection shapes the platform accepts:
/// `{"outcomes":[...]}` for sport and `{"homeScores":[...],"awayScores":[...]}`
/// for multiscore. Selection order is significant and preserved as parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchSelection {
    Outcomes {
        outcomes: Vec<Outcome>,
    },
    Scores {
        #[serde(rename = "homeScores")]
        home: Vec<u32>,
        #[serde(rename = "awayScores")]
        away: Vec<u32>,
    },
}
