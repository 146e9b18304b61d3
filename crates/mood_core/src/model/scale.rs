//! Happiness scale vocabulary.
//!
//! Fixed descriptions for each whole score and the coarse bands used to tint
//! scores in list views.

use crate::model::entry::is_valid_score;
use serde::{Deserialize, Serialize};

const SCORE_DESCRIPTIONS: [&str; 10] = [
    "Extremely unhappy: feeling hopeless, deeply dissatisfied, or emotionally distressed.",
    "Very unhappy: frequent sadness, anxiety, or numbness.",
    "Unhappy: life feels heavy, flat, or frustrating most of the time.",
    "Somewhat unhappy: mood is dull or restless, moments of discontent.",
    "Neutral: not particularly happy or unhappy, emotionally flat.",
    "Slightly happy: occasional positive emotions, but not consistent.",
    "Moderately happy: good mood most days, mild contentment.",
    "Happy: frequent joy, satisfaction, and emotional balance.",
    "Very happy: strong sense of purpose, presence, and fulfillment.",
    "Extremely happy: deep joy and peace, fully alive and present.",
];

/// Returns the scale description for `score` rounded to the nearest whole
/// number, or `None` outside `[1, 10]`.
pub fn describe_score(score: f64) -> Option<&'static str> {
    if !is_valid_score(score) {
        return None;
    }
    let index = score.round() as usize - 1;
    SCORE_DESCRIPTIONS.get(index).copied()
}

/// Coarse score tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// Scores up to 3.
    Low,
    /// Scores above 3 up to 5.
    Neutral,
    /// Scores above 5 up to 7.
    Good,
    /// Scores above 7.
    High,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            Self::Low
        } else if score <= 5.0 {
            Self::Neutral
        } else if score <= 7.0 {
            Self::Good
        } else {
            Self::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Neutral => "neutral",
            Self::Good => "good",
            Self::High => "high",
        }
    }
}
