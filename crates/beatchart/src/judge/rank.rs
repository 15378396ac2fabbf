use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::config::judge::{GOOD_SCORE, GREAT_SCORE, PERFECT_SCORE};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
)]
pub enum Rank {
    #[default]
    F,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Rank for an accuracy fraction in `[0, 1]`.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 0.95 {
            Self::S
        } else if accuracy >= 0.90 {
            Self::A
        } else if accuracy >= 0.80 {
            Self::B
        } else if accuracy >= 0.70 {
            Self::C
        } else if accuracy >= 0.60 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Per-tier hit counts of a play session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
}

impl JudgmentCounts {
    pub fn total(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }

    /// Weighted hit quality as a fraction: perfect 100, great 80, good 50, miss 0.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let earned =
            self.perfect * PERFECT_SCORE + self.great * GREAT_SCORE + self.good * GOOD_SCORE;
        earned as f64 / (total as f64 * PERFECT_SCORE as f64)
    }

    pub fn is_full_combo(&self) -> bool {
        self.miss == 0 && self.total() > 0
    }
}

/// Final result of a play session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub rank: Rank,
    pub accuracy: f64,
    pub max_combo: u32,
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
}

impl ScoreSummary {
    pub fn new(score: u32, max_combo: u32, counts: JudgmentCounts) -> Self {
        let accuracy = counts.accuracy();
        Self {
            score,
            rank: Rank::from_accuracy(accuracy),
            accuracy,
            max_combo,
            perfect: counts.perfect,
            great: counts.great,
            good: counts.good,
            miss: counts.miss,
        }
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }

    pub fn total_judged(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }
}
