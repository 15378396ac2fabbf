use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::chart::Note;
use crate::config::judge::{
    GOOD_SCORE, GOOD_WINDOW, GREAT_SCORE, GREAT_WINDOW, PERFECT_SCORE, PERFECT_WINDOW,
};

/// Accuracy tier of a single hit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Judgment {
    Perfect,
    Great,
    Good,
    Miss,
}

impl Judgment {
    /// Classify a hit by its distance in seconds from the note.
    ///
    /// Every window is half-open, so a hit exactly on a boundary falls into
    /// the stricter tier below it. Offsets are compared in whole
    /// microseconds; a non-finite offset is a miss.
    pub fn from_offset(offset: f64) -> Self {
        if !offset.is_finite() {
            return Self::Miss;
        }
        let offset = micros(offset.abs());
        if offset < micros(PERFECT_WINDOW) {
            Self::Perfect
        } else if offset < micros(GREAT_WINDOW) {
            Self::Great
        } else if offset < micros(GOOD_WINDOW) {
            Self::Good
        } else {
            Self::Miss
        }
    }

    pub fn classify(note: &Note, hit_time: f64) -> Self {
        Self::from_offset(hit_time - note.time)
    }

    pub fn score(&self) -> u32 {
        match self {
            Self::Perfect => PERFECT_SCORE,
            Self::Great => GREAT_SCORE,
            Self::Good => GOOD_SCORE,
            Self::Miss => 0,
        }
    }

    pub fn keeps_combo(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

fn micros(seconds: f64) -> i64 {
    (seconds * 1e6).round() as i64
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offset_tiers() {
        assert_eq!(Judgment::from_offset(0.0), Judgment::Perfect);
        assert_eq!(Judgment::from_offset(0.04), Judgment::Perfect);
        assert_eq!(Judgment::from_offset(0.07), Judgment::Great);
        assert_eq!(Judgment::from_offset(0.12), Judgment::Good);
        assert_eq!(Judgment::from_offset(0.20), Judgment::Miss);
    }

    #[test]
    fn test_from_offset_boundaries() {
        assert_eq!(Judgment::from_offset(0.05), Judgment::Great);
        assert_eq!(Judgment::from_offset(0.10), Judgment::Good);
        assert_eq!(Judgment::from_offset(0.15), Judgment::Miss);
    }

    #[test]
    fn test_classify_boundaries_with_note_offsets() {
        // differences of these times land a hair off the window edges in f64
        assert_eq!(Judgment::classify(&Note::tap(0.1, 0, 0.5), 0.15), Judgment::Great);
        assert_eq!(Judgment::classify(&Note::tap(0.2, 0, 0.5), 0.15), Judgment::Great);
        assert_eq!(Judgment::classify(&Note::tap(1.3, 0, 0.5), 1.4), Judgment::Good);
        assert_eq!(Judgment::classify(&Note::tap(2.7, 0, 0.5), 2.85), Judgment::Miss);
        assert_eq!(Judgment::classify(&Note::tap(0.1, 0, 0.5), 0.1499), Judgment::Perfect);
    }

    #[test]
    fn test_non_finite_offset_is_miss() {
        assert_eq!(Judgment::from_offset(f64::NAN), Judgment::Miss);
        assert_eq!(Judgment::from_offset(f64::NEG_INFINITY), Judgment::Miss);
    }

    #[test]
    fn test_early_and_late_are_symmetric() {
        assert_eq!(Judgment::from_offset(-0.04), Judgment::Perfect);
        assert_eq!(Judgment::from_offset(-0.12), Judgment::Good);
        assert_eq!(Judgment::from_offset(-0.15), Judgment::Miss);
    }

    #[test]
    fn test_classify_against_note() {
        let note = Note::tap(10.0, 0, 0.5);
        assert_eq!(Judgment::classify(&note, 10.03), Judgment::Perfect);
        assert_eq!(Judgment::classify(&note, 9.92), Judgment::Great);
        assert_eq!(Judgment::classify(&note, 11.0), Judgment::Miss);
    }

    #[test]
    fn test_score_and_combo() {
        assert_eq!(Judgment::Perfect.score(), 100);
        assert_eq!(Judgment::Great.score(), 80);
        assert_eq!(Judgment::Good.score(), 50);
        assert_eq!(Judgment::Miss.score(), 0);
        assert!(Judgment::Good.keeps_combo());
        assert!(!Judgment::Miss.keeps_combo());
    }

    #[test]
    fn test_display() {
        assert_eq!(Judgment::Perfect.to_string(), "perfect");
        assert_eq!(Judgment::Miss.to_string(), "miss");
    }
}
