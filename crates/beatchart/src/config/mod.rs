//! Configuration and fixed tuning constants.
//!
//! This module contains:
//! - `DifficultyPolicy`, `DifficultyTable` - per-difficulty generation policies
//! - `GeneratorConfig` - lane count plus the difficulty table, loadable from TOML
//! - Generation and judgment constants

mod difficulty;

pub use difficulty::*;

/// Chart generation tuning.
pub mod generation {
    use std::ops::RangeInclusive;

    /// Default number of parallel lanes.
    pub const LANES: u8 = 4;

    /// Notes closer than this (seconds) to the onset being placed mark their lane as recent.
    pub const RECENT_LANE_WINDOW: f64 = 0.3;

    /// A sustain ends on the first beat at least this far (seconds) past its start.
    pub const MIN_SUSTAIN_GAP: f64 = 0.1;

    /// Slides stop short of the next beat by this factor.
    pub const SLIDE_SCALE: f64 = 0.8;

    /// Sustain length (seconds) used when no later beat exists.
    pub const FALLBACK_SUSTAIN: RangeInclusive<f64> = 0.2..=0.5;

    /// Intensity assumed when an onset has none.
    pub const DEFAULT_INTENSITY: f64 = 0.5;

    /// Share of probability mass moved from single notes to chords at full intensity.
    pub const CHORD_WEIGHT: f64 = 0.7;

    /// Above this intensity, hold and slide notes become more likely.
    pub const LOUD_INTENSITY: f64 = 0.8;

    /// Below this intensity, tap notes become more likely.
    pub const QUIET_INTENSITY: f64 = 0.3;

    /// Multiplier applied to the favoured note types.
    pub const KIND_BOOST: f64 = 1.5;
}

/// Hit judgment windows and scoring. Not configurable.
pub mod judge {
    /// Offsets strictly below this (seconds) are Perfect.
    pub const PERFECT_WINDOW: f64 = 0.05;

    /// Offsets strictly below this are Great.
    pub const GREAT_WINDOW: f64 = 0.10;

    /// Offsets strictly below this are Good; anything else is a Miss.
    pub const GOOD_WINDOW: f64 = 0.15;

    /// A lane press further than this from every note hits nothing.
    pub const CAPTURE_WINDOW: f64 = 0.2;

    pub const PERFECT_SCORE: u32 = 100;
    pub const GREAT_SCORE: u32 = 80;
    pub const GOOD_SCORE: u32 = 50;

    /// Default look-ahead (seconds) for the active note window.
    pub const DEFAULT_LOOKAHEAD: f64 = 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_windows_are_ordered() {
        assert!(judge::PERFECT_WINDOW < judge::GREAT_WINDOW);
        assert!(judge::GREAT_WINDOW < judge::GOOD_WINDOW);
        assert!(judge::GOOD_WINDOW < judge::CAPTURE_WINDOW);
    }

    #[test]
    fn test_fallback_sustain_range() {
        assert_eq!(*generation::FALLBACK_SUSTAIN.start(), 0.2);
        assert_eq!(*generation::FALLBACK_SUSTAIN.end(), 0.5);
    }
}
