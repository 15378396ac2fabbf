use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::Difficulty;
use crate::config::generation;
use crate::error::{Error, Result};

/// Note density and note-type mix for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPolicy {
    pub max_notes_per_beat: u8,
    pub hold_note_prob: f64,
    pub slide_note_prob: f64,
}

impl DifficultyPolicy {
    pub const EASY: Self = Self {
        max_notes_per_beat: 2,
        hold_note_prob: 0.1,
        slide_note_prob: 0.05,
    };

    pub const NORMAL: Self = Self {
        max_notes_per_beat: 3,
        hold_note_prob: 0.2,
        slide_note_prob: 0.1,
    };

    pub const HARD: Self = Self {
        max_notes_per_beat: 4,
        hold_note_prob: 0.3,
        slide_note_prob: 0.2,
    };

    pub fn tap_note_prob(&self) -> f64 {
        (1.0 - self.hold_note_prob - self.slide_note_prob).max(0.0)
    }

    /// Check the policy can be sampled on a playfield with `lanes` lanes.
    pub fn validate(&self, lanes: u8) -> Result<()> {
        if self.max_notes_per_beat == 0 {
            return Err(Error::InvalidConfiguration(
                "max_notes_per_beat must be at least 1".to_string(),
            ));
        }
        if self.max_notes_per_beat > lanes {
            return Err(Error::InvalidConfiguration(format!(
                "max_notes_per_beat ({}) exceeds lane count ({})",
                self.max_notes_per_beat, lanes
            )));
        }
        for (name, p) in [
            ("hold_note_prob", self.hold_note_prob),
            ("slide_note_prob", self.slide_note_prob),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfiguration(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.hold_note_prob + self.slide_note_prob > 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "hold_note_prob + slide_note_prob must not exceed 1, got {}",
                self.hold_note_prob + self.slide_note_prob
            )));
        }
        Ok(())
    }
}

/// Policies for every difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultyPolicy,
    pub normal: DifficultyPolicy,
    pub hard: DifficultyPolicy,
}

impl DifficultyTable {
    pub fn policy(&self, difficulty: Difficulty) -> &DifficultyPolicy {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyPolicy::EASY,
            normal: DifficultyPolicy::NORMAL,
            hard: DifficultyPolicy::HARD,
        }
    }
}

/// Everything the chart generator is parameterised by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub lanes: u8,
    pub difficulty: DifficultyTable,
}

impl GeneratorConfig {
    /// Load a config from a TOML file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded generator config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the lane count and every difficulty policy.
    pub fn validate(&self) -> Result<()> {
        if self.lanes == 0 {
            return Err(Error::InvalidConfiguration(
                "lanes must be at least 1".to_string(),
            ));
        }
        for difficulty in Difficulty::ALL {
            self.difficulty
                .policy(difficulty)
                .validate(self.lanes)
                .map_err(|e| match e {
                    Error::InvalidConfiguration(msg) => {
                        Error::InvalidConfiguration(format!("[{}] {}", difficulty, msg))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lanes: generation::LANES,
            difficulty: DifficultyTable::default(),
        }
    }
}
