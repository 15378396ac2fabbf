//! Audio feature contract.
//!
//! `AudioFeatures` is produced by an external analysis step (beat tracking and
//! onset detection) and consumed read-only by the chart generator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::generation::DEFAULT_INTENSITY;
use crate::error::{Error, Result};

/// Onsets further than this (seconds) from a queried time do not count as "at" it.
const NEAREST_ONSET_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub tempo: f64,
    pub duration: f64,
    #[serde(default)]
    pub beat_times: Vec<f64>,
    #[serde(default)]
    pub onset_times: Vec<f64>,
    #[serde(default)]
    pub note_intensities: Vec<f64>,
}

impl AudioFeatures {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn beat_count(&self) -> usize {
        self.beat_times.len()
    }

    pub fn onset_count(&self) -> usize {
        self.onset_times.len()
    }

    /// Check the invariants the generator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.onset_times.len() != self.note_intensities.len() {
            return Err(Error::InvalidInput(format!(
                "{} onset times but {} intensities",
                self.onset_times.len(),
                self.note_intensities.len()
            )));
        }
        check_times("beat", &self.beat_times)?;
        check_times("onset", &self.onset_times)?;
        Ok(())
    }

    /// Intensity of onset `index`, clamped to `[0, 1]`.
    ///
    /// Missing or non-finite values fall back to the default intensity.
    pub fn intensity_at(&self, index: usize) -> f64 {
        match self.note_intensities.get(index) {
            Some(x) if x.is_finite() => x.clamp(0.0, 1.0),
            _ => DEFAULT_INTENSITY,
        }
    }

    /// Indices of onsets between two beats, `[beat_times[start], beat_times[end])`.
    pub fn onsets_in_beat_range(&self, start_beat: usize, end_beat: usize) -> Vec<usize> {
        let (Some(&start), Some(&end)) = (
            self.beat_times.get(start_beat),
            self.beat_times.get(end_beat),
        ) else {
            return Vec::new();
        };

        self.onset_times
            .iter()
            .enumerate()
            .filter(|&(_, &t)| start <= t && t < end)
            .map(|(i, _)| i)
            .collect()
    }

    /// Intensity of the onset nearest to `time`, or 0 if none is within 0.1s.
    pub fn intensity_at_time(&self, time: f64) -> f64 {
        let nearest = self
            .onset_times
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - time).abs().total_cmp(&(*b - time).abs()));

        match nearest {
            Some((i, &t)) if (t - time).abs() <= NEAREST_ONSET_TOLERANCE => self.intensity_at(i),
            _ => 0.0,
        }
    }

    /// First beat strictly after `time`.
    pub fn next_beat_after(&self, time: f64) -> Option<f64> {
        let idx = self.beat_times.partition_point(|&b| b <= time);
        self.beat_times.get(idx).copied()
    }
}

/// Times must be finite, non-negative and ascending.
fn check_times(what: &str, times: &[f64]) -> Result<()> {
    if let Some(i) = times.iter().position(|t| !t.is_finite() || *t < 0.0) {
        return Err(Error::InvalidInput(format!(
            "{} time {} at index {} is out of range",
            what, times[i], i
        )));
    }
    if let Some(i) = times.windows(2).position(|w| w[0] > w[1]) {
        return Err(Error::InvalidInput(format!(
            "{} times are not ascending at index {}",
            what,
            i + 1
        )));
    }
    Ok(())
}
