use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::config::generation::DEFAULT_INTENSITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteKind {
    #[default]
    Tap,
    Hold,
    Slide,
}

impl NoteKind {
    pub const ALL: [Self; 3] = [Self::Tap, Self::Hold, Self::Slide];

    /// Hold and slide notes carry a sustain length; taps do not.
    pub fn is_sustained(&self) -> bool {
        !matches!(self, Self::Tap)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a note within a chart: its exact time and its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteKey {
    time_bits: u64,
    lane: u8,
}

/// A single playable event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub time: f64,
    pub lane: u8,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

fn default_intensity() -> f64 {
    DEFAULT_INTENSITY
}

impl Note {
    pub fn tap(time: f64, lane: u8, intensity: f64) -> Self {
        Self {
            time,
            lane,
            kind: NoteKind::Tap,
            duration: 0.0,
            intensity,
        }
    }

    /// Build a note of any kind. Taps always get a zero duration.
    pub fn new(time: f64, lane: u8, kind: NoteKind, duration: f64, intensity: f64) -> Self {
        let duration = if kind.is_sustained() { duration } else { 0.0 };
        Self {
            time,
            lane,
            kind,
            duration,
            intensity,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.time + self.duration
    }

    pub fn key(&self) -> NoteKey {
        NoteKey {
            time_bits: self.time.to_bits(),
            lane: self.lane,
        }
    }

    /// `duration == 0` exactly when the note is a tap.
    pub fn is_consistent(&self) -> bool {
        match self.kind {
            NoteKind::Tap => self.duration == 0.0,
            NoteKind::Hold | NoteKind::Slide => self.duration > 0.0,
        }
    }
}
