use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chart::{Difficulty, Note, NoteKind};
use crate::error::{Error, Result};

/// A complete playable level for one track at one difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub tempo: f64,
    pub duration: f64,
    pub difficulty: Difficulty,
    pub notes: Vec<Note>,
}

impl Chart {
    pub fn new(tempo: f64, duration: f64, difficulty: Difficulty) -> Self {
        Self {
            tempo,
            duration,
            difficulty,
            notes: Vec::new(),
        }
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Sort notes by time, then lane.
    pub fn sort_notes(&mut self) {
        self.notes
            .sort_by(|a, b| a.time.total_cmp(&b.time).then(a.lane.cmp(&b.lane)));
    }

    pub fn is_sorted(&self) -> bool {
        self.notes.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Notes with `start <= time < end`. Requires sorted notes.
    pub fn notes_in_time_range(&self, start: f64, end: f64) -> &[Note] {
        let lo = self.notes.partition_point(|n| n.time < start);
        let hi = self.notes.partition_point(|n| n.time < end).max(lo);
        &self.notes[lo..hi]
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn count_by_kind(&self, kind: NoteKind) -> usize {
        self.notes.iter().filter(|n| n.kind == kind).count()
    }

    /// Check every note against the chart invariants.
    ///
    /// Reports the first note with a lane outside `0..lanes`, then anything
    /// `validate_notes` rejects.
    pub fn validate(&self, lanes: u8) -> Result<()> {
        let out_of_range = self
            .notes
            .iter()
            .enumerate()
            .find(|(_, n)| n.lane >= lanes);
        if let Some((index, note)) = out_of_range {
            return Err(Error::InvalidInput(format!(
                "note {} uses lane {} but the chart has {} lanes",
                index, note.lane, lanes
            )));
        }
        self.validate_notes()
    }

    /// Lane-count independent checks: a finite non-negative time, no
    /// tap/duration mismatch, and no `(time, lane)` slot used twice.
    pub fn validate_notes(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.notes.len());
        for (index, note) in self.notes.iter().enumerate() {
            if !note.time.is_finite() || note.time < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "note {} has invalid time {}",
                    index, note.time
                )));
            }
            if !note.is_consistent() {
                return Err(Error::InvalidInput(format!(
                    "note {} is a {} with duration {}",
                    index, note.kind, note.duration
                )));
            }
            if !seen.insert(note.key()) {
                return Err(Error::InvalidInput(format!(
                    "note {} duplicates time {} in lane {}",
                    index, note.time, note.lane
                )));
            }
        }
        Ok(())
    }
}
