//! Chart generation from audio features.
//!
//! Each onset becomes one or more notes. How many, in which lanes, of which
//! kind and for how long is drawn at random under the selected difficulty
//! policy:
//! - `sampling` - note count, note kind and sustain length models
//! - `lanes` - lane selection with the recent-lane window

mod lanes;
mod sampling;

pub use lanes::LaneSelector;
pub use sampling::{
    NoteKindSampler, note_count_weights, note_kind_probabilities, sample_note_count,
    sustain_duration,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::chart::{Chart, Difficulty, Note, NoteKind};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::features::AudioFeatures;

/// Turns `AudioFeatures` into a `Chart`.
///
/// The generator itself is immutable; all randomness comes from the `Rng`
/// passed to each call, so one generator can serve many sessions.
#[derive(Debug, Clone, Default)]
pub struct ChartGenerator {
    config: GeneratorConfig,
}

impl ChartGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a chart for a difficulty given by key (`"easy"`, `"normal"`, `"hard"`).
    pub fn generate_named<R: Rng + ?Sized>(
        &self,
        features: &AudioFeatures,
        difficulty: &str,
        rng: &mut R,
    ) -> Result<Chart> {
        let difficulty = Difficulty::from_key(difficulty)?;
        self.generate(features, difficulty, rng)
    }

    /// Generate with a fresh `StdRng` seeded from `seed`.
    pub fn generate_seeded(
        &self,
        features: &AudioFeatures,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Chart> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(features, difficulty, &mut rng)
    }

    /// Generate a chart, sorted by note time.
    ///
    /// An invalid difficulty policy fails the whole call. Malformed features
    /// (onset and intensity counts differ) produce an empty chart instead.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        features: &AudioFeatures,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Chart> {
        let policy = self.config.difficulty.policy(difficulty);
        policy.validate(self.config.lanes)?;
        let kinds = NoteKindSampler::new(policy)?;
        let selector = LaneSelector::new(self.config.lanes);

        let mut chart = Chart::new(features.tempo, features.duration, difficulty);

        if let Err(e) = features.validate() {
            warn!("Generating empty {} chart: {}", difficulty, e);
            return Ok(chart);
        }

        debug!(
            "Generating {} chart from {} onsets, {} beats",
            difficulty,
            features.onset_count(),
            features.beat_count()
        );

        let mut notes: Vec<Note> = Vec::with_capacity(features.onset_count());
        for (i, &time) in features.onset_times.iter().enumerate() {
            let intensity = features.intensity_at(i);
            let count = sample_note_count(intensity, policy.max_notes_per_beat, rng)?;

            for lane in selector.select(&notes, time, count, rng) {
                let kind = kinds.sample(intensity, rng);
                let duration = sustain_duration(kind, time, features, rng);
                notes.push(Note::new(time, lane, kind, duration, intensity));
            }
        }

        chart.notes = notes;
        chart.sort_notes();

        info!(
            "Generated {} chart: {} notes ({} tap, {} hold, {} slide)",
            difficulty,
            chart.note_count(),
            chart.count_by_kind(NoteKind::Tap),
            chart.count_by_kind(NoteKind::Hold),
            chart.count_by_kind(NoteKind::Slide)
        );

        Ok(chart)
    }
}
