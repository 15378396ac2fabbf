//! Probability models behind note count, note type and sustain length.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::chart::NoteKind;
use crate::config::DifficultyPolicy;
use crate::config::generation::{
    CHORD_WEIGHT, FALLBACK_SUSTAIN, KIND_BOOST, LOUD_INTENSITY, MIN_SUSTAIN_GAP, QUIET_INTENSITY,
    SLIDE_SCALE,
};
use crate::error::{Error, Result};
use crate::features::AudioFeatures;

/// Relative weights for `1..=max_notes` notes at an onset of the given intensity.
///
/// A single note keeps `1 - 0.7x`; the rest is shared evenly by the chord sizes.
pub fn note_count_weights(intensity: f64, max_notes: u8) -> Vec<f64> {
    let max_notes = max_notes.max(1) as usize;
    if max_notes == 1 {
        return vec![1.0];
    }
    let chord_share = intensity * CHORD_WEIGHT;
    let mut weights = Vec::with_capacity(max_notes);
    weights.push(1.0 - chord_share);
    weights.extend(std::iter::repeat_n(
        chord_share / (max_notes - 1) as f64,
        max_notes - 1,
    ));
    weights
}

/// Draw how many notes to stack on one onset.
pub fn sample_note_count<R: Rng + ?Sized>(
    intensity: f64,
    max_notes: u8,
    rng: &mut R,
) -> Result<usize> {
    let weights = note_count_weights(intensity, max_notes);
    if weights.len() == 1 {
        return Ok(1);
    }
    let dist = WeightedIndex::<f64>::new(&weights)
        .map_err(|e| Error::InvalidInput(format!("note count weights {:?}: {}", weights, e)))?;
    Ok(dist.sample(rng) + 1)
}

/// Which of the three intensity bands an onset falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Quiet,
    Neutral,
    Loud,
}

impl Band {
    fn of(intensity: f64) -> Self {
        if intensity > LOUD_INTENSITY {
            Self::Loud
        } else if intensity < QUIET_INTENSITY {
            Self::Quiet
        } else {
            Self::Neutral
        }
    }
}

/// `[tap, hold, slide]` probabilities for a policy at a given intensity, summing to 1.
pub fn note_kind_probabilities(policy: &DifficultyPolicy, intensity: f64) -> [f64; 3] {
    let mut tap = policy.tap_note_prob();
    let mut hold = policy.hold_note_prob;
    let mut slide = policy.slide_note_prob;

    match Band::of(intensity) {
        Band::Loud => {
            hold *= KIND_BOOST;
            slide *= KIND_BOOST;
        }
        Band::Quiet => tap *= KIND_BOOST,
        Band::Neutral => {}
    }

    let total = tap + hold + slide;
    [tap / total, hold / total, slide / total]
}

/// Samples note kinds for one difficulty policy.
///
/// The three intensity bands each get their own precomputed distribution.
#[derive(Debug, Clone)]
pub struct NoteKindSampler {
    quiet: WeightedIndex<f64>,
    neutral: WeightedIndex<f64>,
    loud: WeightedIndex<f64>,
}

impl NoteKindSampler {
    pub fn new(policy: &DifficultyPolicy) -> Result<Self> {
        let build = |intensity: f64| {
            let probs = note_kind_probabilities(policy, intensity);
            WeightedIndex::<f64>::new(probs).map_err(|e| {
                Error::InvalidConfiguration(format!("note type weights {:?}: {}", probs, e))
            })
        };
        Ok(Self {
            quiet: build(0.0)?,
            neutral: build(0.5)?,
            loud: build(1.0)?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, intensity: f64, rng: &mut R) -> NoteKind {
        let dist = match Band::of(intensity) {
            Band::Quiet => &self.quiet,
            Band::Neutral => &self.neutral,
            Band::Loud => &self.loud,
        };
        NoteKind::ALL[dist.sample(rng)]
    }
}

/// Sustain length for a note of `kind` starting at `start`.
///
/// Holds run to the first beat more than 0.1s away, slides stop at 80% of that.
/// Without such a beat the length is drawn from 0.2s..=0.5s.
pub fn sustain_duration<R: Rng + ?Sized>(
    kind: NoteKind,
    start: f64,
    features: &AudioFeatures,
    rng: &mut R,
) -> f64 {
    if !kind.is_sustained() {
        return 0.0;
    }
    let Some(beat) = features.next_beat_after(start + MIN_SUSTAIN_GAP) else {
        return rng.random_range(FALLBACK_SUSTAIN);
    };

    match kind {
        NoteKind::Tap => 0.0,
        NoteKind::Hold => beat - start,
        NoteKind::Slide => (beat - start) * SLIDE_SCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_note_count_weights() {
        let weights = note_count_weights(1.0, 4);
        assert_eq!(weights.len(), 4);
        assert_close(weights[0], 0.3);
        assert_close(weights[1], 0.7 / 3.0);
        assert_close(weights.iter().sum::<f64>(), 1.0);

        assert_eq!(note_count_weights(0.8, 1), vec![1.0]);
    }

    #[test]
    fn test_silent_onset_is_single_note() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sample_note_count(0.0, 4, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_note_count_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut saw_chord = false;
        for _ in 0..200 {
            let n = sample_note_count(1.0, 3, &mut rng).unwrap();
            assert!((1..=3).contains(&n));
            saw_chord |= n > 1;
        }
        assert!(saw_chord);
    }

    #[test]
    fn test_kind_probabilities_neutral() {
        let [tap, hold, slide] = note_kind_probabilities(&DifficultyPolicy::NORMAL, 0.5);
        assert_close(tap, 0.7);
        assert_close(hold, 0.2);
        assert_close(slide, 0.1);
    }

    #[test]
    fn test_kind_probabilities_loud() {
        let [tap, hold, slide] = note_kind_probabilities(&DifficultyPolicy::NORMAL, 0.9);
        // 0.7 : 0.3 : 0.15 renormalized
        assert_close(tap, 0.7 / 1.15);
        assert_close(hold, 0.3 / 1.15);
        assert_close(slide, 0.15 / 1.15);
    }

    #[test]
    fn test_kind_probabilities_quiet() {
        let [tap, hold, slide] = note_kind_probabilities(&DifficultyPolicy::NORMAL, 0.1);
        // 1.05 : 0.2 : 0.1 renormalized
        assert_close(tap, 1.05 / 1.35);
        assert_close(hold, 0.2 / 1.35);
        assert_close(slide, 0.1 / 1.35);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of(0.8), Band::Neutral);
        assert_eq!(Band::of(0.3), Band::Neutral);
        assert_eq!(Band::of(0.81), Band::Loud);
        assert_eq!(Band::of(0.29), Band::Quiet);
    }

    #[test]
    fn test_kind_sampler_all_taps() {
        let policy = DifficultyPolicy {
            max_notes_per_beat: 1,
            hold_note_prob: 0.0,
            slide_note_prob: 0.0,
        };
        let sampler = NoteKindSampler::new(&policy).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..50 {
            assert_eq!(sampler.sample(i as f64 / 50.0, &mut rng), NoteKind::Tap);
        }
    }

    #[test]
    fn test_kind_sampler_no_taps() {
        let policy = DifficultyPolicy {
            max_notes_per_beat: 1,
            hold_note_prob: 0.5,
            slide_note_prob: 0.5,
        };
        let sampler = NoteKindSampler::new(&policy).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            assert_ne!(sampler.sample(0.1, &mut rng), NoteKind::Tap);
        }
    }

    #[test]
    fn test_sustain_duration_to_next_beat() {
        let features = AudioFeatures {
            beat_times: vec![1.0, 1.05, 1.5, 2.0],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(sustain_duration(NoteKind::Tap, 1.0, &features, &mut rng), 0.0);
        // 1.05 is too close, so the hold runs to 1.5
        assert_close(sustain_duration(NoteKind::Hold, 1.0, &features, &mut rng), 0.5);
        assert_close(sustain_duration(NoteKind::Slide, 1.0, &features, &mut rng), 0.4);
    }

    #[test]
    fn test_sustain_duration_fallback() {
        let features = AudioFeatures {
            beat_times: vec![0.5],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            let d = sustain_duration(NoteKind::Slide, 1.0, &features, &mut rng);
            assert!((0.2..=0.5).contains(&d));
        }
        assert_eq!(sustain_duration(NoteKind::Tap, 1.0, &features, &mut rng), 0.0);
    }
}
