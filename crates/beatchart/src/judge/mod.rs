//! Hit timing judgment for a play session.
//!
//! This module contains:
//! - `TimingJudge` - the per-session state machine and score accumulator
//! - `Judgment` - accuracy tiers and the timing windows behind them
//! - `Rank`, `JudgmentCounts`, `ScoreSummary` - end-of-session results
//! - `Clock`, `SystemClock`, `ManualClock` - time sources for elapsed time

mod clock;
mod judgment;
mod rank;

pub use clock::*;
pub use judgment::*;
pub use rank::*;

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chart::{Chart, Note, NoteKey};
use crate::config::judge::CAPTURE_WINDOW;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

impl std::fmt::Display for PlayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lane press that landed on a note.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    pub note: Note,
    pub judgment: Judgment,
    /// `hit_time - note.time`; negative when early.
    pub offset: f64,
}

/// Judges hits against one chart and keeps the running score.
///
/// Every note can be judged once. Operations that are not valid in the
/// current play state fail with `PreconditionViolation` and change nothing.
pub struct TimingJudge<C: Clock = SystemClock> {
    chart: Chart,
    clock: C,
    state: PlayState,
    score: u32,
    combo: u32,
    max_combo: u32,
    counts: JudgmentCounts,
    judged: HashSet<NoteKey>,
    started_at: Duration,
    paused_at: Option<Duration>,
    paused_total: Duration,
}

impl TimingJudge<SystemClock> {
    pub fn new(chart: Chart) -> Self {
        Self::with_clock(chart, SystemClock::new())
    }
}

impl<C: Clock> TimingJudge<C> {
    /// Create a judge reading time from `clock`. The chart is sorted on entry.
    pub fn with_clock(mut chart: Chart, clock: C) -> Self {
        chart.sort_notes();
        Self {
            chart,
            clock,
            state: PlayState::Idle,
            score: 0,
            combo: 0,
            max_combo: 0,
            counts: JudgmentCounts::default(),
            judged: HashSet::new(),
            started_at: Duration::ZERO,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn counts(&self) -> JudgmentCounts {
        self.counts
    }

    pub fn is_judged(&self, note: &Note) -> bool {
        self.judged.contains(&note.key())
    }

    /// Notes not judged yet.
    pub fn remaining_notes(&self) -> usize {
        self.chart
            .notes
            .iter()
            .filter(|n| !self.judged.contains(&n.key()))
            .count()
    }

    /// Begin a new run, clearing all counters.
    pub fn start_game(&mut self) -> Result<()> {
        match self.state {
            PlayState::Idle | PlayState::Finished => {}
            other => {
                return Err(Error::PreconditionViolation(format!(
                    "cannot start a game while {}",
                    other
                )));
            }
        }

        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.counts = JudgmentCounts::default();
        self.judged.clear();
        self.started_at = self.clock.now();
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.state = PlayState::Playing;

        info!("Game started ({} notes)", self.chart.note_count());
        Ok(())
    }

    pub fn pause_game(&mut self) -> Result<()> {
        self.require(PlayState::Playing, "pause")?;
        self.paused_at = Some(self.clock.now());
        self.state = PlayState::Paused;
        debug!("Game paused");
        Ok(())
    }

    pub fn resume_game(&mut self) -> Result<()> {
        self.require(PlayState::Paused, "resume")?;
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += self.clock.now().saturating_sub(paused_at);
        }
        self.state = PlayState::Playing;
        debug!("Game resumed");
        Ok(())
    }

    /// End the run and return its summary.
    pub fn finish_game(&mut self) -> Result<ScoreSummary> {
        match self.state {
            PlayState::Playing | PlayState::Paused => {}
            other => {
                return Err(Error::PreconditionViolation(format!(
                    "cannot finish a game while {}",
                    other
                )));
            }
        }

        self.paused_at = None;
        self.state = PlayState::Finished;
        let summary = self.calculate_final_score();
        info!(
            "Game finished: score {} rank {} ({:.2}%)",
            summary.score,
            summary.rank,
            summary.accuracy_percent()
        );
        Ok(summary)
    }

    /// Seconds of play since `start_game`, excluding pauses. 0 unless playing.
    pub fn elapsed_time(&self) -> f64 {
        if self.state != PlayState::Playing {
            return 0.0;
        }
        self.clock
            .now()
            .saturating_sub(self.started_at)
            .saturating_sub(self.paused_total)
            .as_secs_f64()
    }

    /// Notes due within `[current_time, current_time + lookahead)`.
    pub fn active_notes(&self, current_time: f64, lookahead: f64) -> &[Note] {
        self.chart
            .notes_in_time_range(current_time, current_time + lookahead)
    }

    /// Judge a hit at `hit_time` against `note`.
    pub fn judge_note(&mut self, note: &Note, hit_time: f64) -> Result<Judgment> {
        self.require(PlayState::Playing, "judge a note")?;
        let key = note.key();
        if self.judged.contains(&key) {
            return Err(Error::PreconditionViolation(format!(
                "note at {:.3}s in lane {} was already judged",
                note.time, note.lane
            )));
        }

        let judgment = Judgment::classify(note, hit_time);
        self.apply(key, judgment);
        debug!(
            "lane {} @ {:.3}s hit at {:.3}s: {} (combo {})",
            note.lane, note.time, hit_time, judgment, self.combo
        );
        Ok(judgment)
    }

    /// Judge a press in `lane` against the closest unjudged note in reach.
    ///
    /// Returns `None`, changing nothing, when no unjudged note in the lane is
    /// within the capture window.
    pub fn hit_lane(&mut self, lane: u8, hit_time: f64) -> Result<Option<HitResult>> {
        self.require(PlayState::Playing, "judge a note")?;

        let lo = self
            .chart
            .notes
            .partition_point(|n| n.time < hit_time - CAPTURE_WINDOW);
        let target = self.chart.notes[lo..]
            .iter()
            .take_while(|n| n.time <= hit_time + CAPTURE_WINDOW)
            .filter(|n| n.lane == lane && !self.judged.contains(&n.key()))
            .min_by(|a, b| {
                (a.time - hit_time)
                    .abs()
                    .total_cmp(&(b.time - hit_time).abs())
            })
            .cloned();

        let Some(note) = target else {
            return Ok(None);
        };
        let judgment = self.judge_note(&note, hit_time)?;
        Ok(Some(HitResult {
            offset: hit_time - note.time,
            note,
            judgment,
        }))
    }

    /// Count every unjudged note that has scrolled out of reach as a miss.
    ///
    /// Returns the number of notes missed by this call.
    pub fn sweep_missed(&mut self, current_time: f64) -> Result<usize> {
        self.require(PlayState::Playing, "sweep missed notes")?;

        let cutoff = self
            .chart
            .notes
            .partition_point(|n| n.time < current_time - CAPTURE_WINDOW);
        let missed: Vec<NoteKey> = self.chart.notes[..cutoff]
            .iter()
            .map(Note::key)
            .filter(|key| !self.judged.contains(key))
            .collect();

        for key in &missed {
            self.apply(*key, Judgment::Miss);
        }
        if !missed.is_empty() {
            debug!("{} notes passed unhit before {:.3}s", missed.len(), current_time);
        }
        Ok(missed.len())
    }

    /// Summary of the counters so far. Does not change state.
    pub fn calculate_final_score(&self) -> ScoreSummary {
        ScoreSummary::new(self.score, self.max_combo, self.counts)
    }

    fn apply(&mut self, key: NoteKey, judgment: Judgment) {
        self.judged.insert(key);
        match judgment {
            Judgment::Perfect => self.counts.perfect += 1,
            Judgment::Great => self.counts.great += 1,
            Judgment::Good => self.counts.good += 1,
            Judgment::Miss => self.counts.miss += 1,
        }
        self.score += judgment.score();
        if judgment.keeps_combo() {
            self.combo += 1;
        } else {
            self.combo = 0;
        }
        self.max_combo = self.max_combo.max(self.combo);
    }

    fn require(&self, state: PlayState, action: &str) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(Error::PreconditionViolation(format!(
                "cannot {} while {}",
                action, self.state
            )))
        }
    }
}
