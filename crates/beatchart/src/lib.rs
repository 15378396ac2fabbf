//! # beatchart
//!
//! Rhythm-game charts from audio analysis, and hit judgment against them.
//!
//! This crate provides:
//! - The `AudioFeatures` input contract (beats, onsets, onset intensities)
//! - Chart generation with difficulty policies and lane anti-repetition
//! - The chart/note data model and its JSON form
//! - A timing judge that scores hits and ranks a play session
//! - Chart stores keyed by session id

pub mod chart;
pub mod config;
pub mod error;
pub mod features;
pub mod generator;
pub mod judge;
pub mod storage;

// Re-export from chart module
pub use chart::{Chart, Difficulty, Note, NoteKey, NoteKind};

// Re-export from config module
pub use config::{DifficultyPolicy, DifficultyTable, GeneratorConfig};

// Re-export from error module
pub use error::{Error, Result};

pub use features::AudioFeatures;

pub use generator::ChartGenerator;

// Re-export from judge module
pub use judge::{
    Clock, HitResult, Judgment, JudgmentCounts, ManualClock, PlayState, Rank, ScoreSummary,
    SystemClock, TimingJudge,
};

// Re-export from storage module
pub use storage::{ChartStore, JsonFileChartStore, MemoryChartStore};
