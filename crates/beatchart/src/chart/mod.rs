//! Chart data model.
//!
//! This module contains the persisted representation of a playable level:
//! - `Difficulty` - difficulty levels (easy, normal, hard)
//! - `Note`, `NoteKind`, `NoteKey` - single playable events and their identity
//! - `Chart` - tempo, duration, difficulty and the note sequence

mod chart;
mod difficulty;
mod note;

pub use chart::*;
pub use difficulty::*;
pub use note::*;
