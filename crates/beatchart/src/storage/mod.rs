//! Chart persistence keyed by session id.
//!
//! `ChartStore` is the seam to whatever keeps charts between generation and
//! play. Two implementations ship with the crate:
//! - `MemoryChartStore` - process-local map, for tests and single-run tools
//! - `JsonFileChartStore` - one JSON file per session in a directory
//!
//! Stores never retry; failures surface as `StorageUnavailable`.

mod file;
mod memory;

pub use file::JsonFileChartStore;
pub use memory::MemoryChartStore;

use crate::chart::Chart;
use crate::error::{Error, Result};

pub trait ChartStore: Send + Sync {
    fn save(&self, session_id: &str, chart: &Chart) -> Result<()>;

    /// `Ok(None)` when nothing is stored under `session_id`.
    fn load(&self, session_id: &str) -> Result<Option<Chart>>;

    /// Removing a missing session is not an error.
    fn delete(&self, session_id: &str) -> Result<()>;
}

/// Session ids: non-empty ASCII alphanumerics, `-` and `_`.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "invalid session id: {:?}",
            session_id
        )))
    }
}
