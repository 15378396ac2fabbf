//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod delete;
pub mod generate;
pub mod play;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use beatchart::JsonFileChartStore;

/// Open the chart store, creating its directory if needed.
pub fn open_store(store_dir: &Path) -> Result<JsonFileChartStore> {
    JsonFileChartStore::new(store_dir)
        .with_context(|| format!("Failed to open chart store at {}", store_dir.display()))
}
