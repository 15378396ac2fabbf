//! Delete command for removing a stored chart.

use std::path::Path;

use anyhow::Result;
use beatchart::ChartStore;

pub fn run(store_dir: &Path, session: &str) -> Result<()> {
    let store = super::open_store(store_dir)?;
    store.delete(session)?;
    eprintln!("Deleted chart {}", session);
    Ok(())
}
