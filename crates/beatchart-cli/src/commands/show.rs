//! Show command for inspecting a stored chart.

use std::path::Path;

use anyhow::{Result, bail};
use beatchart::ChartStore;

use crate::display;

pub fn run(store_dir: &Path, session: &str, json: bool) -> Result<()> {
    let store = super::open_store(store_dir)?;
    let Some(chart) = store.load(session)? else {
        bail!("No chart stored for session {}", session);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        println!("{}", display::format_chart(session, &chart));
    }
    Ok(())
}
