//! Generate command: features file in, stored chart out.

use std::path::Path;

use anyhow::{Context, Result};
use beatchart::{AudioFeatures, ChartGenerator, ChartStore, GeneratorConfig};
use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::display;

pub fn run(
    store_dir: &Path,
    features_path: &Path,
    difficulty: &str,
    seed: Option<u64>,
    session: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let config = GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => GeneratorConfig::default(),
    };

    let features = AudioFeatures::load(features_path).with_context(|| {
        format!("Failed to load audio features from {}", features_path.display())
    })?;
    info!(
        "Loaded {} onsets and {} beats ({:.1} BPM, {:.1}s)",
        features.onset_count(),
        features.beat_count(),
        features.tempo,
        features.duration
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let generator = ChartGenerator::new(config);
    let chart = generator.generate_named(&features, difficulty, &mut rng)?;

    let session_id =
        session.unwrap_or_else(|| Local::now().format("%Y%m%d_%H%M%S").to_string());
    let store = super::open_store(store_dir)?;
    store
        .save(&session_id, &chart)
        .with_context(|| format!("Failed to save chart {}", session_id))?;

    println!("{}", display::format_chart(&session_id, &chart));
    Ok(())
}
