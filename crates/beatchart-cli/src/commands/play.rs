//! Play command: replays recorded lane presses through the timing judge.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use beatchart::{ChartStore, Difficulty, ScoreSummary, TimingJudge};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::display;

/// One recorded lane press
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Hit {
    pub lane: u8,
    pub time: f64,
}

/// Result file contents
#[derive(Debug, Serialize)]
struct PlayRecord<'a> {
    session: &'a str,
    difficulty: Difficulty,
    played_at: DateTime<Local>,
    summary: &'a ScoreSummary,
}

pub fn run(
    store_dir: &Path,
    session: &str,
    hits_path: &Path,
    results_dir: Option<&Path>,
) -> Result<()> {
    let store = super::open_store(store_dir)?;
    let Some(chart) = store.load(session)? else {
        bail!("No chart stored for session {}", session);
    };
    let difficulty = chart.difficulty;

    let mut hits = load_hits(hits_path)?;
    hits.sort_by(|a, b| a.time.total_cmp(&b.time));
    info!("Replaying {} presses against {} notes", hits.len(), chart.note_count());

    let summary = replay(TimingJudge::new(chart), &hits)?;
    println!("{}", display::format_summary(session, &summary));

    if let Some(dir) = results_dir {
        let path = write_result(dir, session, difficulty, &summary)?;
        info!("Result written to {}", path.display());
    }
    Ok(())
}

fn load_hits(path: &Path) -> Result<Vec<Hit>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hits from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse hits from {}", path.display()))
}

/// Judge presses in time order, then miss whatever is left.
pub fn replay(mut judge: TimingJudge, hits: &[Hit]) -> Result<ScoreSummary> {
    judge.start_game()?;

    for hit in hits {
        judge.sweep_missed(hit.time)?;
        match judge.hit_lane(hit.lane, hit.time)? {
            Some(result) => debug!(
                "lane {} @ {:.3}s: {} ({:+.3}s)",
                hit.lane, hit.time, result.judgment, result.offset
            ),
            None => debug!("lane {} @ {:.3}s: no note", hit.lane, hit.time),
        }
    }
    judge.sweep_missed(f64::INFINITY)?;

    Ok(judge.finish_game()?)
}

fn write_result(
    dir: &Path,
    session: &str,
    difficulty: Difficulty,
    summary: &ScoreSummary,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

    let now = Local::now();
    let path = dir.join(format!("Result_{}.json", now.format("%Y_%m_%d_%H_%M_%S")));
    let record = PlayRecord {
        session,
        difficulty,
        played_at: now,
        summary,
    };
    fs::write(&path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatchart::{Chart, Note, Rank};

    fn three_note_chart() -> Chart {
        let mut chart = Chart::new(120.0, 4.0, Difficulty::Normal);
        chart.add_note(Note::tap(1.0, 0, 0.5));
        chart.add_note(Note::tap(2.0, 1, 0.5));
        chart.add_note(Note::tap(3.0, 2, 0.5));
        chart
    }

    #[test]
    fn test_parse_hits() {
        let hits: Vec<Hit> =
            serde_json::from_str(r#"[{"lane": 0, "time": 1.25}, {"lane": 3, "time": 2.5}]"#)
                .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].lane, 3);
        assert!((hits[0].time - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_replay_counts_unhit_notes_as_missed() {
        let hits = [
            Hit { lane: 0, time: 1.01 },
            Hit { lane: 1, time: 2.07 },
            Hit { lane: 3, time: 2.5 },
        ];
        let summary = replay(TimingJudge::new(three_note_chart()), &hits).unwrap();

        assert_eq!(summary.perfect, 1);
        assert_eq!(summary.great, 1);
        assert_eq!(summary.good, 0);
        assert_eq!(summary.miss, 1);
        assert_eq!(summary.score, 180);
        assert_eq!(summary.max_combo, 2);
        assert_eq!(summary.total_judged(), 3);
    }

    #[test]
    fn test_replay_without_hits() {
        let summary = replay(TimingJudge::new(three_note_chart()), &[]).unwrap();
        assert_eq!(summary.miss, 3);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.rank, Rank::F);
    }

    #[test]
    fn test_write_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let summary = replay(TimingJudge::new(three_note_chart()), &[]).unwrap();

        let path = write_result(dir.path(), "song", Difficulty::Hard, &summary).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Result_"));
        assert!(name.ends_with(".json"));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["session"], "song");
        assert_eq!(value["difficulty"], "hard");
        assert_eq!(value["summary"]["miss"], 3);
    }
}
