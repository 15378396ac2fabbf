use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::storage::{ChartStore, validate_session_id};

/// Stores each chart as `<base_dir>/<session_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileChartStore {
    base_dir: PathBuf,
}

impl JsonFileChartStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| unavailable(&base_dir, e))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn chart_path(&self, session_id: &str) -> Result<PathBuf> {
        validate_session_id(session_id)?;
        Ok(self.base_dir.join(format!("{}.json", session_id)))
    }
}

fn unavailable(path: &Path, e: std::io::Error) -> Error {
    Error::StorageUnavailable(format!("{}: {}", path.display(), e))
}

impl ChartStore for JsonFileChartStore {
    fn save(&self, session_id: &str, chart: &Chart) -> Result<()> {
        let path = self.chart_path(session_id)?;
        let content = serde_json::to_string(chart)?;

        // Write beside the target and rename over it, so a failed write
        // leaves any previous chart intact.
        let mut tmp =
            NamedTempFile::new_in(&self.base_dir).map_err(|e| unavailable(&self.base_dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| unavailable(&path, e))?;
        tmp.persist(&path).map_err(|e| unavailable(&path, e.error))?;
        debug!("Saved chart {} ({} notes)", session_id, chart.note_count());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<Chart>> {
        let path = self.chart_path(session_id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(unavailable(&path, e)),
        };
        let chart: Chart = serde_json::from_str(&content)?;
        chart.validate_notes().map_err(|e| match e {
            Error::InvalidInput(msg) => {
                Error::InvalidInput(format!("stored chart {}: {}", session_id, msg))
            }
            other => other,
        })?;
        debug!("Loaded chart {} ({} notes)", session_id, chart.note_count());
        Ok(Some(chart))
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.chart_path(session_id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted chart {}", session_id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(unavailable(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Difficulty, Note, NoteKind};
    use tempfile::TempDir;

    fn create_temp_store() -> (JsonFileChartStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileChartStore::new(temp_dir.path().join("charts")).unwrap();
        (store, temp_dir)
    }

    fn make_chart() -> Chart {
        let mut chart = Chart::new(140.0, 95.5, Difficulty::Hard);
        chart.add_note(Note::tap(0.5, 1, 0.3));
        chart.add_note(Note::new(1.25, 3, NoteKind::Hold, 0.75, 0.95));
        chart.add_note(Note::new(1.25, 0, NoteKind::Slide, 0.6, 0.95));
        chart
    }

    #[test]
    fn test_new_creates_directory() {
        let (store, _temp) = create_temp_store();
        assert!(store.base_dir().is_dir());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_temp_store();
        store.save("abc", &make_chart()).unwrap();

        assert!(store.chart_path("abc").unwrap().exists());
        assert_eq!(store.load("abc").unwrap(), Some(make_chart()));
    }

    #[test]
    fn test_load_missing() {
        let (store, _temp) = create_temp_store();
        assert_eq!(store.load("nothing").unwrap(), None);
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_temp_store();
        store.save("abc", &make_chart()).unwrap();
        store.delete("abc").unwrap();
        assert!(!store.chart_path("abc").unwrap().exists());
        // deleting again is fine
        store.delete("abc").unwrap();
    }

    #[test]
    fn test_overwrite_replaces_whole_chart() {
        let (store, _temp) = create_temp_store();
        store.save("abc", &make_chart()).unwrap();

        let mut shorter = Chart::new(90.0, 12.0, Difficulty::Easy);
        shorter.add_note(Note::tap(2.0, 2, 0.4));
        store.save("abc", &shorter).unwrap();

        assert_eq!(store.load("abc").unwrap(), Some(shorter));
        // no temporary files left next to the chart
        let entries = fs::read_dir(store.base_dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_load_rejects_duplicate_slot() {
        let (store, _temp) = create_temp_store();
        fs::write(
            store.chart_path("dup").unwrap(),
            r#"{"tempo": 120.0, "duration": 10.0, "difficulty": "normal",
                "notes": [{"time": 1.0, "lane": 0, "type": "tap"},
                          {"time": 1.0, "lane": 0, "type": "tap"}]}"#,
        )
        .unwrap();

        assert!(matches!(store.load("dup"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_rejects_negative_time() {
        let (store, _temp) = create_temp_store();
        fs::write(
            store.chart_path("early").unwrap(),
            r#"{"tempo": 120.0, "duration": 10.0, "difficulty": "easy",
                "notes": [{"time": -0.5, "lane": 1, "type": "tap"}]}"#,
        )
        .unwrap();

        assert!(matches!(store.load("early"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let (store, _temp) = create_temp_store();
        fs::write(store.chart_path("bad").unwrap(), "{not json").unwrap();
        assert!(matches!(store.load("bad"), Err(Error::Json(_))));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (store, _temp) = create_temp_store();
        assert!(matches!(
            store.save("../escape", &make_chart()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reads_original_field_names() {
        let (store, _temp) = create_temp_store();
        fs::write(
            store.chart_path("legacy").unwrap(),
            r#"{"tempo": 120.0, "duration": 10.0, "difficulty": "normal",
                "notes": [{"time": 1.0, "lane": 2, "type": "tap"}]}"#,
        )
        .unwrap();

        let chart = store.load("legacy").unwrap().unwrap();
        assert_eq!(chart.difficulty, Difficulty::Normal);
        assert_eq!(chart.notes[0].intensity, 0.5);
        assert_eq!(chart.notes[0].duration, 0.0);
    }
}
