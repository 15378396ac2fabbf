use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::storage::{ChartStore, validate_session_id};

#[derive(Debug, Default)]
pub struct MemoryChartStore {
    charts: Mutex<HashMap<String, Chart>>,
}

impl MemoryChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Chart>>> {
        self.charts
            .lock()
            .map_err(|_| Error::StorageUnavailable("chart map lock poisoned".to_string()))
    }
}

impl ChartStore for MemoryChartStore {
    fn save(&self, session_id: &str, chart: &Chart) -> Result<()> {
        validate_session_id(session_id)?;
        self.lock()?.insert(session_id.to_string(), chart.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<Chart>> {
        validate_session_id(session_id)?;
        Ok(self.lock()?.get(session_id).cloned())
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        self.lock()?.remove(session_id);
        Ok(())
    }
}
