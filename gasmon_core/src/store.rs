//! Where `GasState` lives between runs.

use crate::error::MonitorError;
use crate::state::GasState;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait StateStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GasState>, MonitorError>;
    fn save(&self, state: &GasState) -> Result<(), MonitorError>;
}

/// Write `bytes` to a sibling temp file, fsync, then rename over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("new");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(tmp, path)
}

/// JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<GasState>, MonitorError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(MonitorError::Storage(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&text).map(Some).map_err(|e| {
            MonitorError::Storage(format!("decode {}: {e}", self.path.display()))
        })
    }

    fn save(&self, state: &GasState) -> Result<(), MonitorError> {
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| MonitorError::Storage(format!("encode state: {e}")))?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| {
                MonitorError::Storage(format!("create {}: {e}", dir.display()))
            })?;
        }
        write_atomic(&self.path, &bytes)
            .map_err(|e| MonitorError::Storage(format!("write {}: {e}", self.path.display())))
    }
}

/// In-memory store; clones share the saved value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Arc<Mutex<Option<GasState>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: GasState) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(state))),
            saves: Arc::default(),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|g| *g).unwrap_or(0)
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<GasState>, MonitorError> {
        self.saved
            .lock()
            .map(|g| g.clone())
            .map_err(|_| MonitorError::Storage("memory store poisoned".into()))
    }

    fn save(&self, state: &GasState) -> Result<(), MonitorError> {
        let mut guard = self
            .saved
            .lock()
            .map_err(|_| MonitorError::Storage("memory store poisoned".into()))?;
        *guard = Some(state.clone());
        if let Ok(mut n) = self.saves.lock() {
            *n += 1;
        }
        Ok(())
    }
}
