//! Integer key-value store persisted as a JSON object.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Holds values in memory and rewrites the whole file on every change.
///
/// A missing or unreadable file starts the store empty; a failed write is
/// logged and the in-memory value is kept.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl ProgressStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("ignoring malformed save file {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("cannot read save file {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value, `0` when absent.
    pub fn get(&self, key: &str) -> i32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            log::warn!("cannot write save file {}: {e}", self.path.display());
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)
    }
}
