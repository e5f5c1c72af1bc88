//! Persistence of reference lines keyed by file name.
//!
//! Lines live in a flat `file name -> line` map stored as one JSON value in a
//! key-value store. Writes are last-write-wins per file name; there is no
//! versioning.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use log::warn;
use thiserror::Error;

use crate::geometry::Line;

/// Storage key under which the line map is kept.
pub const LINES_KEY: &str = "levelstitch_lines";

/// Errors from line persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The line map could not be serialized.
    #[error("Failed to serialize lines: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store rejected the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A string key-value store, such as browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, mainly for tests and native callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Saved lines, keyed by file name.
pub type LineMap = BTreeMap<String, Line>;

/// Reads and writes the line map through a [`KeyValueStore`].
#[derive(Debug)]
pub struct LineBook<S> {
    store: S,
}

impl<S: KeyValueStore> LineBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every saved line.
    ///
    /// A missing, unreadable or corrupt value yields an empty map.
    pub fn load(&self) -> LineMap {
        let json = match self.store.get(LINES_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return LineMap::new(),
            Err(e) => {
                warn!("could not read saved lines: {}", e);
                return LineMap::new();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("discarding corrupt saved lines: {}", e);
            LineMap::new()
        })
    }

    /// The saved line for `file_name`, if any.
    pub fn line_for(&self, file_name: &str) -> Option<Line> {
        self.load().get(file_name).copied()
    }

    /// Save `line` for `file_name`, replacing any previous line.
    pub fn save_line(&self, file_name: &str, line: Line) -> Result<(), StoreError> {
        let mut lines = self.load();
        lines.insert(file_name.to_string(), line);
        self.write(&lines)
    }

    /// Forget the line for `file_name`. Returns whether one was stored.
    pub fn remove_line(&self, file_name: &str) -> Result<bool, StoreError> {
        let mut lines = self.load();
        let removed = lines.remove(file_name).is_some();
        if removed {
            self.write(&lines)?;
        }
        Ok(removed)
    }

    fn write(&self, lines: &LineMap) -> Result<(), StoreError> {
        let json = serde_json::to_string(lines)?;
        self.store.set(LINES_KEY, &json)
    }
}
