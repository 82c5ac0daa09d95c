use crate::ports::outbound::ResultStore;
use crate::shared::{LookupError, Result};
use anyhow::Context;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// JsonFileStore adapter: durable key/value storage in one JSON file.
///
/// Implements the ResultStore port. The whole map is loaded at
/// construction and rewritten on each mutation; resolution results are
/// small and writes are rare, so simplicity wins over a real database.
/// A Mutex serializes mutations; reads go through the same lock to see
/// the latest state.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens (or creates) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LookupError::CacheUnavailable {
                details: format!("cannot create {}: {}", parent.display(), e),
            })?;
        }
        let entries = Self::load(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "opened result store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn load(path: &Path) -> Result<BTreeMap<String, Value>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache store: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cache store: {}", path.display()))
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized).map_err(|e| {
            LookupError::CacheUnavailable {
                details: format!("cannot write {}: {}", self.path.display(), e),
            }
            .into()
        })
    }
}

impl ResultStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn add(&self, key: &str, value: &Value) -> Result<bool> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.clone());
        self.persist(&entries)?;
        Ok(true)
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value.clone());
        self.persist(&entries)
    }

    fn entries(&self) -> Result<BTreeMap<String, Value>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.clear();
        self.persist(&entries)
    }
}
