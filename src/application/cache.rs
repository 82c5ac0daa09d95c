use crate::ports::outbound::ResultStore;
use crate::shared::Result;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// How the result cache behaves for the whole process invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read on hit, write on miss, never overwrite.
    #[default]
    Enabled,
    /// Never read or write.
    Disabled,
    /// Never read, always overwrite on write.
    Update,
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enabled" => Ok(CacheMode::Enabled),
            "disabled" => Ok(CacheMode::Disabled),
            "update" => Ok(CacheMode::Update),
            other => Err(format!(
                "Invalid cache mode: {}. Please specify 'enabled', 'disabled' or 'update'",
                other
            )),
        }
    }
}

/// Process-wide result memoization over a durable store.
///
/// Constructed once by the entry point with its mode fixed for the
/// process, then passed by reference into the orchestrator; there is no
/// hidden global. A DashMap front layer gives safe concurrent reads;
/// under enabled mode a key is written at most once and an entry, once
/// written, is immutable.
pub struct ResultCache<S: ResultStore> {
    mode: CacheMode,
    memory: DashMap<String, Value>,
    store: S,
}

impl<S: ResultStore> ResultCache<S> {
    pub fn new(store: S, mode: CacheMode) -> Result<Self> {
        let memory = DashMap::new();
        if mode == CacheMode::Enabled {
            for (key, value) in store.entries()? {
                memory.insert(key, value);
            }
        }
        Ok(Self {
            mode,
            memory,
            store,
        })
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Cached value for a request identifier, honoring the mode.
    pub fn get(&self, key: &str) -> Option<Value> {
        if self.mode != CacheMode::Enabled {
            return None;
        }
        let hit = self.memory.get(key).map(|entry| entry.value().clone());
        if hit.is_some() {
            debug!(key, "cache hit");
        }
        hit
    }

    /// Records a resolution result, honoring the mode.
    pub fn put(&self, key: &str, value: &Value) -> Result<()> {
        match self.mode {
            CacheMode::Disabled => {
                debug!(key, "cache disabled, not storing");
                Ok(())
            }
            CacheMode::Enabled => {
                if self.memory.contains_key(key) {
                    debug!(key, "cache entry exists, keeping first value");
                    return Ok(());
                }
                if self.store.add(key, value)? {
                    self.memory.insert(key.to_string(), value.clone());
                    debug!(key, "cache entry added");
                }
                Ok(())
            }
            CacheMode::Update => {
                self.store.set(key, value)?;
                self.memory.insert(key.to_string(), value.clone());
                debug!(key, "cache entry updated");
                Ok(())
            }
        }
    }

    /// All durable entries, for `--cache-list`.
    pub fn list(&self) -> Result<BTreeMap<String, Value>> {
        self.store.entries()
    }

    /// Drops every durable entry, for `--cache-clear`.
    pub fn clear(&self) -> Result<()> {
        self.memory.clear();
        self.store.clear()
    }
}
