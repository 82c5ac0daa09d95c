use crate::shared::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// ResultStore port for durable memoization of resolution results.
///
/// The store is an opaque string-keyed map of serializable values; keys
/// are the exact identifier strings passed by callers and entries never
/// expire by time. Mode semantics (enabled/disabled/update) live in the
/// cache service, not here.
pub trait ResultStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Inserts only if absent. Returns true when the value was written.
    fn add(&self, key: &str, value: &Value) -> Result<bool>;

    /// Unconditionally writes, replacing any existing value.
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// All stored entries, for cache listing.
    fn entries(&self) -> Result<BTreeMap<String, Value>>;

    fn clear(&self) -> Result<()>;
}
