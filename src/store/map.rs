use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::error::StoreError;

/// A live, type-erased store instance.
///
/// The same `Arc` is handed to every consumer within one provider mount, so
/// state held inside the instance (signals, usually) is genuinely shared.
pub type SharedStore = Arc<dyn Any + Send + Sync>;

/// The frozen name-to-instance snapshot a provider publishes to its subtree.
///
/// Entries keep registration order: inherited entries first, then local
/// entries in the order their descriptors were given. The map is never
/// mutated after the mount that built it.
#[derive(Clone, Default)]
pub struct StoreMap {
    entries: IndexMap<String, SharedStore>,
}

impl StoreMap {
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: String, instance: SharedStore) {
        self.entries.insert(name, instance);
    }

    /// Whether a store is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Retrieve the instance registered under `name`, downcast to `T`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, StoreError> {
        let instance = self
            .entries
            .get(name)
            .ok_or_else(|| StoreError::UnknownStore(name.to_string()))?;

        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| StoreError::StoreTypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Retrieve the type-erased instance registered under `name`.
    pub fn get_raw(&self, name: &str) -> Option<&SharedStore> {
        self.entries.get(name)
    }

    /// Store names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedStore)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of registered stores.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// The instances are type-erased, so only the names can be rendered.
impl fmt::Debug for StoreMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreMap")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
