use std::fmt;
use std::sync::Arc;

use super::map::SharedStore;

type StoreInit = dyn Fn() -> SharedStore + Send + Sync;

/// A named, type-erased store producer.
///
/// Descriptors are what providers mount: the name keys the registry, the
/// producer builds the live instance. A descriptor is immutable and cheap
/// to clone, so one descriptor can be handed to several providers (each
/// mount produces a fresh instance) and one producer can be registered
/// under several independent names.
pub struct StoreDescriptor {
    name: String,
    init: Arc<StoreInit>,
}

impl StoreDescriptor {
    /// The name the store will be registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the producer, yielding a fresh type-erased instance.
    pub(crate) fn instantiate(&self) -> SharedStore {
        (self.init)()
    }
}

impl Clone for StoreDescriptor {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            init: Arc::clone(&self.init),
        }
    }
}

impl fmt::Debug for StoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Bind a name to a store producer.
///
/// The producer runs exactly once per provider mount; its result is the
/// shared instance every consumer below that provider sees. Building the
/// instance out of signals is what makes the sharing reactive.
///
/// Name validity is checked at mount, not here: a blank name fails the
/// mount with [`StoreError::UnnamedStore`](super::StoreError::UnnamedStore).
///
/// # Examples
///
/// ```
/// use partyline::{create_store, Signal};
///
/// struct CounterStore {
///     count: Signal<i32>,
/// }
///
/// let counter = create_store("counter", || CounterStore {
///     count: Signal::new(0),
/// });
/// assert_eq!(counter.name(), "counter");
/// ```
pub fn create_store<T, F>(name: impl Into<String>, init: F) -> StoreDescriptor
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    StoreDescriptor {
        name: name.into(),
        init: Arc::new(move || Arc::new(init()) as SharedStore),
    }
}
