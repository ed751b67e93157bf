use std::sync::Arc;

use super::descriptor::StoreDescriptor;
use super::error::StoreError;
use super::map::StoreMap;
use super::scope;

/// The boundary that instantiates stores and publishes them to a subtree.
///
/// Mounting runs every descriptor's producer exactly once, in the order
/// given, and freezes the results into a map. [`scope`](Self::scope) then
/// publishes that map to the code it runs; calling it repeatedly models
/// re-renders and never re-runs a producer. Dropping the provider is the
/// unmount: the map is discarded and instances die with their last
/// consumer handle.
///
/// Mounting inside an enclosing provider's scope inherits that provider's
/// entries; the merged map is fixed at mount time.
///
/// # Examples
///
/// ```
/// use partyline::{create_store, use_store, Signal, StoreProvider};
///
/// struct CounterStore {
///     count: Signal<i32>,
/// }
///
/// let counter = create_store("counter", || CounterStore {
///     count: Signal::new(0),
/// });
///
/// let provider = StoreProvider::mount(&[counter]).unwrap();
/// provider.scope(|| {
///     let store = use_store::<CounterStore>("counter").unwrap();
///     store.count.set(3);
/// });
/// ```
#[derive(Debug)]
pub struct StoreProvider {
    stores: Arc<StoreMap>,
}

impl StoreProvider {
    /// Instantiate `descriptors` on top of any inherited entries and freeze
    /// the result.
    ///
    /// Inherited entries are copied first; local descriptors are then
    /// processed in order. A blank name fails with
    /// [`StoreError::UnnamedStore`]; a name already present (inherited or
    /// declared earlier in `descriptors`) fails with
    /// [`StoreError::DuplicateStore`]. On error nothing is published,
    /// though producers of earlier entries have already run.
    pub fn mount(descriptors: &[StoreDescriptor]) -> Result<Self, StoreError> {
        let mut stores = match scope::current() {
            Some(inherited) => (*inherited).clone(),
            None => StoreMap::new(),
        };

        for descriptor in descriptors {
            let name = descriptor.name();

            if name.is_empty() {
                return Err(StoreError::UnnamedStore);
            }
            if stores.contains(name) {
                return Err(StoreError::DuplicateStore(name.to_string()));
            }

            stores.insert(name.to_string(), descriptor.instantiate());
        }

        Ok(Self {
            stores: Arc::new(stores),
        })
    }

    /// Publish the mounted map for the duration of `f`.
    ///
    /// Locator calls inside `f` resolve against this provider (plus
    /// anything it inherited). The scope nests: a provider mounted inside
    /// `f` sees this one's entries as inherited.
    pub fn scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        scope::enter(Arc::clone(&self.stores), f)
    }

    /// The frozen snapshot this provider publishes.
    pub fn stores(&self) -> Arc<StoreMap> {
        Arc::clone(&self.stores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_store;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn mount_instantiates_in_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let first = create_store("first", {
            let order = Arc::clone(&order);
            move || order.lock().unwrap().push("first")
        });
        let second = create_store("second", {
            let order = Arc::clone(&order);
            move || order.lock().unwrap().push("second")
        });

        let provider = StoreProvider::mount(&[first, second]).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);

        let stores = provider.stores();
        let names: Vec<&str> = stores.names().collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn producers_run_once_per_mount_not_per_scope() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counted = create_store("counted", {
            let runs = Arc::clone(&runs);
            move || runs.fetch_add(1, Ordering::SeqCst)
        });

        let provider = StoreProvider::mount(&[counted.clone()]).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // Re-renders: scope entered many times, producer untouched.
        for _ in 0..10 {
            provider.scope(|| {});
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // A second mount is a new lifetime and runs the producer again.
        let _remounted = StoreProvider::mount(&[counted]).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn duplicate_local_names_fail() {
        let a = create_store("x", || 1i32);
        let b = create_store("x", || 2i32);

        let err = StoreProvider::mount(&[a, b]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateStore(name) if name == "x"));
    }

    #[test]
    fn blank_names_fail() {
        let unnamed = create_store("", || 1i32);
        let err = StoreProvider::mount(&[unnamed]).unwrap_err();
        assert!(matches!(err, StoreError::UnnamedStore));
    }

    #[test]
    fn nested_mount_inherits_parent_entries() {
        let outer = StoreProvider::mount(&[create_store("outer", || 1i32)]).unwrap();

        outer.scope(|| {
            let inner = StoreProvider::mount(&[create_store("inner", || 2i32)]).unwrap();
            let stores = inner.stores();

            assert!(stores.contains("outer"));
            assert!(stores.contains("inner"));
            assert_eq!(stores.len(), 2);
        });
    }

    #[test]
    fn nested_mount_shares_parent_instances() {
        let outer = StoreProvider::mount(&[create_store("shared", || 5i32)]).unwrap();
        let from_outer = outer.stores().get::<i32>("shared").unwrap();

        outer.scope(|| {
            let inner = StoreProvider::mount(&[]).unwrap();
            let from_inner = inner.stores().get::<i32>("shared").unwrap();
            assert!(Arc::ptr_eq(&from_outer, &from_inner));
        });
    }

    #[test]
    fn redeclaring_an_inherited_name_fails() {
        let outer = StoreProvider::mount(&[create_store("theme", || 1i32)]).unwrap();

        outer.scope(|| {
            let err = StoreProvider::mount(&[create_store("theme", || 2i32)]).unwrap_err();
            assert!(matches!(err, StoreError::DuplicateStore(name) if name == "theme"));
        });
    }

    #[test]
    fn mount_outside_any_scope_inherits_nothing() {
        let provider = StoreProvider::mount(&[create_store("only", || 1i32)]).unwrap();
        assert_eq!(provider.stores().len(), 1);
    }

    #[test]
    fn debug_output_shows_mounted_names() {
        let provider = StoreProvider::mount(&[create_store("counter", || 0i32)]).unwrap();
        let rendered = format!("{provider:?}");
        assert!(rendered.contains("StoreProvider"));
        assert!(rendered.contains("counter"));
    }
}
