use std::sync::Arc;

use super::error::StoreError;
use super::map::{SharedStore, StoreMap};
use super::scope;

/// Locate the store registered under `name` in the nearest enclosing
/// provider, downcast to `T`.
///
/// Every caller within one mount receives a clone of the same `Arc`, so
/// actions taken through one handle are visible through all others; that
/// sharing is the point of the mechanism.
///
/// Fails with [`StoreError::MissingProvider`] outside any
/// [`StoreProvider::scope`](super::StoreProvider::scope), with
/// [`StoreError::UnknownStore`] when `name` was never registered, and with
/// [`StoreError::StoreTypeMismatch`] when `T` is not the instance's type.
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
/// let provider = StoreProvider::mount(&[create_store("counter", || CounterStore {
///     count: Signal::new(0),
/// })])
/// .unwrap();
///
/// provider.scope(|| {
///     let a = use_store::<CounterStore>("counter").unwrap();
///     let b = use_store::<CounterStore>("counter").unwrap();
///
///     a.count.set(7);
///     assert_eq!(b.count.get(), 7);
/// });
/// ```
pub fn use_store<T: Send + Sync + 'static>(name: &str) -> Result<Arc<T>, StoreError> {
    let stores = scope::current().ok_or(StoreError::MissingProvider)?;
    stores.get::<T>(name)
}

/// Locate the store registered under `name` without downcasting.
pub fn use_store_raw(name: &str) -> Result<SharedStore, StoreError> {
    let stores = scope::current().ok_or(StoreError::MissingProvider)?;
    stores
        .get_raw(name)
        .cloned()
        .ok_or_else(|| StoreError::UnknownStore(name.to_string()))
}

/// The entire map published by the nearest enclosing provider.
///
/// This is the bulk-access escape hatch for callers that want to iterate
/// or look up several stores at once.
pub fn use_stores() -> Result<Arc<StoreMap>, StoreError> {
    scope::current().ok_or(StoreError::MissingProvider)
}
