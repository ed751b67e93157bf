use crate::runtime::ReactiveRuntime;
use std::sync::{Arc, RwLock};

/// A memoized computed value that automatically tracks dependencies.
///
/// Memos recompute lazily: a write to a dependency only marks the memo
/// stale, and the next read recomputes the cached value.
///
/// # Examples
///
/// ```
/// use partyline::{create_signal, Memo};
///
/// let (count, set_count) = create_signal(5);
/// let doubled = Memo::new(move || count.get() * 2);
///
/// assert_eq!(doubled.get(), 10);
/// set_count.set(10);
/// assert_eq!(doubled.get(), 20);
/// ```
pub struct Memo<T> {
    compute: Arc<dyn Fn() -> T + Send + Sync>,
    cached: Arc<RwLock<Option<T>>>,
    id: usize,
}

impl<T: Clone + 'static> Memo<T> {
    /// Create a new memo with the given computation function.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();

        // A memo starts stale so the first read computes it
        runtime.register_memo(id);

        Self {
            compute: Arc::new(compute),
            cached: Arc::new(RwLock::new(None)),
            id,
        }
    }

    /// Get the current value, recomputing if a dependency changed.
    pub fn get(&self) -> T {
        let runtime = ReactiveRuntime::current();
        runtime.track_read(self.id);

        if runtime.memo_is_stale(self.id) {
            // Recompute within observer context to track dependencies
            let value = runtime.with_observer(self.id, || (self.compute)());
            *self.cached.write().unwrap() = Some(value.clone());
            runtime.mark_memo_fresh(self.id);
            value
        } else {
            self.cached.read().unwrap().as_ref().unwrap().clone()
        }
    }

    /// Read the memoized value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let runtime = ReactiveRuntime::current();
        runtime.track_read(self.id);

        if runtime.memo_is_stale(self.id) {
            let value = runtime.with_observer(self.id, || (self.compute)());
            *self.cached.write().unwrap() = Some(value);
            runtime.mark_memo_fresh(self.id);
        }

        let cached = self.cached.read().unwrap();
        f(cached.as_ref().unwrap())
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            compute: Arc::clone(&self.compute),
            cached: Arc::clone(&self.cached),
            id: self.id,
        }
    }
}

/// Create a new memoized computation.
///
/// # Examples
///
/// ```
/// use partyline::{create_memo, create_signal};
///
/// let (count, set_count) = create_signal(5);
/// let doubled = create_memo(move || count.get() * 2);
///
/// assert_eq!(doubled.get(), 10);
/// set_count.set(7);
/// assert_eq!(doubled.get(), 14);
/// ```
pub fn create_memo<T, F>(compute: F) -> Memo<T>
where
    T: Clone + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Memo::new(compute)
}
