use crate::runtime::ReactiveRuntime;
use std::sync::{Arc, RwLock};

/// A reactive value that notifies its observers when changed.
///
/// Reads from inside an effect or memo are tracked; writes wake everything
/// that read the signal. Clones share the same underlying value.
///
/// # Examples
///
/// ```
/// use partyline::Signal;
///
/// let count = Signal::new(0);
/// count.set(5);
/// count.update(|n| *n += 1);
/// assert_eq!(count.get(), 6);
/// ```
pub struct Signal<T> {
    value: Arc<RwLock<T>>,
    id: usize,
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(initial: T) -> Self {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();

        Self {
            value: Arc::new(RwLock::new(initial)),
            id,
        }
    }

    /// Get a clone of the current value, tracking the read.
    pub fn get(&self) -> T {
        let runtime = ReactiveRuntime::current();
        runtime.track_read(self.id);
        self.value.read().unwrap().clone()
    }

    /// Set a new value and notify observers.
    pub fn set(&self, new_value: T) {
        *self.value.write().unwrap() = new_value;
        let runtime = ReactiveRuntime::current();
        runtime.notify(self.id);
    }

    /// Update the value in place and notify observers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.value.write().unwrap();
        f(&mut *value);
        drop(value); // Release the write lock before notifying
        let runtime = ReactiveRuntime::current();
        runtime.notify(self.id);
    }

    /// Read the value with a function without cloning, tracking the read.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let runtime = ReactiveRuntime::current();
        runtime.track_read(self.id);
        let value = self.value.read().unwrap();
        f(&value)
    }

    /// The signal's unique ID within its runtime.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            id: self.id,
        }
    }
}

/// The read half of a signal pair created by [`create_signal`].
pub struct ReadSignal<T> {
    inner: Signal<T>,
}

impl<T: Clone + Send + Sync + 'static> ReadSignal<T> {
    /// Get a clone of the current value, tracking the read.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Read the value with a function without cloning, tracking the read.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// The write half of a signal pair created by [`create_signal`].
pub struct WriteSignal<T> {
    inner: Signal<T>,
}

impl<T: Clone + Send + Sync + 'static> WriteSignal<T> {
    /// Set a new value and notify observers.
    pub fn set(&self, new_value: T) {
        self.inner.set(new_value);
    }

    /// Update the value in place and notify observers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.inner.update(f);
    }
}

impl<T> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Create a signal split into read and write halves.
///
/// The halves share one value; hand the read half to consumers and keep the
/// write half with whatever owns the state transitions.
///
/// # Examples
///
/// ```
/// use partyline::create_signal;
///
/// let (count, set_count) = create_signal(0);
/// set_count.set(42);
/// assert_eq!(count.get(), 42);
/// set_count.update(|n| *n += 10);
/// assert_eq!(count.get(), 52);
/// ```
pub fn create_signal<T: Clone + Send + Sync + 'static>(
    initial: T,
) -> (ReadSignal<T>, WriteSignal<T>) {
    let signal = Signal::new(initial);
    let read = ReadSignal {
        inner: signal.clone(),
    };
    let write = WriteSignal { inner: signal };
    (read, write)
}
