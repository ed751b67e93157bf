use crate::runtime::ReactiveRuntime;
use std::sync::{Arc, Weak};

/// A side effect that runs when its dependencies change.
///
/// The body runs immediately on creation to establish its dependencies,
/// then again whenever one of the signals it read changes. Dropping the
/// effect deregisters it from the runtime.
///
/// # Examples
///
/// ```
/// use partyline::{Effect, Signal};
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let count = Signal::new(5);
/// let seen = Arc::new(AtomicI32::new(0));
///
/// let _effect = Effect::new({
///     let count = count.clone();
///     let seen = Arc::clone(&seen);
///     move || seen.store(count.get(), Ordering::SeqCst)
/// });
///
/// assert_eq!(seen.load(Ordering::SeqCst), 5);
///
/// count.set(10);
/// assert_eq!(seen.load(Ordering::SeqCst), 10);
/// ```
pub struct Effect {
    id: usize,
    runtime: Weak<ReactiveRuntime>,
}

impl Effect {
    /// Create a new effect that runs when its dependencies change.
    ///
    /// The body runs once immediately; signals read during that first run
    /// become the effect's dependencies.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();
        let body = Arc::new(body);
        let run = Arc::clone(&body);

        // Register the body with the runtime
        runtime.register_effect(id, move || run());

        // Run immediately within the observer context to track dependencies
        runtime.with_observer(id, || body());

        Self {
            id,
            runtime: Arc::downgrade(&runtime),
        }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.remove_observer(self.id);
        }
    }
}

/// Create a new effect that runs when its dependencies change.
///
/// # Examples
///
/// ```
/// use partyline::{create_effect, create_signal};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let (count, set_count) = create_signal(0);
/// let runs = Arc::new(AtomicUsize::new(0));
///
/// let _effect = create_effect({
///     let runs = Arc::clone(&runs);
///     move || {
///         let _ = count.get();
///         runs.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// // Runs once immediately, then once per write
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// set_count.set(1);
/// assert_eq!(runs.load(Ordering::SeqCst), 2);
/// ```
pub fn create_effect<F>(body: F) -> Effect
where
    F: Fn() + Send + Sync + 'static,
{
    Effect::new(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::create_signal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn effect_runs_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_in_effect = Arc::clone(&counter);

        let _effect = create_effect(move || {
            counter_in_effect.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn effect_reruns_on_dependency_change() {
        let runs = Arc::new(AtomicUsize::new(0));
        let (count, set_count) = create_signal(0);

        let _effect = create_effect({
            let runs = Arc::clone(&runs);
            move || {
                let _ = count.get();
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert_eq!(runs.load(Ordering::SeqCst), 1);

        set_count.set(1);
        set_count.set(2);
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn dropped_effect_stops_running() {
        let runs = Arc::new(AtomicUsize::new(0));
        let (count, set_count) = create_signal(0);

        let effect = create_effect({
            let runs = Arc::clone(&runs);
            move || {
                let _ = count.get();
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });

        set_count.set(1);
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        drop(effect);
        set_count.set(2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
