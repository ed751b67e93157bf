use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// Dependency bookkeeping between observables (signals, memos) and
/// observers (effects, memos).
#[derive(Default)]
struct Graph {
    current_observer: Option<usize>,
    // Observable ID to the set of observer IDs that read it
    readers: HashMap<usize, HashSet<usize>>,
    // Observer ID to the set of observable IDs it read
    reads: HashMap<usize, HashSet<usize>>,
    // Effect ID to the effect body
    effects: HashMap<usize, Arc<dyn Fn() + Send + Sync>>,
    // Memo ID to staleness (true means the cached value needs recompute)
    stale_memos: HashMap<usize, bool>,
}

impl Graph {
    /// Drop every edge touching `observer_id`.
    fn disconnect(&mut self, observer_id: usize) {
        if let Some(sources) = self.reads.remove(&observer_id) {
            for source_id in sources {
                if let Some(readers) = self.readers.get_mut(&source_id) {
                    readers.remove(&observer_id);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.current_observer = None;
        self.readers.clear();
        self.reads.clear();
        self.effects.clear();
        self.stale_memos.clear();
    }
}

/// Reactive runtime tracking dependencies between primitives.
///
/// A runtime owns the dependency graph that connects signals to the memos
/// and effects that read them. There is one global runtime by default;
/// scoped runtimes can be stacked on top of it for isolation.
///
/// # Examples
///
/// Using the default global runtime:
///
/// ```
/// use partyline::Signal;
///
/// let signal = Signal::new(42);
/// assert_eq!(signal.get(), 42);
/// ```
///
/// Using scoped runtimes for isolation:
///
/// ```
/// use partyline::runtime::ReactiveRuntime;
/// use partyline::Signal;
///
/// ReactiveRuntime::scope(|| {
///     let signal = Signal::new(0);
///     assert_eq!(signal.get(), 0);
/// });
/// // The runtime and all of its graph state is dropped here
/// ```
pub struct ReactiveRuntime {
    next_id: AtomicUsize,
    graph: Mutex<Graph>,
}

// Thread-local stack for scoped runtimes; the global runtime is the fallback.
thread_local! {
    static RUNTIME_STACK: RefCell<Vec<Arc<ReactiveRuntime>>> = RefCell::new(Vec::new());
}

impl ReactiveRuntime {
    /// Create a new isolated runtime with an empty dependency graph.
    pub fn new() -> Arc<Self> {
        Arc::new(ReactiveRuntime {
            next_id: AtomicUsize::new(0),
            graph: Mutex::new(Graph::default()),
        })
    }

    /// Run a function with a fresh isolated runtime.
    ///
    /// Everything reactive created inside `f` lives in its own graph and is
    /// dropped when `f` returns. Useful for tests and for keeping unrelated
    /// reactive islands apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use partyline::runtime::ReactiveRuntime;
    /// use partyline::Signal;
    ///
    /// ReactiveRuntime::scope(|| {
    ///     let signal = Signal::new(0);
    ///     assert_eq!(signal.get(), 0);
    /// });
    /// ```
    pub fn scope<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        Self::with_runtime(Self::new(), f)
    }

    /// Get or create the global runtime (fallback).
    pub fn global() -> Arc<Self> {
        static RUNTIME: OnceLock<Arc<ReactiveRuntime>> = OnceLock::new();
        Arc::clone(RUNTIME.get_or_init(Self::new))
    }

    /// The current runtime: top of the thread-local stack, or the global
    /// runtime when no scoped runtime is active.
    pub fn current() -> Arc<Self> {
        RUNTIME_STACK.with(|stack| {
            stack
                .borrow()
                .last()
                .cloned()
                .unwrap_or_else(Self::global)
        })
    }

    /// Run a function with `runtime` as the current runtime.
    ///
    /// The runtime is pushed onto the thread-local stack for the duration of
    /// `f`, and popped again even if `f` panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use partyline::runtime::ReactiveRuntime;
    /// use partyline::Signal;
    ///
    /// let runtime = ReactiveRuntime::new();
    /// ReactiveRuntime::with_runtime(runtime, || {
    ///     let signal = Signal::new(42);
    ///     assert_eq!(signal.get(), 42);
    /// });
    /// ```
    pub fn with_runtime<F, R>(runtime: Arc<Self>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        RUNTIME_STACK.with(|stack| {
            stack.borrow_mut().push(runtime);
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        RUNTIME_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Drop every observer and dependency edge and reset the ID counter.
    ///
    /// Primitives created before the clear keep their values but stop
    /// notifying; mainly useful for resetting between tests.
    pub fn clear(&self) {
        self.graph.lock().unwrap().clear();
        self.next_id.store(0, Ordering::SeqCst);
    }

    /// Allocate the next unique ID for a reactive primitive.
    pub(crate) fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Record that the current observer (if any) read `source_id`.
    pub(crate) fn track_read(&self, source_id: usize) {
        let mut graph = self.graph.lock().unwrap();
        if let Some(observer) = graph.current_observer {
            graph.readers.entry(source_id).or_default().insert(observer);
            graph.reads.entry(observer).or_default().insert(source_id);
        }
    }

    /// Wake every observer that read `source_id`.
    pub(crate) fn notify(&self, source_id: usize) {
        let observers: Vec<usize> = {
            let graph = self.graph.lock().unwrap();
            graph
                .readers
                .get(&source_id)
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default()
        };

        for observer_id in observers {
            self.wake(observer_id);
        }
    }

    /// Wake a single observer: memos are marked stale (and their own readers
    /// woken in turn), effects run immediately.
    fn wake(&self, observer_id: usize) {
        let mut cascade: Vec<usize> = Vec::new();
        let run = {
            let mut graph = self.graph.lock().unwrap();
            if let Some(stale) = graph.stale_memos.get_mut(&observer_id) {
                if *stale {
                    // Already stale; its readers were cascaded the first time.
                    return;
                }
                *stale = true;
                if let Some(readers) = graph.readers.get(&observer_id) {
                    cascade.extend(readers.iter().copied());
                }
                None
            } else {
                graph.effects.get(&observer_id).cloned()
            }
        };

        for reader_id in cascade {
            self.wake(reader_id);
        }

        // Run the effect without holding the graph lock: its body is free to
        // read and write signals.
        if let Some(run) = run {
            run();
        }
    }

    /// Store an effect body under `observer_id`, replacing any previous
    /// registration and its dependency edges.
    pub(crate) fn register_effect<F>(&self, observer_id: usize, body: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut graph = self.graph.lock().unwrap();
        graph.disconnect(observer_id);
        graph.effects.insert(observer_id, Arc::new(body));
    }

    /// Remove an observer and every edge touching it.
    pub(crate) fn remove_observer(&self, observer_id: usize) {
        let mut graph = self.graph.lock().unwrap();
        graph.effects.remove(&observer_id);
        graph.stale_memos.remove(&observer_id);
        graph.readers.remove(&observer_id);
        graph.disconnect(observer_id);
    }

    /// Run `f` with `observer_id` as the current observer, restoring the
    /// previous observer afterwards. Reads inside `f` become dependency
    /// edges.
    pub(crate) fn with_observer<F, R>(&self, observer_id: usize, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = {
            let mut graph = self.graph.lock().unwrap();
            graph.current_observer.replace(observer_id)
        };

        let result = f();

        self.graph.lock().unwrap().current_observer = prev;
        result
    }

    /// Register a memo, initially stale so the first read computes it.
    pub(crate) fn register_memo(&self, memo_id: usize) {
        self.graph.lock().unwrap().stale_memos.insert(memo_id, true);
    }

    /// Whether a memo's cached value needs recomputing.
    pub(crate) fn memo_is_stale(&self, memo_id: usize) -> bool {
        self.graph
            .lock()
            .unwrap()
            .stale_memos
            .get(&memo_id)
            .copied()
            .unwrap_or(true)
    }

    /// Mark a memo's cached value as up to date.
    pub(crate) fn mark_memo_fresh(&self, memo_id: usize) {
        self.graph.lock().unwrap().stale_memos.insert(memo_id, false);
    }
}
