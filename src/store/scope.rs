use std::cell::RefCell;
use std::sync::Arc;

use super::map::StoreMap;

// Thread-local stack of published store maps. The top of the stack is the
// nearest enclosing provider; one stack exists per thread for the lifetime
// of the process, matching the single-threaded render model this mechanism
// is built for.
thread_local! {
    static SCOPE_STACK: RefCell<Vec<Arc<StoreMap>>> = RefCell::new(Vec::new());
}

/// The map published by the nearest enclosing provider, if any.
pub(crate) fn current() -> Option<Arc<StoreMap>> {
    SCOPE_STACK.with(|stack| stack.borrow().last().cloned())
}

/// Publish `map` for the duration of `f`.
///
/// The map is pushed onto the thread-local stack and popped again even if
/// `f` panics, so an unwinding subtree cannot leak its scope to later code.
pub(crate) fn enter<F, R>(map: Arc<StoreMap>, f: F) -> R
where
    F: FnOnce() -> R,
{
    SCOPE_STACK.with(|stack| {
        stack.borrow_mut().push(map);
    });

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    SCOPE_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });

    match result {
        Ok(r) => r,
        Err(e) => std::panic::resume_unwind(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scope_by_default() {
        assert!(current().is_none());
    }

    #[test]
    fn enter_publishes_and_restores() {
        let map = Arc::new(StoreMap::new());

        enter(Arc::clone(&map), || {
            let seen = current().unwrap();
            assert!(Arc::ptr_eq(&seen, &map));
        });

        assert!(current().is_none());
    }

    #[test]
    fn nested_scopes_shadow_and_unwind() {
        let outer = Arc::new(StoreMap::new());
        let inner = Arc::new(StoreMap::new());

        enter(Arc::clone(&outer), || {
            enter(Arc::clone(&inner), || {
                assert!(Arc::ptr_eq(&current().unwrap(), &inner));
            });
            assert!(Arc::ptr_eq(&current().unwrap(), &outer));
        });
    }

    #[test]
    fn scope_pops_on_panic() {
        let result = std::panic::catch_unwind(|| {
            enter(Arc::new(StoreMap::new()), || panic!("render failed"));
        });
        assert!(result.is_err());
        assert!(current().is_none());
    }
}
