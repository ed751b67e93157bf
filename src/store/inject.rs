use std::sync::Arc;

use indexmap::IndexMap;

use super::error::StoreError;
use super::locator::use_store_raw;
use super::map::SharedStore;

/// What a wrapped component receives: an insertion-ordered bag of named,
/// type-erased values.
///
/// Callers fill it with their own values before rendering; the wrapper adds
/// the resolved stores on top. Lookup is by name plus type, and a miss on
/// either simply yields `None`.
#[derive(Clone, Default)]
pub struct Props {
    values: IndexMap<String, SharedStore>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `name`, replacing any previous entry.
    pub fn insert<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: T) {
        self.values.insert(name.into(), Arc::new(value));
    }

    /// Insert an already-erased value, replacing any previous entry.
    pub fn insert_shared(&mut self, name: impl Into<String>, value: SharedStore) {
        self.values.insert(name.into(), value);
    }

    /// Retrieve the value under `name` as a `T`, or `None` when the name is
    /// absent or holds a different type.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        let value = self.values.get(name)?;
        Arc::clone(value).downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Props {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.keys()).finish()
    }
}

/// A component wrapped so that named stores are resolved and handed to it
/// as props on every render.
///
/// Built with [`with_stores`].
pub struct WithStores<C> {
    component: C,
    names: Vec<String>,
}

/// Wrap `component` so that each render resolves `names` from the nearest
/// enclosing provider and injects the instances into the component's props.
///
/// An injected store lands under its own name and replaces any caller prop
/// with that name, so callers should pick prop names that do not collide
/// with store names. An empty `names` list injects nothing.
///
/// # Examples
///
/// ```
/// use partyline::{create_store, with_stores, Props, Signal, StoreProvider};
///
/// struct CounterStore {
///     count: Signal<i32>,
/// }
///
/// let provider = StoreProvider::mount(&[create_store("counter", || CounterStore {
///     count: Signal::new(3),
/// })])
/// .unwrap();
///
/// let badge = with_stores(
///     |props: Props| {
///         let counter = props.get::<CounterStore>("counter").unwrap();
///         let label = props.get::<String>("label").unwrap();
///         format!("{label}: {}", counter.count.get())
///     },
///     &["counter"],
/// );
///
/// provider.scope(|| {
///     let mut props = Props::new();
///     props.insert("label", "clicks".to_string());
///     assert_eq!(badge.render(props).unwrap(), "clicks: 3");
/// });
/// ```
pub fn with_stores<C>(component: C, names: &[&str]) -> WithStores<C> {
    WithStores {
        component,
        names: names.iter().map(|name| (*name).to_string()).collect(),
    }
}

impl<C> WithStores<C> {
    /// Resolve the wrapped names, merge them over `props`, and call the
    /// component with the result.
    ///
    /// Resolution happens on every render, so the same wrapper can be
    /// rendered under different providers. Fails with the locator's error
    /// when a name cannot be resolved.
    pub fn render<R>(&self, props: Props) -> Result<R, StoreError>
    where
        C: Fn(Props) -> R,
    {
        let mut merged = props;
        for name in &self.names {
            let store = use_store_raw(name)?;
            merged.insert_shared(name.clone(), store);
        }
        Ok((self.component)(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_store, StoreProvider};

    #[test]
    fn props_round_trip_and_order() {
        let mut props = Props::new();
        props.insert("b", 2i32);
        props.insert("a", "hello".to_string());

        assert_eq!(*props.get::<i32>("b").unwrap(), 2);
        assert_eq!(*props.get::<String>("a").unwrap(), "hello");
        assert!(props.get::<i32>("missing").is_none());
        assert!(props.get::<String>("b").is_none());

        let names: Vec<&str> = props.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn injects_resolved_stores_into_props() {
        let provider = StoreProvider::mount(&[create_store("value", || 10i32)]).unwrap();

        let doubled = with_stores(
            |props: Props| *props.get::<i32>("value").unwrap() * 2,
            &["value"],
        );

        provider.scope(|| {
            assert_eq!(doubled.render(Props::new()).unwrap(), 20);
        });
    }

    #[test]
    fn caller_props_pass_through() {
        let provider = StoreProvider::mount(&[create_store("value", || 1i32)]).unwrap();

        let describe = with_stores(
            |props: Props| {
                format!(
                    "{}={}",
                    *props.get::<String>("label").unwrap(),
                    *props.get::<i32>("value").unwrap()
                )
            },
            &["value"],
        );

        provider.scope(|| {
            let mut props = Props::new();
            props.insert("label", "count".to_string());
            assert_eq!(describe.render(props).unwrap(), "count=1");
        });
    }

    #[test]
    fn an_injected_store_shadows_the_caller_prop() {
        let provider = StoreProvider::mount(&[create_store("value", || 5i32)]).unwrap();

        let read = with_stores(|props: Props| *props.get::<i32>("value").unwrap(), &["value"]);

        provider.scope(|| {
            let mut props = Props::new();
            props.insert("value", 99i32);
            assert_eq!(read.render(props).unwrap(), 5);
        });
    }

    #[test]
    fn rendering_outside_any_scope_fails() {
        let wrapped = with_stores(|_: Props| (), &["value"]);
        let err = wrapped.render(Props::new()).unwrap_err();
        assert!(matches!(err, StoreError::MissingProvider));
    }

    #[test]
    fn unresolvable_name_fails() {
        let provider = StoreProvider::mount(&[create_store("present", || 1i32)]).unwrap();
        let wrapped = with_stores(|_: Props| (), &["absent"]);

        provider.scope(|| {
            let err = wrapped.render(Props::new()).unwrap_err();
            assert!(matches!(err, StoreError::UnknownStore(name) if name == "absent"));
        });
    }

    #[test]
    fn empty_name_list_injects_nothing() {
        let wrapped = with_stores(|props: Props| props.len(), &[]);
        assert_eq!(wrapped.render(Props::new()).unwrap(), 0);
    }

    #[test]
    fn resolves_fresh_on_every_render() {
        let wrapped = with_stores(|props: Props| *props.get::<i32>("value").unwrap(), &["value"]);

        let first = StoreProvider::mount(&[create_store("value", || 1i32)]).unwrap();
        let second = StoreProvider::mount(&[create_store("value", || 2i32)]).unwrap();

        first.scope(|| assert_eq!(wrapped.render(Props::new()).unwrap(), 1));
        second.scope(|| assert_eq!(wrapped.render(Props::new()).unwrap(), 2));
    }
}
