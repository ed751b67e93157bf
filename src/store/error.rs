use thiserror::Error;

/// Errors raised by the store registration and resolution mechanism.
///
/// Every variant is a programmer-error condition meant to surface during
/// development: the library never retries, falls back, or logs. Each one
/// reports a misconfiguration only a running program can detect.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A locator call ran with no provider scope active on this thread.
    #[error("no store provider is in scope; call the locator inside StoreProvider::scope")]
    MissingProvider,

    /// The resolved map has no store under the requested name.
    #[error("no store named \"{0}\" is provided in the current scope")]
    UnknownStore(String),

    /// A mount saw the same name twice, counting entries inherited from an
    /// enclosing provider.
    #[error("a store named \"{0}\" already exists in this provider's scope")]
    DuplicateStore(String),

    /// A descriptor with a blank name reached a mount.
    #[error("a store descriptor has a blank name; give create_store a unique, non-empty name")]
    UnnamedStore,

    /// A typed retrieval asked for a type the instance does not have.
    #[error("store \"{name}\" does not hold a value of type {expected}")]
    StoreTypeMismatch {
        /// The name the store was registered under.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
    },
}
