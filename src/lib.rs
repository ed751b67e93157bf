//! # Partyline
//!
//! Shared named stores for reactive Rust components.
//!
//! Partyline provides two levels of abstraction for sharing state:
//!
//! ## Signals (Low-level primitives)
//!
//! Fine-grained reactive primitives for building reactive systems:
//! - `Signal<T>` - Reactive values that notify dependents when changed
//! - `Memo<T>` - Computed values that automatically track dependencies
//! - `Effect` - Side effects that run when dependencies change
//!
//! ## Stores (High-level sharing)
//!
//! Named store instances registered once and shared by everything below
//! the provider:
//! - `create_store` / `StoreDescriptor` - Name a producer for a store
//! - `StoreProvider` - Run each producer once per mount and publish the map
//! - `use_store` - Locate the shared instance from anywhere in scope
//! - `with_stores` - Wrap a component so stores arrive as props

pub mod runtime;
pub mod signal;
pub mod store;

// Re-export main types for convenience
pub use signal::{
    create_effect, create_memo, create_signal, Effect, Memo, ReadSignal, Signal, WriteSignal,
};
pub use store::{
    create_store, use_store, use_store_raw, use_stores, with_stores, Props, SharedStore,
    StoreDescriptor, StoreError, StoreMap, StoreProvider, WithStores,
};
