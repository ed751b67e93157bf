//! Named shared stores: register once at a provider, locate anywhere below it.
//!
//! A [`StoreDescriptor`] pairs a name with a producer. [`StoreProvider::mount`]
//! runs each producer exactly once, merges the results over anything an
//! enclosing provider already published, and freezes the map. Inside
//! [`StoreProvider::scope`] any code can call [`use_store`] to receive the
//! one shared instance, or render a [`with_stores`]-wrapped component that
//! gets its stores handed in as props.

mod descriptor;
mod error;
mod inject;
mod locator;
mod map;
mod provider;
mod scope;

pub use descriptor::{create_store, StoreDescriptor};
pub use error::StoreError;
pub use inject::{with_stores, Props, WithStores};
pub use locator::{use_store, use_store_raw, use_stores};
pub use map::{SharedStore, StoreMap};
pub use provider::StoreProvider;
