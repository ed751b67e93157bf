//! Fine-grained reactive primitives.
//!
//! The building blocks shared stores are made of:
//! - Signals: reactive state containers, unified or split into read/write halves
//! - Memos: cached computed values
//! - Effects: side effects that re-run when their dependencies change

mod effect;
mod memo;
mod signal;

pub use effect::{create_effect, Effect};
pub use memo::{create_memo, Memo};
pub use signal::{create_signal, ReadSignal, Signal, WriteSignal};
