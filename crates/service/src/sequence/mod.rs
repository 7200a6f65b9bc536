//! Atomic "next value" counters.

pub mod store;

pub use store::SequenceStore;
