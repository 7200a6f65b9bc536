//! Service layer for the sequence counter.
//! - `storage` persists the sequence table as a single JSON file.
//! - `sequence` serves atomic "next value" requests on top of it.

pub mod errors;
pub mod sequence;
pub mod storage;
