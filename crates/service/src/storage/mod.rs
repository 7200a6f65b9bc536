//! Storage for the sequence table.
//!
//! One JSON document on disk is the whole durable state; there is no log,
//! checksum, or schema marker.

pub mod json_table;
