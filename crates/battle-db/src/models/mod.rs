//! Database models for persistent storage.
//!
//! The store reads and writes the latest schema version. Older versions are
//! defined only so that legacy rows can be counted and migrated.

mod monster;

pub use monster::v1;
pub use monster::v2::*;
