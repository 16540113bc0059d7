//! Battle DB - Roster store using native_db
//!
//! Provides persistent storage for the monster roster:
//! - Monster records keyed by id, with unique names
//! - Create, update and delete for the roster menus
//! - The versioned speed migration (schema v1 to v2)

mod error;
mod migrate;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use migrate::MigrationReport;
pub use store::Store;
