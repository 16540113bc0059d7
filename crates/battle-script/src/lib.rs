//! Battle Script - RON roster loader
//!
//! Loads monster definitions from RON files so a fresh roster store can be
//! seeded without going through the menus.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{RosterDefs, RosterLoader};
pub use schema::{MonsterDef, RosterFile};
