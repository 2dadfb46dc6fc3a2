//! Loading unit records and ability tables from JSON files.
//!
//! This sits outside combat: every error is reported here, before a
//! battle starts.

mod loader;

pub use loader::{load_unit, UnitRoster};
