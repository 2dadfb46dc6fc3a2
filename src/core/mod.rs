//! Core engine types: sides, RNG, configuration.
//!
//! These are the building blocks shared by every other module.

pub mod side;
pub mod rng;
pub mod config;

pub use side::{Side, SideMap};
pub use rng::CombatRng;
pub use config::{BattleConfig, PolicyKind, DEFAULT_CAST_TAG, DEFAULT_MAX_ROUNDS};
