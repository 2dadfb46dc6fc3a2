//! Ability tables: spells and skills.
//!
//! - `AbilityDefinition`: cost, cooldown, effect kind, magnitude, stat, channel
//! - `AbilityTable`: name-keyed lookup
//! - `AbilityBook`: the spell and skill tables a battle reads from

mod definition;
mod table;

pub use definition::{AbilityDefinition, EffectKind, GENERIC_CHANNEL};
pub use table::{AbilityBook, AbilityTable};
