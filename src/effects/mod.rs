//! Timed stat effects and the per-combatant ledger that holds them.
//!
//! - `ActiveEffect`: a signed modifier on one stat with a round duration
//! - `EffectLedger`: ordered effects owned by a single combatant
//!
//! Ledgers are never shared between combatants. The optional `source`
//! on an effect names the combatant that created it and is only used
//! as a consistency check when stats are derived.

mod effect;
mod ledger;

pub use effect::{ActiveEffect, StatTarget};
pub use ledger::EffectLedger;
