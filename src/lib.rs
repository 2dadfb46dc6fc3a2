//! # rust-duel
//!
//! A turn-based combat resolver for two-unit, tabletop-style battles.
//!
//! Two units loaded from static data trade basic attacks, spells and
//! skills round by round until one of them drops to 0 hp.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: Each combatant owns its stats, effect ledger and
//!    cooldowns. Nothing is shared between the two sides.
//!
//! 2. **Pluggable Decisions**: Action choice is an `ActionPolicy` trait.
//!    The priority scan is the default; a weighted-random policy can be
//!    swapped in without touching the resolver or the round loop.
//!
//! 3. **Events, Not Prints**: The loop and resolver report `BattleEvent`s
//!    to an injected `BattleObserver`. Verbosity is a property of the
//!    observer, not of the process.
//!
//! 4. **Never Fails Mid-Battle**: Unknown abilities, missing attributes
//!    and odd magnitude ranges degrade to fallback behavior. Only data
//!    loading returns errors.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, battle configuration
//! - `units`: Unit records and tags
//! - `abilities`: Spell and skill tables
//! - `stats`: Derived stat calculation and damage resistance
//! - `effects`: Timed stat effects and ledgers
//! - `combat`: Cooldowns, policies, the resolver and the round loop
//! - `events`: Battle events and observers
//! - `data`: JSON loading
//! - `error`: Data loading errors

pub mod core;
pub mod units;
pub mod abilities;
pub mod stats;
pub mod effects;
pub mod combat;
pub mod events;
pub mod data;
pub mod error;

// Re-export commonly used types
pub use crate::core::{BattleConfig, CombatRng, PolicyKind, Side, SideMap};

pub use crate::units::{BaseAttributes, Resistances, UnitDefinition};

pub use crate::abilities::{AbilityBook, AbilityDefinition, AbilityTable, EffectKind};

pub use crate::stats::{apply_damage_resistance, compute, DerivedStats, ResourcePool};

pub use crate::effects::{ActiveEffect, EffectLedger, StatTarget};

pub use crate::combat::{
    run_battle, simulate_series,
    Action, ActionKind, ActionPolicy, PriorityPolicy, WeightedRandomPolicy,
    Battle, BattlePhase, BattleResult, Outcome, SeriesSummary,
    CooldownCategory, CooldownTracker,
};

pub use crate::events::{BattleEvent, BattleObserver, EventLog, NullObserver, TextNarrator, TracingNarrator, Verbosity};

pub use crate::data::{load_unit, UnitRoster};

pub use crate::error::{DataError, DataResult};
