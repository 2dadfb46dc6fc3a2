//! Turn-based combat between two units.
//!
//! - `policy`: what a combatant wants to do this turn
//! - `resolver`: pays for an action and applies its outcome
//! - `battle`: the round loop, end-of-round bookkeeping and termination
//! - `series`: many seeded battles between the same pair

mod action;
mod battle;
mod cooldown;
mod outcome;
mod policy;
mod resolver;
mod series;
mod state;

pub use action::{Action, ActionKind};
pub use battle::{run_battle, Battle, BattlePhase};
pub use cooldown::{CooldownCategory, CooldownTracker};
pub use outcome::{BattleResult, Outcome};
pub use policy::{ActionPolicy, PolicyContext, PriorityPolicy, WeightedRandomPolicy};
pub use resolver::{ActionResolver, ATTACK_DIE, DAMAGE_DIE};
pub use series::{simulate_series, SeriesSummary};
pub use state::{CombatState, Combatant};
