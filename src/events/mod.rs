//! Battle narration as a typed event stream.
//!
//! - `BattleEvent`: one notable occurrence, rendered to text by `Display`
//! - `BattleObserver`: the sink the battle loop and resolver report to
//! - `Verbosity`: which event levels an observer passes on

mod event;
mod observer;

pub use event::{BattleEvent, CombatantStatus, EventLevel};
pub use observer::{BattleObserver, EventLog, NullObserver, TextNarrator, TracingNarrator, Verbosity};
