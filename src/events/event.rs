//! Battle events.
//!
//! Every notable thing that happens in a battle is reported as a
//! `BattleEvent`. The `Display` impl renders the narration line; the
//! structured fields are there for observers that want numbers.

use serde::{Deserialize, Serialize};

use crate::abilities::EffectKind;
use crate::combat::{Action, ActionKind, Outcome};
use crate::core::{Side, SideMap};
use crate::effects::ActiveEffect;
use crate::stats::DerivedStats;

/// How important an event is for narration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventLevel {
    /// The battle result.
    Outcome,
    /// Regular play-by-play.
    Narration,
    /// Diagnostics: action selection, stat recomputation, cooldowns.
    Detail,
}

/// Resource snapshot of one combatant at the end of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantStatus {
    pub name: String,
    pub hp: i64,
    pub hp_total: i64,
    pub mana: i64,
    pub stamina: i64,
}

impl CombatantStatus {
    /// Snapshot `stats` under `name`.
    pub fn new(name: impl Into<String>, stats: &DerivedStats) -> Self {
        Self {
            name: name.into(),
            hp: stats.hp.current,
            hp_total: stats.hp.total,
            mana: stats.mana.current,
            stamina: stats.stamina.current,
        }
    }
}

/// Something that happened during a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted {
        names: SideMap<String>,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        side: Side,
        actor: String,
    },
    ActionSelected {
        side: Side,
        actor: String,
        action: Action,
    },
    /// A spell or skill dealt damage. Spell damage is already reduced by resistance.
    AbilityDamage {
        kind: ActionKind,
        actor: String,
        target: String,
        ability: String,
        channel: String,
        rolled: i64,
        dealt: i64,
        target_hp: i64,
    },
    AbilityHeal {
        actor: String,
        target: String,
        ability: String,
        amount: i64,
        target_hp: i64,
    },
    EffectApplied {
        side: Side,
        actor: String,
        ability: String,
        kind: EffectKind,
        effect: ActiveEffect,
    },
    /// The ability resolved but had no outcome the resolver knows.
    UnrecognizedAbility {
        actor: String,
        ability: String,
    },
    AttackHit {
        actor: String,
        target: String,
        roll: i64,
        armor_class: i64,
        damage: i64,
        target_hp: i64,
    },
    AttackMissed {
        actor: String,
        target: String,
        roll: i64,
        armor_class: i64,
    },
    EffectExpired {
        side: Side,
        name: String,
        effect: ActiveEffect,
    },
    StatsRecomputed {
        side: Side,
        name: String,
        stats: DerivedStats,
    },
    CooldownsTicked {
        side: Side,
        name: String,
        spell: i64,
        skill: i64,
    },
    RoundStatus {
        round: u32,
        status: SideMap<CombatantStatus>,
    },
    RoundCapReached {
        round: u32,
    },
    BattleEnded {
        outcome: Outcome,
        winner: Option<String>,
    },
}

impl BattleEvent {
    /// Narration level of this event.
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            BattleEvent::BattleEnded { .. } => EventLevel::Outcome,
            BattleEvent::ActionSelected { .. }
            | BattleEvent::StatsRecomputed { .. }
            | BattleEvent::CooldownsTicked { .. } => EventLevel::Detail,
            _ => EventLevel::Narration,
        }
    }
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleEvent::BattleStarted { names } => {
                write!(f, "--- BATTLE BEGINS --- {} vs {}", names[Side::First], names[Side::Second])
            }
            BattleEvent::RoundStarted { round } => write!(f, "== ROUND {round} =="),
            BattleEvent::TurnStarted { side, actor } => match side {
                Side::First => write!(f, "{actor} acts..."),
                Side::Second => write!(f, "{actor} responds..."),
            },
            BattleEvent::ActionSelected { actor, action, .. } => {
                write!(f, "  [{actor} chooses {action}]")
            }
            BattleEvent::AbilityDamage { kind, actor, target, ability, channel, rolled, dealt, target_hp } => {
                let verb = if *kind == ActionKind::Skill { "uses" } else { "casts" };
                write!(f, "  {actor} {verb} {ability} ({channel}) on {target} for {dealt} damage")?;
                if dealt != rolled {
                    write!(f, " ({rolled} before resistance)")?;
                }
                write!(f, "! [HP: {target_hp}]")
            }
            BattleEvent::AbilityHeal { actor, target, ability, amount, target_hp } => {
                write!(f, "  {actor} casts {ability} and heals {target} for {amount}! [HP: {target_hp}]")
            }
            BattleEvent::EffectApplied { actor, ability, kind, effect, .. } => match kind {
                EffectKind::Debuff => write!(
                    f,
                    "  {actor} uses {ability}, reducing {} by {} for {} rounds.",
                    effect.stat,
                    effect.modifier.abs(),
                    effect.duration
                ),
                _ => write!(
                    f,
                    "  {actor} uses {ability} and gains {:+} {} for {} rounds.",
                    effect.modifier, effect.stat, effect.duration
                ),
            },
            BattleEvent::UnrecognizedAbility { actor, ability } => {
                write!(f, "  {actor} uses {ability}, but it has no recognized effect.")
            }
            BattleEvent::AttackHit { actor, target, damage, target_hp, .. } => write!(
                f,
                "  {actor} swings their weapon... solid hit! {target} takes {damage} physical damage. [HP: {target_hp}]"
            ),
            BattleEvent::AttackMissed { actor, roll, armor_class, .. } => {
                write!(f, "  {actor} swings their weapon... misses! ({roll} vs AC {armor_class})")
            }
            BattleEvent::EffectExpired { name, effect, .. } => {
                write!(f, "  {name}'s {:+} {} effect wears off.", effect.modifier, effect.stat)
            }
            BattleEvent::StatsRecomputed { name, stats, .. } => write!(
                f,
                "  [{name}: hit +{} dam +{} AC {} | HP {}/{} Mana {}/{} Stam {}/{}]",
                stats.hitroll,
                stats.damroll,
                stats.armor_class,
                stats.hp.current,
                stats.hp.total,
                stats.mana.current,
                stats.mana.total,
                stats.stamina.current,
                stats.stamina.total
            ),
            BattleEvent::CooldownsTicked { name, spell, skill, .. } => {
                write!(f, "  [{name} cooldowns: spell {spell}, skill {skill}]")
            }
            BattleEvent::RoundStatus { status, .. } => {
                write!(f, "--- STATUS ---")?;
                for (_, s) in status.iter() {
                    write!(f, "\n{}: HP {} | Mana {} | Stam {}", s.name, s.hp, s.mana, s.stamina)?;
                }
                Ok(())
            }
            BattleEvent::RoundCapReached { round } => {
                write!(f, "*** Round limit reached after round {round}; the fighters disengage. ***")
            }
            BattleEvent::BattleEnded { winner, .. } => match winner {
                Some(name) => write!(f, "*** {name} wins the battle! ***"),
                None => write!(f, "*** It's a draw! ***"),
            },
        }
    }
}
