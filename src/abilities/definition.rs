//! Ability definitions - static spell and skill data.

use serde::{Deserialize, Serialize};

use crate::core::CombatRng;
use crate::effects::{ActiveEffect, StatTarget};

/// Damage channel used when an ability names none.
pub const GENERIC_CHANNEL: &str = "generic";

/// What an ability does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Damage,
    Heal,
    Buff,
    Debuff,
    /// Any kind the resolver does not recognize.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EffectKind::Damage => "damage",
            EffectKind::Heal => "heal",
            EffectKind::Buff => "buff",
            EffectKind::Debuff => "debuff",
            EffectKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A spell or skill from an ability table.
///
/// The identifier is the table key; it is filled in when the table is
/// built and is not part of the serialized record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    #[serde(skip)]
    pub name: String,

    /// Resource units spent on use (mana for spells, stamina for skills).
    pub cost: i64,

    /// Rounds the category stays locked after use.
    #[serde(default)]
    pub cooldown: i64,

    pub effect: EffectKind,

    /// Inclusive `[low, high]` magnitude range.
    #[serde(default)]
    pub magnitude: [i64; 2],

    #[serde(default)]
    pub stat: Option<StatTarget>,

    #[serde(default)]
    pub modifier: Option<i64>,

    /// Effect duration in rounds for buffs and debuffs.
    #[serde(default)]
    pub duration: Option<i64>,

    #[serde(default)]
    pub channel: Option<String>,
}

impl AbilityDefinition {
    /// Create an ability with no magnitude, stat or channel.
    #[must_use]
    pub fn new(name: impl Into<String>, effect: EffectKind, cost: i64, cooldown: i64) -> Self {
        Self {
            name: name.into(),
            cost,
            cooldown,
            effect,
            magnitude: [0, 0],
            stat: None,
            modifier: None,
            duration: None,
            channel: None,
        }
    }

    /// Create a damage ability.
    #[must_use]
    pub fn damage(name: impl Into<String>, cost: i64, cooldown: i64, low: i64, high: i64) -> Self {
        Self::new(name, EffectKind::Damage, cost, cooldown).with_magnitude(low, high)
    }

    /// Create a heal ability.
    #[must_use]
    pub fn heal(name: impl Into<String>, cost: i64, cooldown: i64, low: i64, high: i64) -> Self {
        Self::new(name, EffectKind::Heal, cost, cooldown).with_magnitude(low, high)
    }

    /// Create a buff or debuff ability.
    #[must_use]
    pub fn stat_effect(
        name: impl Into<String>,
        kind: EffectKind,
        cost: i64,
        cooldown: i64,
        stat: StatTarget,
        modifier: i64,
        duration: i64,
    ) -> Self {
        let mut ability = Self::new(name, kind, cost, cooldown);
        ability.stat = Some(stat);
        ability.modifier = Some(modifier);
        ability.duration = Some(duration);
        ability
    }

    /// Set the magnitude range (builder pattern).
    #[must_use]
    pub fn with_magnitude(mut self, low: i64, high: i64) -> Self {
        self.magnitude = [low, high];
        self
    }

    /// Set the damage channel (builder pattern).
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Damage channel, `"generic"` if unspecified.
    #[must_use]
    pub fn channel(&self) -> &str {
        self.channel.as_deref().unwrap_or(GENERIC_CHANNEL)
    }

    /// Draw a magnitude uniformly from the inclusive range.
    pub fn roll_magnitude(&self, rng: &mut CombatRng) -> i64 {
        let [low, high] = self.magnitude;
        rng.roll(low, high)
    }

    /// Build the effect a buff/debuff creates, sourced to `source`.
    ///
    /// Returns `None` when the ability names no target stat. A missing
    /// modifier counts as 0 and a missing duration as 1 round.
    #[must_use]
    pub fn build_effect(&self, source: &str) -> Option<ActiveEffect> {
        let stat = self.stat?;
        let effect = ActiveEffect::new(stat, self.modifier.unwrap_or(0), self.duration.unwrap_or(1))
            .with_source(source);
        Some(effect)
    }
}
