//! Timed stat modifiers.
//!
//! An `ActiveEffect` is created by a buff or debuff ability, lives in
//! exactly one combatant's ledger, and loses one round of duration at
//! every round boundary.

use serde::{Deserialize, Serialize};

/// Stat an effect modifies.
///
/// Names outside the known set deserialize to `Unknown` and are
/// ignored by the stat calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatTarget {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    /// Armor class, adjusted after the attribute formulas.
    Ac,
    #[serde(other)]
    Unknown,
}

impl StatTarget {
    /// Short lowercase name as used in data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatTarget::Str => "str",
            StatTarget::Dex => "dex",
            StatTarget::Con => "con",
            StatTarget::Int => "int",
            StatTarget::Wis => "wis",
            StatTarget::Ac => "ac",
            StatTarget::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timed, signed stat modifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Stat being modified.
    pub stat: StatTarget,
    /// Signed amount added to the stat.
    pub modifier: i64,
    /// Rounds remaining. At least 1 when created.
    pub duration: i64,
    /// Name of the combatant that created the effect.
    pub source: Option<String>,
}

impl ActiveEffect {
    /// Create an unsourced effect. Duration is raised to at least 1.
    #[must_use]
    pub fn new(stat: StatTarget, modifier: i64, duration: i64) -> Self {
        Self {
            stat,
            modifier,
            duration: duration.max(1),
            source: None,
        }
    }

    /// Set the source combatant (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether this effect applies to the combatant named `name`.
    ///
    /// Unsourced effects apply to whoever holds them.
    #[must_use]
    pub fn applies_to(&self, name: &str) -> bool {
        self.source.as_deref().map_or(true, |source| source == name)
    }
}

impl std::fmt::Display for ActiveEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+} {} ({} rounds)", self.modifier, self.stat, self.duration)
    }
}
