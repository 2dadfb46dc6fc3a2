//! Battle configuration.
//!
//! Everything the combat loop treats as tunable lives here rather
//! than in process-wide constants:
//! - `max_rounds`: safety cap on battle length
//! - `round_delay_ms`: cosmetic pacing between rounds
//! - `cast_tag`: the tag that makes a unit eligible to cast spells
//! - `policy`: which action policy both combatants use

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tag marking a unit as eligible to cast spells.
pub const DEFAULT_CAST_TAG: &str = "can_cast";

/// Default safety cap on battle length.
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

/// Which action policy drives combatant decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Scan spells, then skills, then fall back to a basic attack.
    #[default]
    Priority,
    /// Pick uniformly among the affordable action categories.
    WeightedRandom,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(PolicyKind::Priority),
            "weighted" | "weighted_random" | "random" => Ok(PolicyKind::WeightedRandom),
            other => Err(format!("unknown policy: {other}")),
        }
    }
}

/// Configuration for a single battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds after which the battle is called a draw (`None` = unbounded).
    ///
    /// Regen can outpace damage for some unit pairs, so the default is
    /// bounded.
    pub max_rounds: Option<u32>,

    /// Pause between rounds in milliseconds (0 = no pause).
    pub round_delay_ms: u64,

    /// Tag a unit must carry to be eligible to cast spells.
    pub cast_tag: String,

    /// Action policy used by both combatants.
    pub policy: PolicyKind,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            round_delay_ms: 0,
            cast_tag: DEFAULT_CAST_TAG.to_string(),
            policy: PolicyKind::Priority,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round cap (`None` removes it).
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the pacing delay between rounds.
    #[must_use]
    pub fn with_round_delay_ms(mut self, delay_ms: u64) -> Self {
        self.round_delay_ms = delay_ms;
        self
    }

    /// Set the cast-eligibility tag.
    #[must_use]
    pub fn with_cast_tag(mut self, tag: impl Into<String>) -> Self {
        self.cast_tag = tag.into();
        self
    }

    /// Set the action policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pacing delay as a `Duration`, if any.
    #[must_use]
    pub fn round_delay(&self) -> Option<Duration> {
        (self.round_delay_ms > 0).then(|| Duration::from_millis(self.round_delay_ms))
    }

    /// Whether `round` has passed the safety cap.
    #[must_use]
    pub fn round_cap_reached(&self, round: u32) -> bool {
        self.max_rounds.is_some_and(|max| round > max)
    }
}
