//! Per-combatant ability cooldowns.

use serde::{Deserialize, Serialize};

use super::action::ActionKind;

/// Ability category sharing one cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CooldownCategory {
    Spell,
    Skill,
}

impl CooldownCategory {
    /// Both categories.
    pub const ALL: [CooldownCategory; 2] = [CooldownCategory::Spell, CooldownCategory::Skill];

    /// Key name as used in status output.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            CooldownCategory::Spell => "spell_cooldown",
            CooldownCategory::Skill => "skill_cooldown",
        }
    }

    /// Category locked by an action, if any.
    #[must_use]
    pub const fn for_action(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::Cast => Some(CooldownCategory::Spell),
            ActionKind::Skill => Some(CooldownCategory::Skill),
            ActionKind::Attack => None,
        }
    }
}

/// Remaining cooldown rounds per category.
///
/// Both categories are always present; a category is ready at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CooldownTracker {
    spell: i64,
    skill: i64,
}

impl CooldownTracker {
    /// Create a tracker with every category ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining rounds for a category.
    #[must_use]
    pub fn get(&self, category: CooldownCategory) -> i64 {
        match category {
            CooldownCategory::Spell => self.spell,
            CooldownCategory::Skill => self.skill,
        }
    }

    /// Whether a category can be used this turn.
    #[must_use]
    pub fn is_ready(&self, category: CooldownCategory) -> bool {
        self.get(category) <= 0
    }

    /// Overwrite a category's cooldown (negative values store as 0).
    pub fn set(&mut self, category: CooldownCategory, rounds: i64) {
        let slot = match category {
            CooldownCategory::Spell => &mut self.spell,
            CooldownCategory::Skill => &mut self.skill,
        };
        *slot = rounds.max(0);
    }

    /// Advance one round: every positive cooldown drops by 1.
    pub fn tick(&mut self) {
        for slot in [&mut self.spell, &mut self.skill] {
            if *slot > 0 {
                *slot -= 1;
            }
        }
    }

    /// Iterate over `(category, remaining)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CooldownCategory, i64)> + '_ {
        CooldownCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}
