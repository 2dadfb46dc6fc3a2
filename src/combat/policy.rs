//! Action policies.
//!
//! A policy decides what a combatant does on its turn from its unit
//! record, current stats and cooldowns. Policies are trait-based so the
//! resolver and battle loop never depend on a particular strategy:
//! - `PriorityPolicy`: spells first, then skills, then a basic attack
//! - `WeightedRandomPolicy`: uniform over affordable categories

use crate::abilities::{AbilityBook, AbilityTable};
use crate::core::{CombatRng, PolicyKind};
use crate::stats::{DerivedStats, ResourcePool};
use crate::units::UnitDefinition;

use super::action::{Action, ActionKind};
use super::cooldown::{CooldownCategory, CooldownTracker};

/// Everything a policy may look at when choosing.
#[derive(Clone, Copy, Debug)]
pub struct PolicyContext<'a> {
    pub unit: &'a UnitDefinition,
    pub stats: &'a DerivedStats,
    pub cooldowns: &'a CooldownTracker,
    pub abilities: &'a AbilityBook,
    /// Tag required to cast spells.
    pub cast_tag: &'a str,
}

impl<'a> PolicyContext<'a> {
    /// Whether the unit may cast this turn (tag present, spells ready).
    #[must_use]
    pub fn can_cast(&self) -> bool {
        self.unit.has_tag(self.cast_tag) && self.cooldowns.is_ready(CooldownCategory::Spell)
    }

    /// Whether skills are off cooldown this turn.
    #[must_use]
    pub fn can_use_skill(&self) -> bool {
        self.cooldowns.is_ready(CooldownCategory::Skill)
    }

    /// Known spells the unit can pay for, in tag order.
    ///
    /// Empty when the unit is not eligible to cast.
    pub fn affordable_spells(&self) -> impl Iterator<Item = &'a str> + 'a {
        let eligible = self.unit.has_tag(self.cast_tag);
        let names = self.unit.spells().filter(move |_| eligible);
        affordable(names, &self.abilities.spells, &self.stats.mana)
    }

    /// Known skills the unit can pay for, in tag order.
    pub fn affordable_skills(&self) -> impl Iterator<Item = &'a str> + 'a {
        affordable(self.unit.skills(), &self.abilities.skills, &self.stats.stamina)
    }
}

fn affordable<'a>(
    names: impl Iterator<Item = &'a str> + 'a,
    table: &'a AbilityTable,
    pool: &'a ResourcePool,
) -> impl Iterator<Item = &'a str> + 'a {
    names.filter(move |name| table.cost(name).is_some_and(|cost| pool.can_afford(cost)))
}

/// Decides a combatant's action for the current turn.
pub trait ActionPolicy: Send + Sync {
    /// Choose an action. Must always return something; `Action::Attack`
    /// is the universal fallback.
    fn choose(&self, ctx: &PolicyContext<'_>, rng: &mut CombatRng) -> Action;
}

/// Priority scan: the first affordable spell, else the first affordable
/// skill, else a basic attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityPolicy;

impl ActionPolicy for PriorityPolicy {
    fn choose(&self, ctx: &PolicyContext<'_>, _rng: &mut CombatRng) -> Action {
        if ctx.can_cast() {
            if let Some(spell) = ctx.affordable_spells().next() {
                return Action::Cast(spell.to_string());
            }
        }

        if ctx.can_use_skill() {
            if let Some(skill) = ctx.affordable_skills().next() {
                return Action::Skill(skill.to_string());
            }
        }

        Action::Attack
    }
}

/// Uniform choice among the action categories currently available,
/// then uniform choice of ability within the category.
///
/// A basic attack is always available.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedRandomPolicy;

impl ActionPolicy for WeightedRandomPolicy {
    fn choose(&self, ctx: &PolicyContext<'_>, rng: &mut CombatRng) -> Action {
        let spells: Vec<&str> = if ctx.can_cast() {
            ctx.affordable_spells().collect()
        } else {
            Vec::new()
        };
        let skills: Vec<&str> = if ctx.can_use_skill() {
            ctx.affordable_skills().collect()
        } else {
            Vec::new()
        };

        let mut categories = vec![ActionKind::Attack];
        if !spells.is_empty() {
            categories.push(ActionKind::Cast);
        }
        if !skills.is_empty() {
            categories.push(ActionKind::Skill);
        }

        match rng.choose(&categories) {
            Some(ActionKind::Cast) => rng
                .choose(&spells)
                .map_or(Action::Attack, |s| Action::Cast((*s).to_string())),
            Some(ActionKind::Skill) => rng
                .choose(&skills)
                .map_or(Action::Attack, |s| Action::Skill((*s).to_string())),
            Some(ActionKind::Attack) | None => Action::Attack,
        }
    }
}

impl PolicyKind {
    /// Instantiate the policy this kind names.
    #[must_use]
    pub fn build(self) -> Box<dyn ActionPolicy> {
        match self {
            PolicyKind::Priority => Box::new(PriorityPolicy),
            PolicyKind::WeightedRandom => Box::new(WeightedRandomPolicy),
        }
    }
}
