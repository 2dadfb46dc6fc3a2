//! Per-battle mutable state.
//!
//! Each `Combatant` owns its stats, effect ledger and cooldowns. Nothing
//! is shared between the two sides; the resolver gets one side mutably
//! and the other side mutably through `SideMap::split_mut`.

use tracing::warn;

use crate::core::{Side, SideMap};
use crate::effects::EffectLedger;
use crate::events::CombatantStatus;
use crate::stats::{compute, DerivedStats};
use crate::units::UnitDefinition;

use super::cooldown::CooldownTracker;
use super::outcome::BattleResult;

/// One side of a battle.
#[derive(Clone, Debug)]
pub struct Combatant<'u> {
    /// Read-only unit record.
    pub unit: &'u UnitDefinition,
    pub stats: DerivedStats,
    pub effects: EffectLedger,
    pub cooldowns: CooldownTracker,
}

impl<'u> Combatant<'u> {
    /// A fresh combatant: full pools, no effects, nothing on cooldown.
    #[must_use]
    pub fn new(unit: &'u UnitDefinition) -> Self {
        let effects = EffectLedger::new();
        Self {
            unit,
            stats: compute(unit, &effects, None),
            effects,
            cooldowns: CooldownTracker::new(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.unit.name
    }

    /// Recompute stats from the ledger, keeping current pool values.
    pub fn recompute(&mut self) {
        let holder = self.unit.name.as_str();
        let scoped = self.effects.applicable_to(holder).count();
        if scoped < self.effects.len() {
            warn!(
                holder,
                foreign = self.effects.len() - scoped,
                "ledger holds effects created by another combatant",
            );
        }
        self.stats = compute(self.unit, &self.effects, Some(&self.stats));
    }

    /// Whether hp has dropped to 0 or below.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }

    /// Resource snapshot for status narration.
    #[must_use]
    pub fn status(&self) -> CombatantStatus {
        CombatantStatus::new(self.name(), &self.stats)
    }
}

/// Both combatants of a battle.
#[derive(Clone, Debug)]
pub struct CombatState<'u> {
    combatants: SideMap<Combatant<'u>>,
}

impl<'u> CombatState<'u> {
    /// Set up a battle between two units.
    #[must_use]
    pub fn new(first: &'u UnitDefinition, second: &'u UnitDefinition) -> Self {
        Self {
            combatants: SideMap::from_pair(Combatant::new(first), Combatant::new(second)),
        }
    }

    /// Get a combatant.
    #[must_use]
    pub fn get(&self, side: Side) -> &Combatant<'u> {
        &self.combatants[side]
    }

    /// Get a combatant mutably.
    pub fn get_mut(&mut self, side: Side) -> &mut Combatant<'u> {
        &mut self.combatants[side]
    }

    /// Borrow `side` as actor and its opponent as target.
    pub fn actor_and_target(&mut self, side: Side) -> (&mut Combatant<'u>, &mut Combatant<'u>) {
        self.combatants.split_mut(side)
    }

    /// Iterate over both combatants in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &Combatant<'u>)> {
        self.combatants.iter()
    }

    /// Iterate mutably over both combatants in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut Combatant<'u>)> {
        self.combatants.iter_mut()
    }

    /// Names of both combatants.
    #[must_use]
    pub fn names(&self) -> SideMap<String> {
        SideMap::new(|side| self.combatants[side].name().to_string())
    }

    /// Result if the battle is over, `None` while both stand.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        let first_down = self.combatants[Side::First].is_defeated();
        let second_down = self.combatants[Side::Second].is_defeated();
        match (first_down, second_down) {
            (true, true) => Some(BattleResult::Draw),
            (false, true) => Some(BattleResult::Winner(Side::First)),
            (true, false) => Some(BattleResult::Winner(Side::Second)),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ActiveEffect, StatTarget};
    use crate::units::BaseAttributes;

    #[test]
    fn test_new_combatant_is_fresh() {
        let unit = UnitDefinition::new("A", BaseAttributes::new(16, 14, 14, 10, 10));
        let combatant = Combatant::new(&unit);

        assert_eq!(combatant.stats.hp.current, 70);
        assert_eq!(combatant.stats.hp.total, 70);
        assert!(combatant.effects.is_empty());
        assert_eq!(combatant.cooldowns, CooldownTracker::new());
    }

    #[test]
    fn test_recompute_keeps_damage() {
        let unit = UnitDefinition::new("A", BaseAttributes::default());
        let mut combatant = Combatant::new(&unit);
        combatant.stats.hp.current = 20;
        combatant.effects.push(ActiveEffect::new(StatTarget::Con, 2, 3).with_source("A"));

        combatant.recompute();

        assert_eq!(combatant.stats.hp.total, 60);
        assert_eq!(combatant.stats.hp.current, 20);
    }

    #[test]
    fn test_recompute_with_foreign_effect_still_applies_it() {
        let unit = UnitDefinition::new("A", BaseAttributes::default());
        let mut combatant = Combatant::new(&unit);
        combatant.effects.push(ActiveEffect::new(StatTarget::Str, 3, 2).with_source("B"));

        assert_eq!(combatant.effects.applicable_to("A").count(), 0);
        combatant.recompute();

        // Logged as an inconsistency, but the stat change is kept.
        assert_eq!(combatant.stats.damroll, 4);
    }

    #[test]
    fn test_result() {
        let a = UnitDefinition::new("A", BaseAttributes::default());
        let b = UnitDefinition::new("B", BaseAttributes::default());
        let mut state = CombatState::new(&a, &b);

        assert_eq!(state.result(), None);

        state.get_mut(Side::Second).stats.hp.current = 0;
        assert_eq!(state.result(), Some(BattleResult::Winner(Side::First)));

        state.get_mut(Side::First).stats.hp.current = -2;
        assert_eq!(state.result(), Some(BattleResult::Draw));
    }

    #[test]
    fn test_actor_and_target_are_distinct() {
        let a = UnitDefinition::new("A", BaseAttributes::default());
        let b = UnitDefinition::new("B", BaseAttributes::default());
        let mut state = CombatState::new(&a, &b);

        let (actor, target) = state.actor_and_target(Side::Second);
        assert_eq!(actor.name(), "B");
        assert_eq!(target.name(), "A");
    }
}
