//! Derived combat statistics.
//!
//! `compute` turns a unit's base attributes plus its active effects into
//! the numbers combat actually uses. It is a pure function: the same
//! inputs always give the same block.
//!
//! ## Formulas
//!
//! All divisions floor (toward negative infinity), since effects can
//! push attributes below zero.
//!
//! | Stat | Formula |
//! |---|---|
//! | hitroll | dex / 2 |
//! | damroll | str / 3 |
//! | armor class | 10 + dex / 4 (+ ac effects) |
//! | hp total / regen | con * 5 / con / 8 |
//! | mana total / regen | (int + wis) * 5 / (int + wis) / 8 |
//! | stamina total / regen | (str + dex + con) * 3 / (str + con) / 8 |

use serde::{Deserialize, Serialize};

use crate::effects::{EffectLedger, StatTarget};
use crate::units::{BaseAttributes, Resistances, UnitDefinition};

use super::resistance::apply_damage_resistance;

/// Armor class before dexterity and effects.
pub const BASE_ARMOR_CLASS: i64 = 10;

/// A current/total resource pair with per-round regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Current amount. May dip below zero after damage.
    pub current: i64,
    /// Maximum amount.
    pub total: i64,
    /// Amount restored at each round boundary.
    pub regen: i64,
}

impl ResourcePool {
    /// A full pool.
    #[must_use]
    pub const fn full(total: i64, regen: i64) -> Self {
        Self {
            current: total,
            total,
            regen,
        }
    }

    /// Check if `cost` can be paid from the current amount.
    #[must_use]
    pub const fn can_afford(&self, cost: i64) -> bool {
        cost <= self.current
    }

    /// Apply one round of regen: `current = min(total, current + regen)`.
    ///
    /// Negative regen (from negative attributes) restores nothing.
    pub fn regenerate(&mut self) {
        self.current = self.total.min(self.current.saturating_add(self.regen.max(0)));
    }
}

/// The three resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Hp,
    Mana,
    Stamina,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Resource::Hp => "HP",
            Resource::Mana => "Mana",
            Resource::Stamina => "Stamina",
        };
        f.write_str(s)
    }
}

/// Full combat stat block for one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub hitroll: i64,
    pub damroll: i64,
    pub armor_class: i64,
    pub hp: ResourcePool,
    pub mana: ResourcePool,
    pub stamina: ResourcePool,
    /// Copied from the unit definition.
    pub resistances: Resistances,
}

impl DerivedStats {
    /// Get a resource pool.
    #[must_use]
    pub fn pool(&self, resource: Resource) -> &ResourcePool {
        match resource {
            Resource::Hp => &self.hp,
            Resource::Mana => &self.mana,
            Resource::Stamina => &self.stamina,
        }
    }

    /// Get a resource pool mutably.
    pub fn pool_mut(&mut self, resource: Resource) -> &mut ResourcePool {
        match resource {
            Resource::Hp => &mut self.hp,
            Resource::Mana => &mut self.mana,
            Resource::Stamina => &mut self.stamina,
        }
    }

    /// Whether this combatant is down (`hp.current <= 0`).
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp.current <= 0
    }

    /// Regenerate all three pools independently.
    pub fn apply_regen(&mut self) {
        self.hp.regenerate();
        self.mana.regenerate();
        self.stamina.regenerate();
    }

    /// Reduce incoming channel damage by this combatant's resistance.
    #[must_use]
    pub fn reduce_damage(&self, amount: i64, channel: &str) -> i64 {
        apply_damage_resistance(amount, self.resistances.percent(channel))
    }
}

/// Attributes after effect modifiers (additive, saturating).
#[must_use]
pub fn effective_attributes(base: &BaseAttributes, effects: &EffectLedger) -> BaseAttributes {
    let mut attrs = *base;
    for effect in effects {
        match effect.stat {
            StatTarget::Str => attrs.strength = attrs.strength.saturating_add(effect.modifier),
            StatTarget::Dex => attrs.dexterity = attrs.dexterity.saturating_add(effect.modifier),
            StatTarget::Con => attrs.constitution = attrs.constitution.saturating_add(effect.modifier),
            StatTarget::Int => attrs.intelligence = attrs.intelligence.saturating_add(effect.modifier),
            StatTarget::Wis => attrs.wisdom = attrs.wisdom.saturating_add(effect.modifier),
            StatTarget::Ac | StatTarget::Unknown => {}
        }
    }
    attrs
}

/// Compute a stat block for `unit` under `effects`.
///
/// With `previous`, the three current values are carried forward so
/// damage and spent resources survive recomputation. Without it, every
/// pool starts full. Arithmetic saturates, so extreme attributes pin at
/// the `i64` bounds instead of overflowing.
#[must_use]
pub fn compute(unit: &UnitDefinition, effects: &EffectLedger, previous: Option<&DerivedStats>) -> DerivedStats {
    let a = effective_attributes(&unit.stats, effects);
    let mental = a.intelligence.saturating_add(a.wisdom);
    let body = a.strength.saturating_add(a.dexterity).saturating_add(a.constitution);

    let mut stats = DerivedStats {
        hitroll: a.dexterity.div_euclid(2),
        damroll: a.strength.div_euclid(3),
        armor_class: (BASE_ARMOR_CLASS + a.dexterity.div_euclid(4))
            .saturating_add(effects.total_modifier(StatTarget::Ac)),
        hp: ResourcePool::full(a.constitution.saturating_mul(5), a.constitution.div_euclid(8)),
        mana: ResourcePool::full(mental.saturating_mul(5), mental.div_euclid(8)),
        stamina: ResourcePool::full(
            body.saturating_mul(3),
            a.strength.saturating_add(a.constitution).div_euclid(8),
        ),
        resistances: unit.resistances.clone(),
    };

    if let Some(prev) = previous {
        stats.hp.current = prev.hp.current;
        stats.mana.current = prev.mana.current;
        stats.stamina.current = prev.stamina.current;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ActiveEffect;

    fn unit(str_: i64, dex: i64, con: i64, int: i64, wis: i64) -> UnitDefinition {
        UnitDefinition::new("Test", BaseAttributes::new(str_, dex, con, int, wis))
    }

    #[test]
    fn test_formulas() {
        let stats = compute(&unit(16, 14, 14, 10, 10), &EffectLedger::new(), None);

        assert_eq!(stats.hitroll, 7);
        assert_eq!(stats.damroll, 5);
        assert_eq!(stats.armor_class, 13);
        assert_eq!(stats.hp, ResourcePool::full(70, 1));
        assert_eq!(stats.mana, ResourcePool::full(100, 2));
        assert_eq!(stats.stamina, ResourcePool::full(132, 3));
    }

    #[test]
    fn test_default_attributes() {
        let stats = compute(&unit(10, 10, 10, 10, 10), &EffectLedger::new(), None);

        assert_eq!(stats.hitroll, 5);
        assert_eq!(stats.damroll, 3);
        assert_eq!(stats.armor_class, 12);
        assert_eq!(stats.hp.total, 50);
        assert_eq!(stats.stamina.total, 90);
        assert_eq!(stats.stamina.regen, 2);
    }

    #[test]
    fn test_effects_modify_attributes() {
        let ledger: EffectLedger = [
            ActiveEffect::new(StatTarget::Str, 6, 2),
            ActiveEffect::new(StatTarget::Con, -2, 2),
        ]
        .into_iter()
        .collect();

        let stats = compute(&unit(10, 10, 10, 10, 10), &ledger, None);
        assert_eq!(stats.damroll, 5);
        assert_eq!(stats.hp.total, 40);
        assert_eq!(stats.stamina.total, 3 * (16 + 10 + 8));
    }

    #[test]
    fn test_negative_attributes_floor() {
        let ledger: EffectLedger = [ActiveEffect::new(StatTarget::Dex, -15, 1)].into_iter().collect();
        let stats = compute(&unit(10, 10, 10, 10, 10), &ledger, None);

        // dex = -5
        assert_eq!(stats.hitroll, -3);
        assert_eq!(stats.armor_class, 10 - 2);
    }

    #[test]
    fn test_ac_effect_applies_after_formula() {
        let ledger: EffectLedger = [ActiveEffect::new(StatTarget::Ac, 3, 2)].into_iter().collect();
        let stats = compute(&unit(10, 10, 10, 10, 10), &ledger, None);
        assert_eq!(stats.armor_class, 15);
        assert_eq!(stats.hitroll, 5);
    }

    #[test]
    fn test_previous_currents_carried_forward() {
        let u = unit(10, 10, 10, 10, 10);
        let mut prev = compute(&u, &EffectLedger::new(), None);
        prev.hp.current = 12;
        prev.mana.current = 0;
        prev.stamina.current = 33;

        let ledger: EffectLedger = [ActiveEffect::new(StatTarget::Con, 4, 2)].into_iter().collect();
        let next = compute(&u, &ledger, Some(&prev));

        assert_eq!(next.hp.total, 70);
        assert_eq!(next.hp.current, 12);
        assert_eq!(next.mana.current, 0);
        assert_eq!(next.stamina.current, 33);
    }

    #[test]
    fn test_resistances_copied() {
        let u = unit(10, 10, 10, 10, 10).with_resistances(Resistances::new().with("fire", 25));
        let stats = compute(&u, &EffectLedger::new(), None);
        assert_eq!(stats.resistances.percent("fire"), 25);
        assert_eq!(stats.reduce_damage(8, "fire"), 6);
        assert_eq!(stats.reduce_damage(8, "cold"), 8);
    }

    #[test]
    fn test_extreme_attributes_saturate() {
        let huge = compute(&unit(i64::MAX, i64::MAX, i64::MAX, i64::MAX, i64::MAX), &EffectLedger::new(), None);
        assert_eq!(huge.hp.total, i64::MAX);
        assert_eq!(huge.mana.total, i64::MAX);
        assert_eq!(huge.stamina.total, i64::MAX);
        assert_eq!(huge.hitroll, i64::MAX / 2);

        let ledger: EffectLedger = [
            ActiveEffect::new(StatTarget::Con, i64::MIN, 1),
            ActiveEffect::new(StatTarget::Ac, i64::MIN, 1),
            ActiveEffect::new(StatTarget::Ac, -1, 1),
        ]
        .into_iter()
        .collect();
        let tiny = compute(&unit(10, 10, 10, 10, 10), &ledger, None);
        assert_eq!(tiny.hp.total, i64::MIN);
        assert_eq!(tiny.armor_class, i64::MIN + 12);

        let mut pool = ResourcePool { current: i64::MAX - 1, total: i64::MAX, regen: i64::MAX };
        pool.regenerate();
        assert_eq!(pool.current, i64::MAX);
    }

    #[test]
    fn test_regen_clamps_to_total() {
        let mut pool = ResourcePool { current: 48, total: 50, regen: 5 };
        pool.regenerate();
        assert_eq!(pool.current, 50);

        let mut overhealed = ResourcePool { current: 58, total: 50, regen: 1 };
        overhealed.regenerate();
        assert_eq!(overhealed.current, 50);

        let mut drained = ResourcePool { current: 0, total: 50, regen: 2 };
        drained.regenerate();
        assert_eq!(drained.current, 2);
    }

    #[test]
    fn test_negative_regen_restores_nothing() {
        let mut pool = ResourcePool { current: 3, total: 10, regen: -1 };
        pool.regenerate();
        assert_eq!(pool.current, 3);
    }

    #[test]
    fn test_is_defeated() {
        let mut stats = compute(&unit(10, 10, 10, 10, 10), &EffectLedger::new(), None);
        assert!(!stats.is_defeated());
        stats.hp.current = 0;
        assert!(stats.is_defeated());
        stats.hp.current = -4;
        assert!(stats.is_defeated());
    }
}
