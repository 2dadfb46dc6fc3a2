//! Per-combatant effect storage.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::effect::{ActiveEffect, StatTarget};

type EffectVec = SmallVec<[ActiveEffect; 4]>;

/// Ordered collection of a single combatant's active effects.
///
/// A ledger is owned by exactly one combatant and is never shared.
/// Effects keep insertion order; `tick` advances all of them together.
///
/// ```
/// use rust_duel::effects::{ActiveEffect, EffectLedger, StatTarget};
///
/// let mut ledger = EffectLedger::new();
/// ledger.push(ActiveEffect::new(StatTarget::Str, 2, 2));
///
/// assert!(ledger.tick().is_empty());
/// assert_eq!(ledger.tick().len(), 1);
/// assert!(ledger.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLedger {
    effects: EffectVec,
}

impl EffectLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect.
    pub fn push(&mut self, effect: ActiveEffect) {
        self.effects.push(effect);
    }

    /// Advance one round: decrement every duration by 1 and remove
    /// effects that reached 0 or below.
    ///
    /// Returns the expired effects in ledger order.
    pub fn tick(&mut self) -> Vec<ActiveEffect> {
        for effect in &mut self.effects {
            effect.duration -= 1;
        }

        let (kept, expired): (EffectVec, EffectVec) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(|e| e.duration > 0);
        self.effects = kept;
        expired.into_vec()
    }

    /// Iterate over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    /// Effects that apply to the combatant named `name`.
    pub fn applicable_to<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ActiveEffect> {
        self.effects.iter().filter(move |e| e.applies_to(name))
    }

    /// Sum of modifiers targeting `stat`.
    #[must_use]
    pub fn total_modifier(&self, stat: StatTarget) -> i64 {
        self.effects
            .iter()
            .filter(|e| e.stat == stat)
            .fold(0i64, |total, e| total.saturating_add(e.modifier))
    }

    /// Get number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// View the effects as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ActiveEffect] {
        &self.effects
    }
}

impl FromIterator<ActiveEffect> for EffectLedger {
    fn from_iter<I: IntoIterator<Item = ActiveEffect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EffectLedger {
    type Item = &'a ActiveEffect;
    type IntoIter = std::slice::Iter<'a, ActiveEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}
