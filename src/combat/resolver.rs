//! Turn resolution.
//!
//! `ActionResolver` runs one combatant's turn against the other:
//! 1. Refresh the actor's stats from its own effects
//! 2. Refresh the target's stats from the target's own effects
//! 3. Ask the policy for an action
//! 4. Pay for it, apply its outcome and start its cooldown
//!
//! An ability that turns out to be unknown or unaffordable at commit time
//! is replaced by a basic attack, so every turn does something.

use tracing::{debug, trace};

use crate::abilities::{AbilityBook, AbilityDefinition, AbilityTable, EffectKind};
use crate::core::{CombatRng, Side};
use crate::events::{BattleEvent, BattleObserver};
use crate::stats::Resource;

use super::action::{Action, ActionKind};
use super::cooldown::CooldownCategory;
use super::policy::{ActionPolicy, PolicyContext};
use super::state::Combatant;

/// Sides of the d20 used for basic attack rolls.
pub const ATTACK_DIE: i64 = 20;
/// Sides of the die used for basic attack damage.
pub const DAMAGE_DIE: i64 = 4;

/// Resolves turns using a fixed ability book and policy.
pub struct ActionResolver<'a> {
    abilities: &'a AbilityBook,
    policy: &'a dyn ActionPolicy,
    cast_tag: &'a str,
}

impl<'a> ActionResolver<'a> {
    /// Create a resolver.
    pub fn new(abilities: &'a AbilityBook, policy: &'a dyn ActionPolicy, cast_tag: &'a str) -> Self {
        Self {
            abilities,
            policy,
            cast_tag,
        }
    }

    /// Resolve one turn of `actor` (on `side`) against `target`.
    ///
    /// Returns the action actually performed, which is `Action::Attack`
    /// when the chosen ability could not be committed.
    pub fn resolve_turn(
        &self,
        side: Side,
        actor: &mut Combatant<'_>,
        target: &mut Combatant<'_>,
        rng: &mut CombatRng,
        observer: &mut dyn BattleObserver,
    ) -> Action {
        actor.recompute();
        target.recompute();

        let action = {
            let ctx = PolicyContext {
                unit: actor.unit,
                stats: &actor.stats,
                cooldowns: &actor.cooldowns,
                abilities: self.abilities,
                cast_tag: self.cast_tag,
            };
            self.policy.choose(&ctx, rng)
        };
        debug!(actor = actor.name(), %action, "action selected");
        observer.on_event(&BattleEvent::ActionSelected {
            side,
            actor: actor.name().to_string(),
            action: action.clone(),
        });

        match &action {
            Action::Cast(name) => {
                if let Some(spell) = self.committable(ActionKind::Cast, name, actor) {
                    self.use_ability(ActionKind::Cast, spell, side, actor, target, rng, observer);
                    return action;
                }
            }
            Action::Skill(name) => {
                if let Some(skill) = self.committable(ActionKind::Skill, name, actor) {
                    self.use_ability(ActionKind::Skill, skill, side, actor, target, rng, observer);
                    return action;
                }
            }
            Action::Attack => {}
        }

        basic_attack(actor, target, rng, observer);
        Action::Attack
    }

    fn table(&self, kind: ActionKind) -> &'a AbilityTable {
        match kind {
            ActionKind::Skill => &self.abilities.skills,
            ActionKind::Cast | ActionKind::Attack => &self.abilities.spells,
        }
    }

    /// Re-check an ability right before paying for it.
    fn committable(&self, kind: ActionKind, name: &str, actor: &Combatant<'_>) -> Option<&'a AbilityDefinition> {
        if kind == ActionKind::Cast && !actor.unit.has_tag(self.cast_tag) {
            debug!(actor = actor.name(), spell = name, "not a caster, falling back to attack");
            return None;
        }
        if let Some(category) = CooldownCategory::for_action(kind) {
            if !actor.cooldowns.is_ready(category) {
                debug!(actor = actor.name(), ability = name, "on cooldown, falling back to attack");
                return None;
            }
        }
        let Some(ability) = self.table(kind).get(name) else {
            debug!(actor = actor.name(), ability = name, "unknown ability, falling back to attack");
            return None;
        };
        let resource = resource_for(kind);
        if !actor.stats.pool(resource).can_afford(ability.cost) {
            debug!(
                actor = actor.name(),
                ability = name,
                cost = ability.cost,
                available = actor.stats.pool(resource).current,
                "cannot afford ability, falling back to attack"
            );
            return None;
        }
        Some(ability)
    }

    #[allow(clippy::too_many_arguments)]
    fn use_ability(
        &self,
        kind: ActionKind,
        ability: &AbilityDefinition,
        side: Side,
        actor: &mut Combatant<'_>,
        target: &mut Combatant<'_>,
        rng: &mut CombatRng,
        observer: &mut dyn BattleObserver,
    ) {
        let pool = actor.stats.pool_mut(resource_for(kind));
        pool.current = pool.current.saturating_sub(ability.cost);

        match ability.effect {
            EffectKind::Damage => {
                let channel = ability.channel();
                let rolled = ability.roll_magnitude(rng);
                // Only spells are resisted; skills land at full strength.
                let dealt = match kind {
                    ActionKind::Cast => target.stats.reduce_damage(rolled, channel),
                    ActionKind::Skill | ActionKind::Attack => rolled.max(0),
                };
                target.stats.hp.current = target.stats.hp.current.saturating_sub(dealt);
                observer.on_event(&BattleEvent::AbilityDamage {
                    kind,
                    actor: actor.name().to_string(),
                    target: target.name().to_string(),
                    ability: ability.name.clone(),
                    channel: channel.to_string(),
                    rolled,
                    dealt,
                    target_hp: target.stats.hp.current,
                });
            }
            EffectKind::Heal if kind == ActionKind::Cast => {
                let amount = ability.roll_magnitude(rng);
                // Not clamped here; the next regen step pulls hp back to total.
                target.stats.hp.current = target.stats.hp.current.saturating_add(amount);
                observer.on_event(&BattleEvent::AbilityHeal {
                    actor: actor.name().to_string(),
                    target: target.name().to_string(),
                    ability: ability.name.clone(),
                    amount,
                    target_hp: target.stats.hp.current,
                });
            }
            EffectKind::Buff | EffectKind::Debuff => match ability.build_effect(actor.name()) {
                Some(effect) => {
                    actor.effects.push(effect.clone());
                    observer.on_event(&BattleEvent::EffectApplied {
                        side,
                        actor: actor.name().to_string(),
                        ability: ability.name.clone(),
                        kind: ability.effect,
                        effect,
                    });
                }
                None => unrecognized(actor, ability, observer),
            },
            EffectKind::Heal | EffectKind::Unknown => unrecognized(actor, ability, observer),
        }

        if let Some(category) = CooldownCategory::for_action(kind) {
            actor.cooldowns.set(category, ability.cooldown);
        }
    }
}

fn resource_for(kind: ActionKind) -> Resource {
    match kind {
        ActionKind::Skill => Resource::Stamina,
        ActionKind::Cast | ActionKind::Attack => Resource::Mana,
    }
}

fn unrecognized(actor: &Combatant<'_>, ability: &AbilityDefinition, observer: &mut dyn BattleObserver) {
    debug!(actor = actor.name(), ability = %ability.name, effect = %ability.effect, "ability has no recognized outcome");
    observer.on_event(&BattleEvent::UnrecognizedAbility {
        actor: actor.name().to_string(),
        ability: ability.name.clone(),
    });
}

/// d20 + hitroll against the target's armor class; on a hit,
/// d4 + damroll physical damage. Resistances do not apply.
fn basic_attack(
    actor: &Combatant<'_>,
    target: &mut Combatant<'_>,
    rng: &mut CombatRng,
    observer: &mut dyn BattleObserver,
) {
    let roll = rng.die(ATTACK_DIE) + actor.stats.hitroll;
    let armor_class = target.stats.armor_class;
    trace!(actor = actor.name(), roll, armor_class, "attack roll");

    if roll >= armor_class {
        // A hit never heals, even with a negative damroll.
        let damage = (rng.die(DAMAGE_DIE) + actor.stats.damroll).max(0);
        target.stats.hp.current = target.stats.hp.current.saturating_sub(damage);
        observer.on_event(&BattleEvent::AttackHit {
            actor: actor.name().to_string(),
            target: target.name().to_string(),
            roll,
            armor_class,
            damage,
            target_hp: target.stats.hp.current,
        });
    } else {
        observer.on_event(&BattleEvent::AttackMissed {
            actor: actor.name().to_string(),
            target: target.name().to_string(),
            roll,
            armor_class,
        });
    }
}
