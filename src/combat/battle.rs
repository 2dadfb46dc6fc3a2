//! The round loop.
//!
//! A battle is a small state machine:
//!
//! ```text
//! RoundStart -> Turn(First) -> Check(First) -> Turn(Second) -> Check(Second)
//!            -> EndOfRound -> RoundStart ...
//! ```
//!
//! Any `Check` that finds a combatant at 0 hp or below ends the battle
//! immediately, so the second side never acts once the first has won.
//! `Battle::step` advances exactly one phase, which lets tests stop at any
//! boundary; `Battle::run` steps until the battle is over.

use tracing::{debug, info, info_span};

use crate::abilities::AbilityBook;
use crate::core::{BattleConfig, CombatRng, Side, SideMap};
use crate::events::{BattleEvent, BattleObserver, CombatantStatus};
use crate::units::UnitDefinition;

use super::cooldown::CooldownCategory;
use super::outcome::{BattleResult, Outcome};
use super::policy::ActionPolicy;
use super::resolver::ActionResolver;
use super::state::CombatState;

/// Where a battle currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    /// About to start a round (cap check happens here).
    RoundStart,
    /// A side is about to act.
    Turn(Side),
    /// A side has acted; check for a defeated combatant.
    Check(Side),
    /// Both sides acted: effects, regen and cooldowns advance.
    EndOfRound,
    /// Terminal.
    Over(Outcome),
}

/// One battle between two units.
pub struct Battle<'u, O: BattleObserver> {
    state: CombatState<'u>,
    abilities: &'u AbilityBook,
    policy: Box<dyn ActionPolicy>,
    config: BattleConfig,
    rng: CombatRng,
    observer: O,
    phase: BattlePhase,
    round: u32,
}

impl<'u, O: BattleObserver> Battle<'u, O> {
    /// Set up a battle. Both combatants start at full pools.
    ///
    /// The policy and RNG seed come from `config`.
    pub fn new(
        first: &'u UnitDefinition,
        second: &'u UnitDefinition,
        abilities: &'u AbilityBook,
        config: BattleConfig,
        mut observer: O,
    ) -> Self {
        let state = CombatState::new(first, second);
        observer.on_event(&BattleEvent::BattleStarted { names: state.names() });

        Self {
            state,
            abilities,
            policy: config.policy.build(),
            rng: CombatRng::from_seed_opt(config.seed),
            config,
            observer,
            phase: BattlePhase::RoundStart,
            round: 1,
        }
    }

    /// Replace the action policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn ActionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the RNG (builder pattern).
    #[must_use]
    pub fn with_rng(mut self, rng: CombatRng) -> Self {
        self.rng = rng;
        self
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Current round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Combat state.
    #[must_use]
    pub fn state(&self) -> &CombatState<'u> {
        &self.state
    }

    /// Combat state, mutably.
    pub fn state_mut(&mut self) -> &mut CombatState<'u> {
        &mut self.state
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Recover the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Outcome, once the battle is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            BattlePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Advance one phase and return the new phase.
    ///
    /// Stepping a finished battle does nothing.
    pub fn step(&mut self) -> BattlePhase {
        self.phase = match self.phase {
            BattlePhase::RoundStart => self.start_round(),
            BattlePhase::Turn(side) => self.take_turn(side),
            BattlePhase::Check(side) => self.check(side),
            BattlePhase::EndOfRound => self.end_round(),
            over @ BattlePhase::Over(_) => over,
        };
        self.phase
    }

    /// Step until the battle is over.
    pub fn run(&mut self) -> Outcome {
        let names = self.state.names();
        let span = info_span!("battle", first = %names[Side::First], second = %names[Side::Second]);
        let _guard = span.enter();

        loop {
            if let BattlePhase::Over(outcome) = self.step() {
                info!(result = ?outcome.result, rounds = outcome.rounds, capped = outcome.capped, "battle over");
                return outcome;
            }
        }
    }

    fn start_round(&mut self) -> BattlePhase {
        if self.config.round_cap_reached(self.round) {
            let last = self.round - 1;
            info!(round = last, "round cap reached, declaring a draw");
            self.observer.on_event(&BattleEvent::RoundCapReached { round: last });
            return self.finish(BattleResult::Draw, last, true);
        }
        debug!(round = self.round, "round start");
        self.observer.on_event(&BattleEvent::RoundStarted { round: self.round });
        BattlePhase::Turn(Side::First)
    }

    fn take_turn(&mut self, side: Side) -> BattlePhase {
        let (actor, target) = self.state.actor_and_target(side);
        self.observer.on_event(&BattleEvent::TurnStarted {
            side,
            actor: actor.name().to_string(),
        });

        let resolver = ActionResolver::new(self.abilities, self.policy.as_ref(), &self.config.cast_tag);
        resolver.resolve_turn(side, actor, target, &mut self.rng, &mut self.observer);
        BattlePhase::Check(side)
    }

    fn check(&mut self, side: Side) -> BattlePhase {
        if let Some(result) = self.state.result() {
            return self.finish(result, self.round, false);
        }
        match side {
            Side::First => BattlePhase::Turn(Side::Second),
            Side::Second => BattlePhase::EndOfRound,
        }
    }

    fn end_round(&mut self) -> BattlePhase {
        for (side, combatant) in self.state.iter_mut() {
            for effect in combatant.effects.tick() {
                self.observer.on_event(&BattleEvent::EffectExpired {
                    side,
                    name: combatant.name().to_string(),
                    effect,
                });
            }
        }

        for (_, combatant) in self.state.iter_mut() {
            combatant.recompute();
        }

        for (side, combatant) in self.state.iter_mut() {
            combatant.stats.apply_regen();
            self.observer.on_event(&BattleEvent::StatsRecomputed {
                side,
                name: combatant.name().to_string(),
                stats: combatant.stats.clone(),
            });
        }

        for (side, combatant) in self.state.iter_mut() {
            combatant.cooldowns.tick();
            self.observer.on_event(&BattleEvent::CooldownsTicked {
                side,
                name: combatant.name().to_string(),
                spell: combatant.cooldowns.get(CooldownCategory::Spell),
                skill: combatant.cooldowns.get(CooldownCategory::Skill),
            });
        }

        let status: SideMap<CombatantStatus> = SideMap::new(|side| self.state.get(side).status());
        self.observer.on_event(&BattleEvent::RoundStatus { round: self.round, status });

        self.round += 1;
        if let Some(delay) = self.config.round_delay() {
            std::thread::sleep(delay);
        }
        BattlePhase::RoundStart
    }

    fn finish(&mut self, result: BattleResult, rounds: u32, capped: bool) -> BattlePhase {
        let outcome = Outcome { result, rounds, capped };
        let winner = outcome.winner().map(|side| self.state.get(side).name().to_string());
        self.observer.on_event(&BattleEvent::BattleEnded { outcome, winner });
        BattlePhase::Over(outcome)
    }
}

/// Run a battle to completion and return its outcome.
///
/// ```
/// use rust_duel::abilities::AbilityBook;
/// use rust_duel::combat::run_battle;
/// use rust_duel::core::BattleConfig;
/// use rust_duel::events::NullObserver;
/// use rust_duel::units::{BaseAttributes, UnitDefinition};
///
/// let knight = UnitDefinition::new("Knight", BaseAttributes::new(16, 14, 14, 10, 10));
/// let peasant = UnitDefinition::new("Peasant", BaseAttributes::default());
/// let book = AbilityBook::empty();
///
/// let outcome = run_battle(&knight, &peasant, &book, BattleConfig::new().with_seed(7), NullObserver);
/// assert!(outcome.rounds >= 1);
/// ```
pub fn run_battle<O: BattleObserver>(
    first: &UnitDefinition,
    second: &UnitDefinition,
    abilities: &AbilityBook,
    config: BattleConfig,
    observer: O,
) -> Outcome {
    Battle::new(first, second, abilities, config, observer).run()
}
