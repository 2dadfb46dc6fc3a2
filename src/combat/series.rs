//! Repeated battles between the same pair of units.
//!
//! Each trial gets its own RNG forked from one master seed, so a seeded
//! series is reproducible end to end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::abilities::AbilityBook;
use crate::core::{BattleConfig, CombatRng, Side, SideMap};
use crate::events::NullObserver;
use crate::units::UnitDefinition;

use super::battle::Battle;
use super::outcome::BattleResult;

/// Aggregate results of a series of battles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub trials: u32,
    pub wins: SideMap<u32>,
    pub draws: u32,
    /// Total rounds fought over all trials.
    pub total_rounds: u64,
    /// Trials that ended on the round cap.
    pub capped: u32,
}

impl SeriesSummary {
    /// Fraction of trials won by `side` (0.0 for an empty series).
    #[must_use]
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.wins[side]) / f64::from(self.trials)
    }

    /// Fraction of trials drawn.
    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.draws) / f64::from(self.trials)
    }

    /// Average battle length in rounds.
    #[must_use]
    pub fn mean_rounds(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / f64::from(self.trials)
    }
}

/// Run `trials` silent battles and tally the results.
///
/// Pacing delay in `config` is ignored.
pub fn simulate_series(
    first: &UnitDefinition,
    second: &UnitDefinition,
    abilities: &AbilityBook,
    config: &BattleConfig,
    trials: u32,
) -> SeriesSummary {
    let config = config.clone().with_round_delay_ms(0);
    let mut master = CombatRng::from_seed_opt(config.seed);
    let mut summary = SeriesSummary::default();

    info!(first = %first.name, second = %second.name, trials, seed = master.seed(), "running series");

    for trial in 0..trials {
        let outcome = Battle::new(first, second, abilities, config.clone(), NullObserver)
            .with_rng(master.fork())
            .run();
        debug!(trial, result = ?outcome.result, rounds = outcome.rounds, "trial finished");

        summary.trials += 1;
        summary.total_rounds += u64::from(outcome.rounds);
        if outcome.capped {
            summary.capped += 1;
        }
        match outcome.result {
            BattleResult::Winner(side) => summary.wins[side] += 1,
            BattleResult::Draw => summary.draws += 1,
        }
    }

    summary
}
