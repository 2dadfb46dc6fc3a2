//! Battle loop integration tests.

use rust_duel::abilities::{AbilityBook, AbilityDefinition, AbilityTable, EffectKind};
use rust_duel::combat::{run_battle, simulate_series, Battle, BattlePhase, BattleResult};
use rust_duel::core::{BattleConfig, Side};
use rust_duel::effects::StatTarget;
use rust_duel::events::{BattleEvent, EventLog, NullObserver};
use rust_duel::stats::compute;
use rust_duel::units::{BaseAttributes, Resistances, UnitDefinition};
use rust_duel::EffectLedger;

fn unit_a() -> UnitDefinition {
    UnitDefinition::new("Unit A", BaseAttributes::new(16, 14, 14, 10, 10))
}

fn unit_b() -> UnitDefinition {
    UnitDefinition::new("Unit B", BaseAttributes::new(10, 10, 10, 10, 10))
}

fn warrior() -> UnitDefinition {
    UnitDefinition::new("Warrior", BaseAttributes::new(17, 12, 16, 8, 9))
        .with_tag("skill_rage")
        .with_tag("skill_power_strike")
}

fn skills() -> AbilityBook {
    let skills = AbilityTable::new()
        .with(AbilityDefinition::stat_effect("rage", EffectKind::Buff, 20, 4, StatTarget::Str, 4, 3))
        .with(AbilityDefinition::damage("power_strike", 15, 2, 6, 12));
    AbilityBook::new(AbilityTable::new(), skills)
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn test_reference_scenario_stats() {
    let a = compute(&unit_a(), &EffectLedger::new(), None);
    let b = compute(&unit_b(), &EffectLedger::new(), None);

    assert_eq!((a.hitroll, a.damroll, a.hp.total), (7, 5, 70));
    assert_eq!((b.hitroll, b.damroll, b.hp.total), (5, 3, 50));
}

#[test]
fn test_stronger_unit_usually_wins() {
    let (a, b) = (unit_a(), unit_b());
    let summary = simulate_series(&a, &b, &AbilityBook::empty(), &BattleConfig::new().with_seed(2024), 200);

    let not_lost = summary.wins[Side::First] + summary.draws;
    assert!(
        f64::from(not_lost) / f64::from(summary.trials) > 0.5,
        "A won or drew only {not_lost} of {}",
        summary.trials
    );
}

// =============================================================================
// Turn Order and Termination
// =============================================================================

#[test]
fn test_kill_on_first_turn_skips_second_actor() {
    let (a, b) = (unit_a(), unit_b());
    let book = AbilityBook::empty();
    let mut battle = Battle::new(&a, &b, &book, BattleConfig::new().with_seed(8), EventLog::new());

    // Leave B one hit from death, then let A act.
    battle.state_mut().get_mut(Side::Second).stats.hp.current = 1;
    battle.step();

    let mut outcome = None;
    for _ in 0..200 {
        if let BattlePhase::Over(o) = battle.step() {
            outcome = Some(o);
            break;
        }
    }
    let outcome = outcome.expect("battle should end");
    assert_eq!(outcome.result, BattleResult::Winner(Side::First));

    let events = battle.into_observer().into_events();
    let final_round_turns: Vec<Side> = events
        .iter()
        .rev()
        .take_while(|e| !matches!(e, BattleEvent::RoundStarted { .. }))
        .filter_map(|e| match e {
            BattleEvent::TurnStarted { side, .. } => Some(*side),
            _ => None,
        })
        .collect();
    assert_eq!(final_round_turns, vec![Side::First]);
}

#[test]
fn test_event_stream_shape() {
    let (a, b) = (unit_a(), unit_b());
    let mut log = EventLog::new();
    let outcome = run_battle(&a, &b, &AbilityBook::empty(), BattleConfig::new().with_seed(77), &mut log);

    let events = log.events();
    assert!(matches!(events.first(), Some(BattleEvent::BattleStarted { .. })));
    assert!(matches!(events.last(), Some(BattleEvent::BattleEnded { .. })));

    // Rounds start at 1 and go up by one.
    let rounds: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::RoundStarted { round } => Some(*round),
            _ => None,
        })
        .collect();
    assert_eq!(rounds, (1..=outcome.rounds).collect::<Vec<_>>());

    // Every full round reports status once, after both turns.
    let statuses = events.iter().filter(|e| matches!(e, BattleEvent::RoundStatus { .. })).count();
    assert_eq!(statuses as u32, outcome.rounds - 1);
}

#[test]
fn test_outcome_matches_final_hp() {
    for seed in 0..20 {
        let (a, b) = (unit_a(), unit_b());
        let book = AbilityBook::empty();
        let mut battle = Battle::new(&a, &b, &book, BattleConfig::new().with_seed(seed), NullObserver);
        let outcome = battle.run();

        let first_down = battle.state().get(Side::First).is_defeated();
        let second_down = battle.state().get(Side::Second).is_defeated();
        match outcome.result {
            BattleResult::Draw => assert!(first_down && second_down),
            BattleResult::Winner(side) => {
                assert!(!battle.state().get(side).is_defeated());
                assert!(battle.state().get(side.opponent()).is_defeated());
            }
        }
    }
}

#[test]
fn test_unkillable_pair_hits_round_cap() {
    let wall = UnitDefinition::new("Wall", BaseAttributes::new(1, 1, 80, 10, 10));
    let mut log = EventLog::new();
    let config = BattleConfig::new().with_seed(4).with_max_rounds(Some(50));

    let outcome = run_battle(&wall, &wall, &AbilityBook::empty(), config, &mut log);

    assert!(outcome.is_draw());
    assert!(outcome.capped);
    assert_eq!(outcome.rounds, 50);
    assert!(log.iter().any(|e| matches!(e, BattleEvent::RoundCapReached { .. })));
}

#[test]
fn test_absurd_unit_data_does_not_panic() {
    let giant = UnitDefinition::new("Giant", BaseAttributes::new(i64::MAX, i64::MAX, i64::MAX, i64::MAX, 10))
        .with_resistances(Resistances::new().with("fire", i64::MIN).with("generic", i64::MAX));
    let mage = UnitDefinition::new("Mage", BaseAttributes::new(10, 10, 10, 16, 14))
        .with_tag("can_cast")
        .with_tag("spell_firebolt");
    let spells = AbilityTable::new().with(AbilityDefinition::damage("firebolt", 10, 2, 4, 9).with_channel("fire"));
    let book = AbilityBook::new(spells, AbilityTable::new());
    let mut log = EventLog::new();

    let outcome = run_battle(&mage, &giant, &book, BattleConfig::new().with_seed(9).with_max_rounds(Some(20)), &mut log);

    // The giant always hits and its damage flattens the mage in one blow.
    assert_eq!(outcome.result, BattleResult::Winner(Side::Second));
    let dealt = log.iter().find_map(|e| match e {
        BattleEvent::AbilityDamage { rolled, dealt, .. } => Some((*rolled, *dealt)),
        _ => None,
    });
    // A negative percentage is clamped to 0, so the spell is not amplified.
    assert!(matches!(dealt, Some((rolled, dealt)) if rolled == dealt));
}

// =============================================================================
// Effects and Cooldowns
// =============================================================================

#[test]
fn test_buff_expires_after_its_duration() {
    let (w, a) = (warrior(), unit_a());
    let mut log = EventLog::new();
    run_battle(&w, &a, &skills(), BattleConfig::new().with_seed(3), &mut log);

    let mut round = 0;
    let mut applied = None;
    let mut expired = None;
    for event in log.iter() {
        match event {
            BattleEvent::RoundStarted { round: r } => round = *r,
            BattleEvent::EffectApplied { effect, .. } if applied.is_none() => {
                assert_eq!(effect.duration, 3);
                applied = Some(round);
            }
            BattleEvent::EffectExpired { .. } if expired.is_none() => expired = Some(round),
            _ => {}
        }
    }

    assert_eq!(applied, Some(1));
    // Ticked at the end of rounds 1, 2 and 3.
    assert_eq!(expired, Some(3));
}

#[test]
fn test_cooldowns_never_negative() {
    let (w, a) = (warrior(), unit_a());
    let mut log = EventLog::new();
    run_battle(&w, &a, &skills(), BattleConfig::new().with_seed(12), &mut log);

    for event in log.iter() {
        if let BattleEvent::CooldownsTicked { spell, skill, .. } = event {
            assert!(*spell >= 0 && *skill >= 0);
        }
    }
}

#[test]
fn test_resources_never_overdrawn() {
    let (w, a) = (warrior(), unit_a());
    let mut log = EventLog::new();
    run_battle(&w, &a, &skills(), BattleConfig::new().with_seed(31), &mut log);

    for event in log.iter() {
        if let BattleEvent::RoundStatus { status, .. } = event {
            for (_, s) in status.iter() {
                assert!(s.mana >= 0 && s.stamina >= 0);
                assert!(s.hp <= s.hp_total);
            }
        }
    }
}

#[test]
fn test_narration_lines_render() {
    let (w, a) = (warrior(), unit_a());
    let mut log = EventLog::new();
    run_battle(&w, &a, &skills(), BattleConfig::new().with_seed(5), &mut log);

    let lines = log.lines();
    assert!(lines.iter().any(|l| l == "== ROUND 1 =="));
    assert!(lines.iter().any(|l| l.contains("uses rage and gains +4 str for 3 rounds.")));
    assert!(lines.last().is_some_and(|l| l.starts_with("***")));
}
