//! Action policy integration tests.

use rust_duel::abilities::{AbilityBook, AbilityDefinition, AbilityTable};
use rust_duel::combat::{
    run_battle, Action, ActionPolicy, Battle, CooldownCategory, CooldownTracker, PolicyContext,
    PriorityPolicy, WeightedRandomPolicy,
};
use rust_duel::core::{BattleConfig, CombatRng, PolicyKind, DEFAULT_CAST_TAG};
use rust_duel::events::{BattleEvent, EventLog};
use rust_duel::stats::compute;
use rust_duel::units::{BaseAttributes, UnitDefinition};
use rust_duel::EffectLedger;

fn book() -> AbilityBook {
    let spells = AbilityTable::new()
        .with(AbilityDefinition::damage("firebolt", 10, 2, 4, 9).with_channel("fire"))
        .with(AbilityDefinition::damage("spark", 1, 0, 1, 2).with_channel("lightning"));
    let skills = AbilityTable::new().with(AbilityDefinition::damage("jab", 5, 1, 2, 4));
    AbilityBook::new(spells, skills)
}

fn caster(int: i64, wis: i64) -> UnitDefinition {
    UnitDefinition::new("Caster", BaseAttributes::new(10, 10, 12, int, wis))
        .with_tag(DEFAULT_CAST_TAG)
        .with_tag("spell_firebolt")
        .with_tag("spell_spark")
        .with_tag("skill_jab")
}

fn dummy() -> UnitDefinition {
    UnitDefinition::new("Dummy", BaseAttributes::new(8, 8, 20, 8, 8))
}

// =============================================================================
// Priority Policy
// =============================================================================

#[test]
fn test_zero_mana_caster_never_casts() {
    let book = book();
    let unit = caster(14, 12);
    let mut stats = compute(&unit, &EffectLedger::new(), None);
    stats.mana.current = 0;
    let cooldowns = CooldownTracker::new();
    let ctx = PolicyContext {
        unit: &unit,
        stats: &stats,
        cooldowns: &cooldowns,
        abilities: &book,
        cast_tag: DEFAULT_CAST_TAG,
    };

    let mut rng = CombatRng::new(0);
    assert_eq!(PriorityPolicy.choose(&ctx, &mut rng), Action::Skill("jab".into()));
    for _ in 0..100 {
        assert!(!matches!(WeightedRandomPolicy.choose(&ctx, &mut rng), Action::Cast(_)));
    }
}

#[test]
fn test_manaless_caster_never_casts_in_battle() {
    // int + wis = 0 means no mana pool and no regen
    let (unit, target) = (caster(0, 0), dummy());
    let mut log = EventLog::new();
    run_battle(&unit, &target, &book(), BattleConfig::new().with_seed(6).with_max_rounds(Some(30)), &mut log);

    assert!(log.iter().any(|e| matches!(e, BattleEvent::ActionSelected { .. })));
    assert!(!log
        .iter()
        .any(|e| matches!(e, BattleEvent::ActionSelected { action: Action::Cast(_), .. })));
}

#[test]
fn test_cast_tag_is_configurable() {
    let book = book();
    let unit = UnitDefinition::new("Druid", BaseAttributes::default())
        .with_tag("nature_magic")
        .with_tag("spell_spark");
    let stats = compute(&unit, &EffectLedger::new(), None);
    let cooldowns = CooldownTracker::new();
    let mut ctx = PolicyContext {
        unit: &unit,
        stats: &stats,
        cooldowns: &cooldowns,
        abilities: &book,
        cast_tag: DEFAULT_CAST_TAG,
    };

    assert_eq!(PriorityPolicy.choose(&ctx, &mut CombatRng::new(0)), Action::Attack);
    ctx.cast_tag = "nature_magic";
    assert_eq!(PriorityPolicy.choose(&ctx, &mut CombatRng::new(0)), Action::Cast("spark".into()));
}

#[test]
fn test_spell_cooldown_alternates_with_skill() {
    let (unit, target) = (caster(14, 12), dummy());
    let mut log = EventLog::new();
    run_battle(&unit, &target, &book(), BattleConfig::new().with_seed(1).with_max_rounds(Some(4)), &mut log);

    let picks: Vec<Action> = log
        .iter()
        .filter_map(|e| match e {
            BattleEvent::ActionSelected { actor, action, .. } if actor == "Caster" => Some(action.clone()),
            _ => None,
        })
        .collect();

    // firebolt locks spells for 2 rounds: cast, skill, cast, skill
    assert_eq!(picks[0], Action::Cast("firebolt".into()));
    assert_eq!(picks[1], Action::Skill("jab".into()));
    assert_eq!(picks[2], Action::Cast("firebolt".into()));
}

#[test]
fn test_cooldown_ready_check_reads_tracker() {
    let mut cooldowns = CooldownTracker::new();
    cooldowns.set(CooldownCategory::Spell, 1);
    assert!(!cooldowns.is_ready(CooldownCategory::Spell));
    cooldowns.tick();
    assert!(cooldowns.is_ready(CooldownCategory::Spell));
}

// =============================================================================
// Pluggable Policies
// =============================================================================

struct AlwaysAttack;

impl ActionPolicy for AlwaysAttack {
    fn choose(&self, _ctx: &PolicyContext<'_>, _rng: &mut CombatRng) -> Action {
        Action::Attack
    }
}

#[test]
fn test_custom_policy_plugs_into_battle() {
    let (unit, target) = (caster(14, 12), dummy());
    let book = book();
    let config = BattleConfig::new().with_seed(2).with_max_rounds(Some(10));

    let mut battle = Battle::new(&unit, &target, &book, config, EventLog::new()).with_policy(Box::new(AlwaysAttack));
    battle.run();

    let log = battle.into_observer();
    assert!(log
        .iter()
        .filter_map(|e| match e {
            BattleEvent::ActionSelected { action, .. } => Some(action),
            _ => None,
        })
        .all(|a| *a == Action::Attack));
}

#[test]
fn test_weighted_policy_battle_stays_affordable() {
    let (unit, target) = (caster(14, 12), dummy());
    let config = BattleConfig::new()
        .with_seed(19)
        .with_policy(PolicyKind::WeightedRandom)
        .with_max_rounds(Some(40));
    let mut log = EventLog::new();

    run_battle(&unit, &target, &book(), config, &mut log);

    for event in log.iter() {
        if let BattleEvent::RoundStatus { status, .. } = event {
            for (_, s) in status.iter() {
                assert!(s.mana >= 0 && s.stamina >= 0);
            }
        }
    }
}
