//! Battle throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rust_duel::abilities::{AbilityBook, AbilityDefinition, AbilityTable, EffectKind};
use rust_duel::combat::run_battle;
use rust_duel::core::BattleConfig;
use rust_duel::effects::{ActiveEffect, EffectLedger, StatTarget};
use rust_duel::events::NullObserver;
use rust_duel::stats::compute;
use rust_duel::units::{BaseAttributes, Resistances, UnitDefinition};

fn book() -> AbilityBook {
    let spells = AbilityTable::new()
        .with(AbilityDefinition::damage("firebolt", 10, 2, 4, 9).with_channel("fire"))
        .with(AbilityDefinition::stat_effect("stoneskin", EffectKind::Buff, 12, 4, StatTarget::Ac, 3, 3));
    let skills = AbilityTable::new()
        .with(AbilityDefinition::stat_effect("rage", EffectKind::Buff, 20, 4, StatTarget::Str, 4, 3))
        .with(AbilityDefinition::damage("power_strike", 15, 2, 6, 12));
    AbilityBook::new(spells, skills)
}

fn bench_full_battle(c: &mut Criterion) {
    let mage = UnitDefinition::new("Battlemage", BaseAttributes::new(12, 12, 12, 16, 12))
        .with_tag("can_cast")
        .with_tag("spell_firebolt")
        .with_tag("spell_stoneskin");
    let warrior = UnitDefinition::new("Warrior", BaseAttributes::new(17, 12, 16, 8, 9))
        .with_tag("skill_rage")
        .with_tag("skill_power_strike")
        .with_resistances(Resistances::new().with("fire", 25));
    let book = book();

    let mut seed = 0u64;
    c.bench_function("full_battle", |b| {
        b.iter(|| {
            seed += 1;
            let config = BattleConfig::new().with_seed(seed);
            black_box(run_battle(&mage, &warrior, &book, config, NullObserver))
        })
    });
}

fn bench_compute(c: &mut Criterion) {
    let unit = UnitDefinition::new("Knight", BaseAttributes::new(16, 14, 14, 10, 10));
    let effects: EffectLedger = [
        ActiveEffect::new(StatTarget::Str, 4, 3),
        ActiveEffect::new(StatTarget::Ac, 2, 2),
        ActiveEffect::new(StatTarget::Dex, -2, 1),
    ]
    .into_iter()
    .collect();
    let previous = compute(&unit, &EffectLedger::new(), None);

    c.bench_function("compute_stats", |b| {
        b.iter(|| black_box(compute(black_box(&unit), black_box(&effects), Some(&previous))))
    });
}

criterion_group!(benches, bench_full_battle, bench_compute);
criterion_main!(benches);
