//! duel - run a battle between two units from the command line

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_duel::{
    run_battle, simulate_series, AbilityBook, BattleConfig, PolicyKind, Side, TextNarrator, UnitRoster,
    Verbosity,
};

/// Pause between rounds in slow mode.
const SLOW_ROUND_DELAY_MS: u64 = 4000;

/// Pit two units against each other
#[derive(Parser, Debug)]
#[command(name = "duel", version)]
struct Args {
    /// First unit (file stem or unit name)
    unit1: Option<String>,

    /// Second unit (file stem or unit name)
    unit2: Option<String>,

    /// Directory of unit JSON files
    #[arg(long, default_value = "data/units")]
    units_dir: PathBuf,

    /// Spell table
    #[arg(long, default_value = "data/spells.json")]
    spells: PathBuf,

    /// Skill table
    #[arg(long, default_value = "data/skills.json")]
    skills: PathBuf,

    /// List available units and exit
    #[arg(long)]
    list: bool,

    /// Pause between rounds
    #[arg(long)]
    slow: bool,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Action policy: priority or weighted
    #[arg(long, default_value = "priority")]
    policy: PolicyKind,

    /// Run this many silent battles and print a summary
    #[arg(long)]
    trials: Option<u32>,

    /// More narration (-v adds diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print the result
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Narration goes to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_duel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let roster = UnitRoster::from_dir(&args.units_dir)
        .with_context(|| format!("failed to load units from {}", args.units_dir.display()))?;

    if args.list {
        println!("--- Available Units ---");
        for (key, unit) in roster.iter() {
            println!("- {key} ({}, {})", unit.name, unit.unit_type);
        }
        return Ok(());
    }

    let (Some(name1), Some(name2)) = (args.unit1.as_deref(), args.unit2.as_deref()) else {
        bail!("two units are required (use --list to see them)");
    };
    let unit1 = roster.require(name1)?;
    let unit2 = roster.require(name2)?;
    let book = AbilityBook::load(&args.spells, &args.skills).context("failed to load ability tables")?;

    let mut config = BattleConfig::new().with_policy(args.policy);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    if let Some(trials) = args.trials {
        let summary = simulate_series(unit1, unit2, &book, &config, trials);
        println!("--- {} vs {} over {} battles ---", unit1.name, unit2.name, summary.trials);
        for side in Side::BOTH {
            let name = if side == Side::First { &unit1.name } else { &unit2.name };
            println!("{name}: {} wins ({:.1}%)", summary.wins[side], summary.win_rate(side) * 100.0);
        }
        println!("Draws: {} ({:.1}%)", summary.draws, summary.draw_rate() * 100.0);
        println!("Average length: {:.1} rounds", summary.mean_rounds());
        if summary.capped > 0 {
            println!("Round cap reached: {}", summary.capped);
        }
        return Ok(());
    }

    if args.slow {
        config = config.with_round_delay_ms(SLOW_ROUND_DELAY_MS);
    }
    let narrator = TextNarrator::new(io::stdout().lock(), Verbosity::from_flags(args.verbose, args.quiet));
    run_battle(unit1, unit2, &book, config, narrator);

    Ok(())
}
