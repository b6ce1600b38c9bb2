//! One-shot battle simulation CLI.
//!
//! Simulates a single battle setup many times and prints the outcome
//! distribution, either as a short text report or as JSON.
//!
//! Usage:
//!   cargo run --release --bin battle -- --attacker 'WeTa3' --defender 'AxIn4|AxIn4'

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use blocksim::combat::{
    simulate, BattleOutcome, CombatRound, OutcomeSummary, Side, SimulationConfig,
};
use blocksim::protocol::decode_force;
use blocksim::rules::Rules;

/// Simulate a block-wargame battle and report outcome odds.
#[derive(Parser, Debug)]
#[command(name = "battle")]
struct Args {
    /// Attacking blocks, e.g. `WeTa3|WeIn4`
    #[arg(long)]
    attacker: String,

    /// Defending blocks, e.g. `AxIn4|AxFo3`
    #[arg(long)]
    defender: String,

    /// Attacker technology codes, e.g. `HT|JE`
    #[arg(long, default_value = "")]
    attacker_techs: String,

    /// Defender technology codes
    #[arg(long, default_value = "")]
    defender_techs: String,

    /// Attacker target classes in preference order, or MAX
    #[arg(long, default_value = "")]
    attacker_order: String,

    /// Defender target classes in preference order, or MAX
    #[arg(long, default_value = "")]
    defender_order: String,

    /// Combat rounds per battle
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// The attacker is landing from the sea in the first round
    #[arg(long)]
    sea_invasion: bool,

    /// The attacker declared war this turn and fires first in the first round
    #[arg(long)]
    dow: bool,

    /// Number of trials
    #[arg(long, default_value_t = SimulationConfig::default().trials)]
    trials: usize,

    /// Worker threads
    #[arg(long, default_value_t = SimulationConfig::default().threads)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn print_report(summary: &OutcomeSummary, elapsed_ms: u128) {
    println!("{} trials in {}ms", summary.trials, elapsed_ms);
    for (label, outcome) in [
        ("attacker wins", BattleOutcome::AttackerWins),
        ("defender wins", BattleOutcome::DefenderWins),
        ("both destroyed", BattleOutcome::Mutual),
        ("undecided", BattleOutcome::Undecided),
    ] {
        println!("  {:<15} {:>6.1}%", label, 100.0 * summary.probability(outcome));
    }
    for side in [&summary.attacker, &summary.defender] {
        println!(
            "  {} keeps {:.2} of {} strength on average",
            side.name, side.mean_strength, side.initial_strength
        );
        for (unit, mean) in &side.mean_unit_strength {
            println!("    {:<10} {:.2}", unit, mean);
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let rules = match Rules::standard() {
        Ok(rules) => rules,
        Err(e) => {
            error!(error = %e, "failed to load bundled rules");
            return ExitCode::FAILURE;
        }
    };

    let Some(attacker) = decode_force(
        &rules,
        "attacker",
        &args.attacker,
        &args.attacker_techs,
        &args.attacker_order,
    ) else {
        error!(blocks = %args.attacker, "attacker has no valid blocks");
        return ExitCode::FAILURE;
    };
    let Some(defender) = decode_force(
        &rules,
        "defender",
        &args.defender,
        &args.defender_techs,
        &args.defender_order,
    ) else {
        error!(blocks = %args.defender, "defender has no valid blocks");
        return ExitCode::FAILURE;
    };

    let mut first = CombatRound::new(Side::A);
    if args.sea_invasion {
        first = first.with_sea_invasion();
    }
    if args.dow {
        first = first.with_dow();
    }
    let rounds = CombatRound::sequence(args.rounds, first);

    let config = SimulationConfig {
        trials: args.trials,
        threads: args.threads.max(1),
        seed: args.seed,
    };

    let start = Instant::now();
    let results = simulate(&rules, &attacker, &defender, &rounds, &config);
    let summary = OutcomeSummary::from_trials(&attacker, &defender, &results);
    let elapsed_ms = start.elapsed().as_millis();

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!(error = %e, "failed to serialize summary");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&summary, elapsed_ms);
    }
    ExitCode::SUCCESS
}
