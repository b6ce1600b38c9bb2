//! The simulation driver: many independent trials of one battle.
//!
//! Every trial works on its own clones of both forces, so no block state is
//! shared between trials. With more than one thread the trials run on a
//! rayon pool; with a fixed seed each trial's dice are derived from the seed
//! and the trial index, which keeps results identical for any thread count.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::rules::Rules;

use super::dice::Dice;
use super::force::Force;
use super::round::{resolve_battle, CombatRound};

/// Configuration for a batch of trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of independent trials.
    pub trials: usize,
    /// Worker threads; 1 runs sequentially on the caller's thread.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: 1000,
            threads: 4,
            seed: 0,
        }
    }
}

/// Terminal force states, one pair per trial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialResults {
    pub attacker: Vec<Force>,
    pub defender: Vec<Force>,
}

impl TrialResults {
    /// Number of trials recorded.
    pub fn len(&self) -> usize {
        self.attacker.len()
    }

    /// Returns true if no trials were run.
    pub fn is_empty(&self) -> bool {
        self.attacker.is_empty()
    }

    /// Iterates over (attacker, defender) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Force, &Force)> {
        self.attacker.iter().zip(self.defender.iter())
    }
}

impl FromIterator<(Force, Force)> for TrialResults {
    fn from_iter<I: IntoIterator<Item = (Force, Force)>>(iter: I) -> Self {
        let (attacker, defender) = iter.into_iter().unzip();
        TrialResults { attacker, defender }
    }
}

/// Runs one full battle on fresh copies of both forces.
pub fn run_trial(
    rules: &Rules,
    dice: &mut impl Dice,
    attacker: &Force,
    defender: &Force,
    rounds: &[CombatRound],
) -> (Force, Force) {
    let mut a = attacker.clone();
    let mut b = defender.clone();
    resolve_battle(rules, dice, &mut a, &mut b, rounds);
    (a, b)
}

/// Runs `trials` battles sequentially with the given dice.
pub fn simulate_with(
    rules: &Rules,
    dice: &mut impl Dice,
    attacker: &Force,
    defender: &Force,
    rounds: &[CombatRound],
    trials: usize,
) -> TrialResults {
    (0..trials)
        .map(|_| run_trial(rules, dice, attacker, defender, rounds))
        .collect()
}

fn trial_rng(seed: u64, trial: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(trial as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn simulate_sequential(
    rules: &Rules,
    attacker: &Force,
    defender: &Force,
    rounds: &[CombatRound],
    config: &SimulationConfig,
) -> TrialResults {
    (0..config.trials)
        .map(|i| {
            let mut rng = trial_rng(config.seed, i);
            run_trial(rules, &mut rng, attacker, defender, rounds)
        })
        .collect()
}

fn simulate_parallel(
    rules: &Rules,
    attacker: &Force,
    defender: &Force,
    rounds: &[CombatRound],
    config: &SimulationConfig,
) -> TrialResults {
    use rayon::prelude::*;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "failed to build thread pool, running sequentially");
            return simulate_sequential(rules, attacker, defender, rounds, config);
        }
    };

    let pairs: Vec<(Force, Force)> = pool.install(|| {
        (0..config.trials)
            .into_par_iter()
            .map(|i| {
                let mut rng = trial_rng(config.seed, i);
                run_trial(rules, &mut rng, attacker, defender, rounds)
            })
            .collect()
    });
    pairs.into_iter().collect()
}

/// Runs `config.trials` independent battles and returns every terminal state.
pub fn simulate(
    rules: &Rules,
    attacker: &Force,
    defender: &Force,
    rounds: &[CombatRound],
    config: &SimulationConfig,
) -> TrialResults {
    let start = Instant::now();
    let results = if config.threads > 1 {
        simulate_parallel(rules, attacker, defender, rounds, config)
    } else {
        simulate_sequential(rules, attacker, defender, rounds, config)
    };
    info!(
        trials = config.trials,
        threads = config.threads,
        rounds = rounds.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "simulation finished"
    );
    results
}
