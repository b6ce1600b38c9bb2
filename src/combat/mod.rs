//! Combat simulation engine.
//!
//! Contains the dice kernel, casualty application, per-block fire
//! resolution, the round scheduler, and the multi-trial simulation driver.

pub mod casualties;
pub mod dice;
pub mod fire;
pub mod force;
pub mod outcome;
pub mod round;
pub mod simulate;

pub use casualties::apply_hits;
pub use dice::{attack, roll_die, Dice, LoadedDice, DIE_FACES};
pub use fire::fire;
pub use force::{force, Block, Force, TargetOrder};
pub use outcome::{BattleOutcome, OutcomeSummary, SideSummary};
pub use round::{first_to_fire, resolve_battle, resolve_round, CombatRound, Side};
pub use simulate::{run_trial, simulate, simulate_with, SimulationConfig, TrialResults};
