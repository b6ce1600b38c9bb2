//! Aggregation of trial results into outcome distributions.

use std::collections::BTreeMap;

use serde::Serialize;

use super::force::Force;
use super::simulate::TrialResults;

/// How a single trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    /// Only the attacker has blocks left.
    AttackerWins,
    /// Only the defender has blocks left.
    DefenderWins,
    /// Both sides were wiped out.
    Mutual,
    /// Both sides still stand after the last round.
    Undecided,
}

impl BattleOutcome {
    /// Classifies the terminal state of one trial.
    pub fn of(attacker: &Force, defender: &Force) -> BattleOutcome {
        match (attacker.is_eliminated(), defender.is_eliminated()) {
            (false, true) => BattleOutcome::AttackerWins,
            (true, false) => BattleOutcome::DefenderWins,
            (true, true) => BattleOutcome::Mutual,
            (false, false) => BattleOutcome::Undecided,
        }
    }
}

/// Survivor statistics for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideSummary {
    pub name: String,
    pub initial_strength: u32,
    pub mean_strength: f64,
    /// Surviving total strength -> number of trials.
    pub strength_histogram: BTreeMap<u32, usize>,
    /// Mean surviving strength per unit type, for every type the side fielded.
    pub mean_unit_strength: BTreeMap<String, f64>,
}

impl SideSummary {
    fn build<'a>(
        initial: &Force,
        finals: impl Iterator<Item = &'a Force>,
        trials: usize,
    ) -> SideSummary {
        let mut summary = SideSummary {
            name: initial.name.clone(),
            initial_strength: initial.total_strength(),
            ..SideSummary::default()
        };
        let mut unit_totals: BTreeMap<String, u64> = initial
            .blocks
            .iter()
            .map(|b| (b.unit.clone(), 0))
            .collect();
        let mut total: u64 = 0;

        for force in finals {
            let strength = force.total_strength();
            total += u64::from(strength);
            *summary.strength_histogram.entry(strength).or_insert(0) += 1;
            for block in &force.blocks {
                *unit_totals.entry(block.unit.clone()).or_insert(0) += u64::from(block.strength);
            }
        }

        if trials > 0 {
            let n = trials as f64;
            summary.mean_strength = total as f64 / n;
            summary.mean_unit_strength = unit_totals
                .into_iter()
                .map(|(unit, sum)| (unit, sum as f64 / n))
                .collect();
        }
        summary
    }
}

/// Outcome distribution over a batch of trials.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub trials: usize,
    pub attacker_wins: usize,
    pub defender_wins: usize,
    pub mutual: usize,
    pub undecided: usize,
    pub attacker: SideSummary,
    pub defender: SideSummary,
}

impl OutcomeSummary {
    /// Summarizes `results`, using the starting forces to name the sides and
    /// to list unit types that may have been wiped out in every trial.
    pub fn from_trials(
        attacker: &Force,
        defender: &Force,
        results: &TrialResults,
    ) -> OutcomeSummary {
        let trials = results.len();
        let mut summary = OutcomeSummary {
            trials,
            attacker: SideSummary::build(attacker, results.attacker.iter(), trials),
            defender: SideSummary::build(defender, results.defender.iter(), trials),
            ..OutcomeSummary::default()
        };
        for (a, b) in results.iter() {
            match BattleOutcome::of(a, b) {
                BattleOutcome::AttackerWins => summary.attacker_wins += 1,
                BattleOutcome::DefenderWins => summary.defender_wins += 1,
                BattleOutcome::Mutual => summary.mutual += 1,
                BattleOutcome::Undecided => summary.undecided += 1,
            }
        }
        summary
    }

    /// Number of trials that ended with `outcome`.
    pub fn count(&self, outcome: BattleOutcome) -> usize {
        match outcome {
            BattleOutcome::AttackerWins => self.attacker_wins,
            BattleOutcome::DefenderWins => self.defender_wins,
            BattleOutcome::Mutual => self.mutual,
            BattleOutcome::Undecided => self.undecided,
        }
    }

    /// Fraction of trials that ended with `outcome` (0 for an empty batch).
    pub fn probability(&self, outcome: BattleOutcome) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.trials as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::force::{force, Block};

    fn side(name: &str, blocks: Vec<Block>) -> Force {
        Force::new(name, "Axis").with_blocks(blocks)
    }

    #[test]
    fn classifies_terminal_states() {
        let alive = side("A", force("Infantry", "Axis", 2, 1));
        let dead = side("B", Vec::new());
        assert_eq!(BattleOutcome::of(&alive, &dead), BattleOutcome::AttackerWins);
        assert_eq!(BattleOutcome::of(&dead, &alive), BattleOutcome::DefenderWins);
        assert_eq!(BattleOutcome::of(&dead, &dead), BattleOutcome::Mutual);
        assert_eq!(BattleOutcome::of(&alive, &alive), BattleOutcome::Undecided);
    }

    #[test]
    fn summary_counts_and_means() {
        let a0 = side("A", vec![Block::new("Tank", 3, "Axis"), Block::new("Infantry", 2, "Axis")]);
        let b0 = side("B", force("Infantry", "Axis", 4, 1));
        let results = TrialResults {
            attacker: vec![
                side("A", vec![Block::new("Infantry", 2, "Axis")]),
                side("A", Vec::new()),
            ],
            defender: vec![side("B", Vec::new()), side("B", force("Infantry", "Axis", 1, 1))],
        };
        let summary = OutcomeSummary::from_trials(&a0, &b0, &results);
        assert_eq!(summary.trials, 2);
        assert_eq!(summary.attacker_wins, 1);
        assert_eq!(summary.defender_wins, 1);
        assert_eq!(summary.probability(BattleOutcome::AttackerWins), 0.5);
        assert_eq!(summary.attacker.initial_strength, 5);
        assert_eq!(summary.attacker.mean_strength, 1.0);
        assert_eq!(summary.attacker.mean_unit_strength["Tank"], 0.0);
        assert_eq!(summary.attacker.mean_unit_strength["Infantry"], 1.0);
        assert_eq!(summary.defender.strength_histogram[&0], 1);
        assert_eq!(summary.defender.strength_histogram[&1], 1);
    }

    #[test]
    fn empty_batch_has_zero_probabilities() {
        let a = side("A", Vec::new());
        let summary = OutcomeSummary::from_trials(&a, &a, &TrialResults::default());
        assert_eq!(summary.probability(BattleOutcome::Undecided), 0.0);
        assert!(summary.attacker.mean_unit_strength.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let a = side("A", force("Tank", "Axis", 3, 1));
        let results = TrialResults {
            attacker: vec![a.clone()],
            defender: vec![side("B", Vec::new())],
        };
        let json = serde_json::to_value(OutcomeSummary::from_trials(&a, &a, &results)).unwrap();
        assert_eq!(json["attacker_wins"], 1);
        assert_eq!(json["attacker"]["strength_histogram"]["3"], 1);
    }
}
