//! Casualty application.

use crate::rules::{Rules, UnitClass};

use super::force::Block;

fn class_of(rules: &Rules, block: &Block) -> Option<UnitClass> {
    rules.unit(&block.unit).map(|u| u.class)
}

/// Applies `hits` to the blocks of `class` in `targets`.
///
/// Each pass finds the highest current strength among blocks of `class` and
/// gives one hit to every block at that strength, in list order, before
/// looking again. A takes-double unit loses 2 strength per hit. Blocks that
/// reach 0 are removed at once. Hits left over when no block of `class`
/// remains are discarded.
pub fn apply_hits(rules: &Rules, targets: &mut Vec<Block>, hits: u32, class: UnitClass) {
    let mut remaining = hits;
    while remaining > 0 {
        let highest = targets
            .iter()
            .filter(|b| class_of(rules, b) == Some(class))
            .map(|b| b.strength)
            .max();
        let Some(highest) = highest else {
            break;
        };

        let mut i = 0;
        while i < targets.len() && remaining > 0 {
            let block = &mut targets[i];
            if block.strength != highest || class_of(rules, block) != Some(class) {
                i += 1;
                continue;
            }
            let loss = match rules.unit(&block.unit) {
                Some(u) if u.takes_double => 2,
                _ => 1,
            };
            block.strength = block.strength.saturating_sub(loss);
            remaining -= 1;
            if block.strength == 0 {
                targets.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
