//! Fire resolution for a single block.
//!
//! A firing block builds its to-hit table (base values overridden by
//! technology modifiers), expands its side's attack order, picks the first
//! class it can both damage and find among the targets, rolls its dice and
//! applies the hits.

use tracing::trace;

use crate::rules::{ClassValues, Rules, Technology, UnitClass, UnitTypeInfo};

use super::casualties::apply_hits;
use super::dice::{attack, Dice};
use super::force::{Block, TargetOrder};

/// Technologies in effect for a block: its nation's specials, then the force's.
pub fn applicable_techs<'a>(
    rules: &'a Rules,
    nation: &str,
    technologies: &[String],
) -> Vec<&'a Technology> {
    let specials = rules
        .nation(nation)
        .map(|n| n.special_techs.as_slice())
        .unwrap_or_default();
    specials
        .iter()
        .chain(technologies.iter())
        .filter_map(|name| rules.tech(name))
        .collect()
}

/// The unit's to-hit values after technology overrides.
pub fn to_hit_table(unit: &UnitTypeInfo, techs: &[&Technology]) -> ClassValues {
    let mut table = unit.attack;
    for tech in techs {
        for (class, to_hit) in tech.attack_modifiers(&unit.name) {
            table.set(class, to_hit);
        }
    }
    table
}

/// Expands `Max` into the unit's preferred order and drops classes it cannot damage.
pub fn expand_order(
    unit: &UnitTypeInfo,
    to_hit: &ClassValues,
    order: &[TargetOrder],
) -> Vec<UnitClass> {
    let mut expanded = Vec::with_capacity(order.len() + unit.preferred_order.len());
    for entry in order {
        match entry {
            TargetOrder::Class(class) => expanded.push(*class),
            TargetOrder::Max => expanded.extend(unit.preferred_order.iter().copied()),
        }
    }
    expanded.retain(|c| to_hit.get(*c) > 0);
    expanded
}

/// First class in `order` that has at least one block among `targets`.
pub fn select_target_class(
    rules: &Rules,
    order: &[UnitClass],
    targets: &[Block],
) -> Option<UnitClass> {
    order.iter().copied().find(|class| {
        targets
            .iter()
            .any(|b| rules.unit(&b.unit).is_some_and(|u| u.class == *class))
    })
}

/// Dice multiplier for `unit` firing at `class`: the first technology that
/// defines one wins, and only if it is greater than 1.
pub fn attack_multiplier(unit: &UnitTypeInfo, class: UnitClass, techs: &[&Technology]) -> u32 {
    techs
        .iter()
        .find_map(|t| t.attack_multiplier(&unit.name, class))
        .filter(|&factor| factor > 1)
        .unwrap_or(1)
}

/// Dice rolled by a block of `strength` under `multiplier`, saturating at `u32::MAX`.
pub fn dice_count(strength: u32, multiplier: u32) -> u32 {
    strength.saturating_mul(multiplier)
}

/// Resolves one block's fire against `targets`, mutating them in place.
pub fn fire(
    rules: &Rules,
    dice: &mut impl Dice,
    block: &Block,
    targets: &mut Vec<Block>,
    attack_order: &[TargetOrder],
    technologies: &[String],
) {
    let Some(unit) = rules.unit(&block.unit) else {
        trace!(unit = %block.unit, "unknown unit type does not fire");
        return;
    };

    let techs = applicable_techs(rules, &block.nation, technologies);
    let to_hit = to_hit_table(unit, &techs);
    let order = expand_order(unit, &to_hit, attack_order);

    let Some(class) = select_target_class(rules, &order, targets) else {
        trace!(unit = %unit.name, "no valid target");
        return;
    };

    let multiplier = attack_multiplier(unit, class, &techs);
    let hits = attack(dice, dice_count(block.strength, multiplier), to_hit.get(class));
    trace!(
        unit = %unit.name,
        strength = block.strength,
        multiplier,
        class = ?class,
        hits,
        "fire"
    );
    apply_hits(rules, targets, hits, class);
}
