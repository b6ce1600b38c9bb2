//! Round scheduling.
//!
//! A round walks every unit type in ascending priority. For each type that
//! either side still fields, the side with more first-fire credit fires all
//! of its blocks of that type first (the defender wins ties), then the other
//! side fires with whatever survived. Casualties carry over to later unit
//! types and later rounds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{Rules, UnitClass, UnitTypeInfo, AMPH_TRACKS, FLEET, PRECISION_OPTICS};

use super::dice::Dice;
use super::fire::fire;
use super::force::Force;

/// Identifies one of the two forces in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Returns the opposing side.
    pub const fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Conditions for one combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRound {
    /// The nominal attacker this round.
    pub attacker: Side,
    /// The attacker gets one extra first-fire credit (declaration of war).
    pub dow_first_fire: bool,
    /// The attacker's ground units are still landing.
    pub sea_invasion: bool,
}

impl CombatRound {
    /// A plain round with `attacker` as the nominal attacker.
    pub const fn new(attacker: Side) -> Self {
        CombatRound {
            attacker,
            dow_first_fire: false,
            sea_invasion: false,
        }
    }

    /// Flags the round as a sea invasion.
    pub const fn with_sea_invasion(mut self) -> Self {
        self.sea_invasion = true;
        self
    }

    /// Flags the round as carrying the declaration-of-war bonus.
    pub const fn with_dow(mut self) -> Self {
        self.dow_first_fire = true;
        self
    }

    /// `count` plain rounds; only the first carries the given flags.
    pub fn sequence(count: usize, first: CombatRound) -> Vec<CombatRound> {
        (0..count)
            .map(|i| if i == 0 { first } else { CombatRound::new(first.attacker) })
            .collect()
    }
}

fn has_optics(rules: &Rules, force: &Force) -> bool {
    rules
        .nation(&force.nation)
        .is_some_and(|n| n.has_special(PRECISION_OPTICS))
}

/// Returns the side that fires `unit` first this round.
pub fn first_to_fire(
    rules: &Rules,
    a: &Force,
    b: &Force,
    unit: &UnitTypeInfo,
    round: &CombatRound,
) -> Side {
    let mut a_credit = a.first_fire_credit(rules, &unit.name);
    let mut b_credit = b.first_fire_credit(rules, &unit.name);

    if a_credit == 0 && b_credit == 0 && unit.name == FLEET {
        a_credit += u32::from(has_optics(rules, a));
        b_credit += u32::from(has_optics(rules, b));
    }

    let (mut attacker_credit, defender_credit) = match round.attacker {
        Side::A => (a_credit, b_credit),
        Side::B => (b_credit, a_credit),
    };
    if round.dow_first_fire {
        attacker_credit += 1;
    }

    if attacker_credit > defender_credit {
        round.attacker
    } else {
        round.attacker.other()
    }
}

/// Returns true if `side`'s blocks of `unit` may not fire this round.
pub fn suppressed_by_sea_invasion(
    rules: &Rules,
    round: &CombatRound,
    side: Side,
    unit: &UnitTypeInfo,
    force: &Force,
) -> bool {
    round.sea_invasion
        && round.attacker == side
        && unit.class == UnitClass::Ground
        && !unit.ignore_sea_invasion
        && !force.has_tech(rules, AMPH_TRACKS)
}

fn fire_side(
    rules: &Rules,
    dice: &mut impl Dice,
    side: Side,
    unit: &UnitTypeInfo,
    a: &mut Force,
    b: &mut Force,
    round: &CombatRound,
) {
    let (firing, targets) = match side {
        Side::A => (&*a, &mut *b),
        Side::B => (&*b, &mut *a),
    };
    if suppressed_by_sea_invasion(rules, round, side, unit, firing) {
        debug!(unit = %unit.name, force = %firing.name, "landing units hold fire");
        return;
    }
    for block in firing.blocks.iter().filter(|blk| blk.unit == unit.name) {
        fire(
            rules,
            dice,
            block,
            &mut targets.blocks,
            &firing.attack_order,
            &firing.technologies,
        );
    }
}

/// Resolves one round between `a` and `b`.
pub fn resolve_round(
    rules: &Rules,
    dice: &mut impl Dice,
    a: &mut Force,
    b: &mut Force,
    round: &CombatRound,
) {
    for unit in rules.units_by_priority() {
        if !a.has_unit(&unit.name) && !b.has_unit(&unit.name) {
            continue;
        }
        let first = first_to_fire(rules, a, b, unit, round);
        debug!(unit = %unit.name, first = ?first, "unit type fires");
        fire_side(rules, dice, first, unit, a, b, round);
        fire_side(rules, dice, first.other(), unit, a, b, round);
    }
}

/// Resolves every round in order, stopping once either side is wiped out.
pub fn resolve_battle(
    rules: &Rules,
    dice: &mut impl Dice,
    a: &mut Force,
    b: &mut Force,
    rounds: &[CombatRound],
) {
    for round in rounds {
        if a.is_eliminated() || b.is_eliminated() {
            break;
        }
        resolve_round(rules, dice, a, b, round);
    }
}
