//! Blocks and forces: the mutable combat state of one side.

use serde::{Deserialize, Serialize};

use crate::rules::{Rules, UnitClass};

/// A single unit instance with its current strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub unit: String,
    pub strength: u32,
    pub nation: String,
}

impl Block {
    /// Creates a block.
    pub fn new(unit: &str, strength: u32, nation: &str) -> Self {
        Block {
            unit: unit.to_string(),
            strength,
            nation: nation.to_string(),
        }
    }
}

/// Builds `count` identical blocks.
pub fn force(unit: &str, nation: &str, strength: u32, count: usize) -> Vec<Block> {
    (0..count).map(|_| Block::new(unit, strength, nation)).collect()
}

/// One entry of a force's attack-order preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetOrder {
    /// Fire at this class when present.
    Class(UnitClass),
    /// Fire at whatever class the firing unit is best against.
    Max,
}

impl TargetOrder {
    /// Parses a compact order like `MAX`, `G`, or `NSG` into entries.
    /// Unknown characters are skipped.
    pub fn parse_list(s: &str) -> Vec<TargetOrder> {
        if s.eq_ignore_ascii_case("max") {
            return vec![TargetOrder::Max];
        }
        s.split(',')
            .flat_map(|part| {
                if part.eq_ignore_ascii_case("max") {
                    vec![TargetOrder::Max]
                } else {
                    part.chars()
                        .filter_map(UnitClass::from_code)
                        .map(TargetOrder::Class)
                        .collect()
                }
            })
            .collect()
    }
}

/// One side of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Force {
    pub name: String,
    pub nation: String,
    pub blocks: Vec<Block>,
    pub attack_order: Vec<TargetOrder>,
    /// Preferred casualty order. Kept for configuration parity; casualties
    /// always go to the strongest block of the targeted class.
    pub reduce_order: Option<Vec<UnitClass>>,
    /// Names of active technologies.
    pub technologies: Vec<String>,
}

impl Force {
    /// Creates an empty force that fires at its best class.
    pub fn new(name: &str, nation: &str) -> Self {
        Force {
            name: name.to_string(),
            nation: nation.to_string(),
            blocks: Vec::new(),
            attack_order: vec![TargetOrder::Max],
            reduce_order: None,
            technologies: Vec::new(),
        }
    }

    /// Adds blocks.
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    /// Replaces the attack order.
    pub fn with_attack_order(mut self, order: Vec<TargetOrder>) -> Self {
        self.attack_order = order;
        self
    }

    /// Adds an active technology.
    pub fn with_tech(mut self, tech: &str) -> Self {
        self.technologies.push(tech.to_string());
        self
    }

    /// Returns true if any block of `unit` remains.
    pub fn has_unit(&self, unit: &str) -> bool {
        self.blocks.iter().any(|b| b.unit == unit)
    }

    /// Returns true if the force has no blocks left.
    pub fn is_eliminated(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of all block strengths.
    pub fn total_strength(&self) -> u32 {
        self.blocks.iter().map(|b| b.strength).sum()
    }

    /// Sum of block strengths of `unit`.
    pub fn strength_of(&self, unit: &str) -> u32 {
        self.blocks.iter().filter(|b| b.unit == unit).map(|b| b.strength).sum()
    }

    /// Returns true if `tech` is active for the force or a special of its nation.
    pub fn has_tech(&self, rules: &Rules, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
            || rules.nation(&self.nation).is_some_and(|n| n.has_special(tech))
    }

    /// Active technologies that grant first fire to `unit`.
    pub fn first_fire_credit(&self, rules: &Rules, unit: &str) -> u32 {
        let granted = self
            .technologies
            .iter()
            .filter_map(|t| rules.tech(t))
            .any(|t| t.grants_first_fire(unit));
        u32::from(granted)
    }
}
