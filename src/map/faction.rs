//! Playable factions and their yield totals.

use std::collections::BTreeSet;
use std::ops::AddAssign;

use serde::Serialize;

use super::territory::FactionId;

/// A playable faction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faction {
    pub name: String,
    pub color: String,
    /// Factions this one is at war with.
    pub enemies: BTreeSet<FactionId>,
}

impl Faction {
    pub fn new(name: &str, color: &str) -> Self {
        Faction {
            name: name.to_string(),
            color: color.to_string(),
            enemies: BTreeSet::new(),
        }
    }

    pub fn is_at_war_with(&self, other: FactionId) -> bool {
        self.enemies.contains(&other)
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }
}

/// Collectable yields summed over a set of territories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceTotals {
    pub population: u32,
    pub resources: u32,
    pub trans_africa: u32,
}

impl AddAssign<(u32, u32, u32)> for ResourceTotals {
    fn add_assign(&mut self, (population, resources, trans_africa): (u32, u32, u32)) {
        self.population += population;
        self.resources += resources;
        self.trans_africa += trans_africa;
    }
}
