//! Territories and their per-territory status values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a territory in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub usize);

/// Index of a territory-grouping nation in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NationId(pub usize);

/// Index of a playable faction in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub usize);

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Land or sea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    Land,
    Sea,
}

/// Settlement size of a land territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTier {
    #[default]
    None,
    Town,
    City,
    SubCapital,
    MainCapital,
}

impl CityTier {
    /// Returns true for sub and main capitals.
    pub const fn is_capital(self) -> bool {
        matches!(self, CityTier::SubCapital | CityTier::MainCapital)
    }
}

/// Blockade level; controls which yields can be collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blockade {
    #[default]
    None,
    Med,
    Full,
}

impl Blockade {
    /// Parses `none`, `med` or `full` (case-insensitive).
    pub fn from_name(s: &str) -> Option<Blockade> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Blockade::None),
            "med" | "medium" => Some(Blockade::Med),
            "full" => Some(Blockade::Full),
            _ => None,
        }
    }

    /// Population is only lost to a full blockade.
    pub const fn collects_population(self) -> bool {
        !matches!(self, Blockade::Full)
    }

    /// Resources are lost to any blockade.
    pub const fn collects_resources(self) -> bool {
        matches!(self, Blockade::None)
    }

    /// Trans-Africa resources are only lost to a full blockade.
    pub const fn collects_trans_africa(self) -> bool {
        !matches!(self, Blockade::Full)
    }
}

/// How a territory relates to a given faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    /// Owned by the faction itself.
    Friendly,
    /// Sea, or land with no owner and no nation.
    Open,
    /// Owned by nobody; belongs to an uncommitted nation.
    Neutral,
    /// Owned by another faction at peace with this one.
    Rival,
    /// Owned by a faction at war with this one.
    Enemy,
}

/// One map region with its static yields and mutable status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub name: String,
    pub nation: Option<NationId>,
    pub kind: TerrainKind,
    pub population: u32,
    pub resources: u32,
    pub trans_africa: u32,
    pub tier: CityTier,
    pub start: Option<FactionId>,
    pub strait: bool,
    /// Faction that took the territory with `occupy`. `None` is the
    /// neutral default, where ownership follows the nation.
    pub controller: Option<FactionId>,
    pub blockade: Blockade,
    /// Factions whose submarines have escaped into this sea zone.
    pub escaped_subs: Vec<FactionId>,
}

impl Territory {
    /// A land territory with no yields.
    pub fn land(name: &str) -> Self {
        Territory {
            name: name.to_string(),
            nation: None,
            kind: TerrainKind::Land,
            population: 0,
            resources: 0,
            trans_africa: 0,
            tier: CityTier::None,
            start: None,
            strait: false,
            controller: None,
            blockade: Blockade::None,
            escaped_subs: Vec::new(),
        }
    }

    /// A sea zone.
    pub fn sea(name: &str) -> Self {
        Territory {
            kind: TerrainKind::Sea,
            ..Territory::land(name)
        }
    }

    pub fn is_sea(&self) -> bool {
        self.kind == TerrainKind::Sea
    }

    pub fn is_land(&self) -> bool {
        self.kind == TerrainKind::Land
    }

    pub fn is_strait(&self) -> bool {
        self.strait
    }

    pub fn is_capital(&self) -> bool {
        self.tier.is_capital()
    }

    pub fn is_main_capital(&self) -> bool {
        self.tier == CityTier::MainCapital
    }

    pub fn is_sub_capital(&self) -> bool {
        self.tier == CityTier::SubCapital
    }

    /// Returns true if a faction other than the starting one holds it.
    pub fn is_occupied(&self) -> bool {
        self.controller.is_some() && self.controller != self.start
    }

    /// The occupying faction, if any.
    pub fn occupier(&self) -> Option<FactionId> {
        if self.is_occupied() {
            self.controller
        } else {
            None
        }
    }

    /// Collectable (population, resources, trans-Africa) under the current blockade.
    pub fn collectable(&self) -> (u32, u32, u32) {
        let b = self.blockade;
        (
            if b.collects_population() { self.population } else { 0 },
            if b.collects_resources() { self.resources } else { 0 },
            if b.collects_trans_africa() { self.trans_africa } else { 0 },
        )
    }
}
