//! Typed map records and the world builder.
//!
//! A map document lists factions and territories. Nations are not listed
//! separately: every territory names its nation, and the nation's capital is
//! the member territory with a capital tier.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::rules::DataError;

use super::adjacency::{Adjacency, Point};
use super::faction::Faction;
use super::nation::Nation;
use super::state::WorldState;
use super::territory::{CityTier, TerrainKind, Territory, TerritoryId};

const DEMO_MAP_JSON: &str = include_str!("../../data/demo_map.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FactionRecord {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerritoryRecord {
    pub name: String,
    #[serde(default)]
    pub nation: Option<String>,
    pub kind: TerrainKind,
    #[serde(default)]
    pub population: u32,
    #[serde(default)]
    pub resources: u32,
    #[serde(default)]
    pub trans_africa: u32,
    #[serde(default)]
    pub tier: CityTier,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub strait: bool,
    pub polygon: Vec<Point>,
}

/// A complete map document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapData {
    pub factions: Vec<FactionRecord>,
    pub territories: Vec<TerritoryRecord>,
}

impl MapData {
    /// The bundled demonstration map.
    pub fn demo() -> Result<MapData, DataError> {
        MapData::from_json(DEMO_MAP_JSON)
    }

    pub fn from_json(json: &str) -> Result<MapData, DataError> {
        serde_json::from_str(json).map_err(|source| DataError::Json { table: "map", source })
    }

    /// Outlines in territory id order.
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        self.territories.iter().map(|t| t.polygon.clone()).collect()
    }
}

impl WorldState {
    /// Builds the initial world from a map document.
    pub fn from_map(map: &MapData) -> Result<WorldState, DataError> {
        let factions = map
            .factions
            .iter()
            .map(|f| Faction::new(&f.name, &f.color))
            .collect();
        let mut world = WorldState::new(factions);

        let mut seen = HashSet::new();
        let mut members: BTreeMap<&str, Vec<TerritoryId>> = BTreeMap::new();
        for record in &map.territories {
            if !seen.insert(record.name.as_str()) {
                return Err(DataError::Duplicate { kind: "territory", name: record.name.clone() });
            }
            if record.polygon.len() < 3 {
                return Err(DataError::DegeneratePolygon(record.name.clone()));
            }
            let start = match &record.start {
                Some(name) => Some(world.faction_id(name).ok_or_else(|| DataError::UnknownFaction {
                    territory: record.name.clone(),
                    faction: name.clone(),
                })?),
                None => None,
            };

            let territory = Territory {
                population: record.population,
                resources: record.resources,
                trans_africa: record.trans_africa,
                tier: record.tier,
                start,
                strait: record.strait,
                ..match record.kind {
                    TerrainKind::Land => Territory::land(&record.name),
                    TerrainKind::Sea => Territory::sea(&record.name),
                }
            };
            let id = world.push_territory(territory);
            if let Some(nation) = &record.nation {
                members.entry(nation.as_str()).or_default().push(id);
            }
        }

        for (name, territories) in members {
            let capital = territories
                .iter()
                .copied()
                .find(|&t| world.is_main_capital(t))
                .or_else(|| territories.iter().copied().find(|&t| world.is_capital(t)))
                .ok_or_else(|| DataError::NoCapital(name.to_string()))?;
            let mut nation = Nation::new(name, capital);
            nation.territories = territories;
            world.push_nation(nation);
        }

        Ok(world)
    }
}

impl Adjacency {
    /// Builds the adjacency graph of a map document.
    pub fn from_map(map: &MapData) -> Adjacency {
        Adjacency::from_polygons(&map.polygons())
    }
}

/// Loads the bundled map into a fresh world and its adjacency graph.
pub fn load_demo() -> Result<(WorldState, Adjacency), DataError> {
    let map = MapData::demo()?;
    Ok((WorldState::from_map(&map)?, Adjacency::from_map(&map)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_map_loads() {
        let (world, adjacency) = load_demo().unwrap();
        assert_eq!(world.territory_count(), 24);
        assert_eq!(adjacency.len(), 24);
        assert_eq!(world.factions().count(), 3);
        assert_eq!(world.nations().count(), 8);
    }

    #[test]
    fn nations_find_their_capitals() {
        let (world, _) = load_demo().unwrap();
        let britain = world.nation_id("Britain").unwrap();
        let london = world.territory_id("London").unwrap();
        let gibraltar = world.territory_id("Gibraltar").unwrap();
        assert_eq!(world.nation(britain).capital, london);
        assert_eq!(world.territory(gibraltar).nation, Some(britain));
    }

    #[test]
    fn demo_adjacency_is_a_grid() {
        let (world, adjacency) = load_demo().unwrap();
        let id = |name| world.territory_id(name).unwrap();
        assert_eq!(
            adjacency.neighbors(id("Paris")),
            &[id("London"), id("Biscay"), id("Ruhr"), id("Gibraltar")]
        );
        assert!(!adjacency.is_adjacent(id("London"), id("Biscay")));
    }

    #[test]
    fn nation_without_capital_is_fatal() {
        let json = r#"{
            "factions": [],
            "territories": [
                { "name": "A", "nation": "Nowhere", "kind": "land", "tier": "town",
                  "polygon": [[0,0],[1,0],[1,1]] }
            ]
        }"#;
        let map = MapData::from_json(json).unwrap();
        assert!(matches!(
            WorldState::from_map(&map),
            Err(DataError::NoCapital(n)) if n == "Nowhere"
        ));
    }

    #[test]
    fn unknown_faction_is_fatal() {
        let json = r#"{
            "factions": [{ "name": "Axis" }],
            "territories": [
                { "name": "A", "kind": "land", "start": "Allies", "polygon": [[0,0],[1,0],[1,1]] }
            ]
        }"#;
        let map = MapData::from_json(json).unwrap();
        assert!(matches!(WorldState::from_map(&map), Err(DataError::UnknownFaction { .. })));
    }

    #[test]
    fn degenerate_polygon_is_fatal() {
        let json = r#"{
            "factions": [],
            "territories": [{ "name": "A", "kind": "sea", "polygon": [[0,0],[1,0]] }]
        }"#;
        let map = MapData::from_json(json).unwrap();
        assert!(matches!(WorldState::from_map(&map), Err(DataError::DegeneratePolygon(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(MapData::from_json("{"), Err(DataError::Json { table: "map", .. })));
    }
}
