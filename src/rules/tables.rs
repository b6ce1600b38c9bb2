//! The reference-data lookup table.
//!
//! `Rules` is built once from structured data (the bundled JSON tables or a
//! caller-supplied set) and then shared read-only by the combat engine.
//! Loading validates every cross reference; any inconsistency is a fatal
//! `DataError` since it means the tables themselves are corrupt.

use std::collections::HashMap;

use super::nation::NationInfo;
use super::tech::{TechEffect, Technology};
use super::unit::UnitTypeInfo;

const UNITS_JSON: &str = include_str!("../../data/units.json");
const NATIONS_JSON: &str = include_str!("../../data/nations.json");
const TECHNOLOGIES_JSON: &str = include_str!("../../data/technologies.json");

/// Errors raised while loading reference or map data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("malformed {table} data: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("{kind} '{name}' has no short code")]
    MissingCode { kind: &'static str, name: String },

    #[error("'{owner}' references unknown unit type '{unit}'")]
    UnknownUnit { owner: String, unit: String },

    #[error("nation '{nation}' references unknown technology '{tech}'")]
    UnknownTech { nation: String, tech: String },

    #[error("territory '{territory}' references unknown faction '{faction}'")]
    UnknownFaction { territory: String, faction: String },

    #[error("nation '{0}' has no capital among its territories")]
    NoCapital(String),

    #[error("territory '{0}' has a degenerate polygon")]
    DegeneratePolygon(String),
}

fn parse<T: serde::de::DeserializeOwned>(table: &'static str, json: &str) -> Result<T, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Json { table, source })
}

/// Immutable unit, nation and technology tables with name and code lookup.
#[derive(Debug, Clone)]
pub struct Rules {
    units: Vec<UnitTypeInfo>,
    nations: Vec<NationInfo>,
    techs: Vec<Technology>,
    unit_index: HashMap<String, usize>,
    nation_index: HashMap<String, usize>,
    tech_index: HashMap<String, usize>,
    /// Unit indices sorted by ascending priority, stable by table order.
    by_priority: Vec<usize>,
}

impl Rules {
    /// Loads the bundled reference tables.
    pub fn standard() -> Result<Rules, DataError> {
        Rules::from_json(UNITS_JSON, NATIONS_JSON, TECHNOLOGIES_JSON)
    }

    /// Loads tables from JSON documents (arrays of records).
    pub fn from_json(units: &str, nations: &str, techs: &str) -> Result<Rules, DataError> {
        Rules::new(
            parse("unit", units)?,
            parse("nation", nations)?,
            parse("technology", techs)?,
        )
    }

    /// Builds a table from typed records, validating cross references.
    pub fn new(
        mut units: Vec<UnitTypeInfo>,
        nations: Vec<NationInfo>,
        techs: Vec<Technology>,
    ) -> Result<Rules, DataError> {
        let mut unit_index = HashMap::new();
        for (i, unit) in units.iter_mut().enumerate() {
            if unit.code.is_empty() {
                return Err(DataError::MissingCode { kind: "unit type", name: unit.name.clone() });
            }
            if unit_index.insert(unit.name.clone(), i).is_some() {
                return Err(DataError::Duplicate { kind: "unit type", name: unit.name.clone() });
            }
            unit.compute_preferred_order();
        }

        let mut tech_index = HashMap::new();
        for (i, tech) in techs.iter().enumerate() {
            if tech.code.is_empty() {
                return Err(DataError::MissingCode { kind: "technology", name: tech.name.clone() });
            }
            if tech_index.insert(tech.name.clone(), i).is_some() {
                return Err(DataError::Duplicate { kind: "technology", name: tech.name.clone() });
            }
            for effect in &tech.effects {
                let unit = match effect {
                    TechEffect::AttackModifier { unit, .. }
                    | TechEffect::AttackMultiplier { unit, .. }
                    | TechEffect::FirstFire { unit } => unit,
                };
                if !unit_index.contains_key(unit) {
                    return Err(DataError::UnknownUnit {
                        owner: tech.name.clone(),
                        unit: unit.clone(),
                    });
                }
            }
        }

        let mut nation_index = HashMap::new();
        for (i, nation) in nations.iter().enumerate() {
            if nation.code.is_empty() {
                return Err(DataError::MissingCode { kind: "nation", name: nation.name.clone() });
            }
            if nation_index.insert(nation.name.clone(), i).is_some() {
                return Err(DataError::Duplicate { kind: "nation", name: nation.name.clone() });
            }
            if let Some(tech) = nation.special_techs.iter().find(|t| !tech_index.contains_key(*t)) {
                return Err(DataError::UnknownTech {
                    nation: nation.name.clone(),
                    tech: tech.clone(),
                });
            }
            if let Some(unit) = nation.roster.iter().find(|u| !unit_index.contains_key(*u)) {
                return Err(DataError::UnknownUnit {
                    owner: nation.name.clone(),
                    unit: unit.clone(),
                });
            }
        }

        let mut by_priority: Vec<usize> = (0..units.len()).collect();
        by_priority.sort_by_key(|&i| units[i].priority);

        Ok(Rules {
            units,
            nations,
            techs,
            unit_index,
            nation_index,
            tech_index,
            by_priority,
        })
    }

    /// Looks up a unit type by name.
    pub fn unit(&self, name: &str) -> Option<&UnitTypeInfo> {
        self.unit_index.get(name).map(|&i| &self.units[i])
    }

    /// Looks up a unit type by short code.
    pub fn unit_by_code(&self, code: &str) -> Option<&UnitTypeInfo> {
        self.units.iter().find(|u| u.code == code)
    }

    /// All unit types in table order.
    pub fn units(&self) -> &[UnitTypeInfo] {
        &self.units
    }

    /// Unit types in firing order: ascending priority, ties in table order.
    pub fn units_by_priority(&self) -> impl Iterator<Item = &UnitTypeInfo> {
        self.by_priority.iter().map(move |&i| &self.units[i])
    }

    /// Looks up a nation by name.
    pub fn nation(&self, name: &str) -> Option<&NationInfo> {
        self.nation_index.get(name).map(|&i| &self.nations[i])
    }

    /// Looks up a nation by short code.
    pub fn nation_by_code(&self, code: &str) -> Option<&NationInfo> {
        self.nations.iter().find(|n| n.code == code)
    }

    /// All nations in table order.
    pub fn nations(&self) -> &[NationInfo] {
        &self.nations
    }

    /// Looks up a technology by name.
    pub fn tech(&self, name: &str) -> Option<&Technology> {
        self.tech_index.get(name).map(|&i| &self.techs[i])
    }

    /// Looks up a technology by short code.
    pub fn tech_by_code(&self, code: &str) -> Option<&Technology> {
        self.techs.iter().find(|t| t.code == code)
    }

    /// All technologies in table order.
    pub fn techs(&self) -> &[Technology] {
        &self.techs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::unit::{ClassValues, UnitClass};

    #[test]
    fn standard_tables_load() {
        let rules = Rules::standard().unwrap();
        assert!(rules.unit("Infantry").is_some());
        assert!(rules.unit("Fleet").is_some());
        assert!(rules.nation("West").is_some());
        assert!(rules.tech("AmphTracks").is_some());
        assert_eq!(rules.unit_by_code("Ta").map(|u| u.name.as_str()), Some("Tank"));
        assert_eq!(rules.nation_by_code("Ax").map(|n| n.name.as_str()), Some("Axis"));
        assert_eq!(rules.tech_by_code("FC").map(|t| t.name.as_str()), Some("Fire Control"));
    }

    #[test]
    fn standard_units_have_preferred_order() {
        let rules = Rules::standard().unwrap();
        let air = rules.unit("AirForce").unwrap();
        assert_eq!(air.preferred_order.first(), Some(&UnitClass::Air));
        let industry = rules.unit("Industry").unwrap();
        assert!(industry.preferred_order.is_empty());
        assert!(industry.special);
    }

    #[test]
    fn priority_order_is_ascending_and_stable() {
        let rules = Rules::standard().unwrap();
        let priorities: Vec<u32> = rules.units_by_priority().map(|u| u.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);

        let names: Vec<&str> = rules.units_by_priority().map(|u| u.name.as_str()).collect();
        let fortress = names.iter().position(|n| *n == "Fortress").unwrap();
        let sub = names.iter().position(|n| *n == "Submarine").unwrap();
        assert!(fortress < sub, "equal priority keeps table order");
    }

    #[test]
    fn missing_nation_code_is_fatal() {
        let nations = vec![NationInfo::new("Nowhere", "")];
        let err = Rules::new(Vec::new(), nations, Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::MissingCode { kind: "nation", .. }));
    }

    #[test]
    fn unknown_special_tech_is_fatal() {
        let nation = NationInfo::new("West", "We").with_special_tech("Teleporters");
        let err = Rules::new(Vec::new(), vec![nation], Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::UnknownTech { .. }));
    }

    #[test]
    fn duplicate_unit_is_fatal() {
        let tank = ClassValues::new(2, 0, 0, 0, 0);
        let tank = UnitTypeInfo::new("Tank", "Ta", 3, UnitClass::Ground, tank);
        let err = Rules::new(vec![tank.clone(), tank], Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::Duplicate { kind: "unit type", .. }));
    }

    #[test]
    fn malformed_json_is_reported_with_table() {
        let err = Rules::from_json("[", "[]", "[]").unwrap_err();
        assert!(err.to_string().starts_with("malformed unit data"));
    }
}
