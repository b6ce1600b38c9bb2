//! Technologies and their combat effects.

use serde::{Deserialize, Serialize};

use super::unit::UnitClass;

/// The ruleset variant a nation or technology belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    #[default]
    Base,
    Extended,
}

/// A single combat effect granted by a technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TechEffect {
    /// Replaces `unit`'s to-hit value against `against`.
    AttackModifier {
        unit: String,
        against: UnitClass,
        to_hit: u32,
    },
    /// Multiplies the number of dice `unit` rolls against `against`.
    AttackMultiplier {
        unit: String,
        against: UnitClass,
        factor: u32,
    },
    /// Grants first-fire credit to `unit`.
    FirstFire { unit: String },
}

/// A named technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    /// Short code used by the compact technology encoding.
    pub code: String,
    #[serde(default)]
    pub edition: Edition,
    #[serde(default)]
    pub effects: Vec<TechEffect>,
}

impl Technology {
    /// Creates a technology with no effects.
    pub fn new(name: &str, code: &str) -> Self {
        Technology {
            name: name.to_string(),
            code: code.to_string(),
            edition: Edition::Base,
            effects: Vec::new(),
        }
    }

    /// Adds an effect.
    pub fn with_effect(mut self, effect: TechEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Iterates over the to-hit overrides this technology applies to `unit`.
    pub fn attack_modifiers<'a>(
        &'a self,
        unit: &'a str,
    ) -> impl Iterator<Item = (UnitClass, u32)> + 'a {
        self.effects.iter().filter_map(move |e| match e {
            TechEffect::AttackModifier { unit: u, against, to_hit } if u == unit => {
                Some((*against, *to_hit))
            }
            _ => None,
        })
    }

    /// Returns the dice multiplier for `unit` firing at `class`, if defined.
    pub fn attack_multiplier(&self, unit: &str, class: UnitClass) -> Option<u32> {
        self.effects.iter().find_map(|e| match e {
            TechEffect::AttackMultiplier { unit: u, against, factor }
                if u == unit && *against == class =>
            {
                Some(*factor)
            }
            _ => None,
        })
    }

    /// Returns true if this technology grants first fire to `unit`.
    pub fn grants_first_fire(&self, unit: &str) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, TechEffect::FirstFire { unit: u } if u == unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_deserialize_by_kind() {
        let json = r#"{
            "name": "Fire Control", "code": "FC", "edition": "extended",
            "effects": [
                { "kind": "attack_modifier", "unit": "Fleet", "against": "N", "to_hit": 4 },
                { "kind": "first_fire", "unit": "Fleet" }
            ]
        }"#;
        let tech: Technology = serde_json::from_str(json).unwrap();
        assert_eq!(tech.edition, Edition::Extended);
        assert_eq!(
            tech.attack_modifiers("Fleet").collect::<Vec<_>>(),
            vec![(UnitClass::Naval, 4)]
        );
        assert!(tech.grants_first_fire("Fleet"));
        assert!(!tech.grants_first_fire("Tank"));
    }

    #[test]
    fn unknown_effect_kind_is_rejected() {
        let json = r#"{ "name": "X", "code": "X", "effects": [ { "kind": "teleport" } ] }"#;
        assert!(serde_json::from_str::<Technology>(json).is_err());
    }

    #[test]
    fn multiplier_matches_unit_and_class() {
        let tech =
            Technology::new("Precision Bombsight", "PB").with_effect(TechEffect::AttackMultiplier {
                unit: "AirForce".to_string(),
                against: UnitClass::Industry,
                factor: 2,
            });
        assert_eq!(tech.attack_multiplier("AirForce", UnitClass::Industry), Some(2));
        assert_eq!(tech.attack_multiplier("AirForce", UnitClass::Ground), None);
        assert_eq!(tech.attack_multiplier("Fleet", UnitClass::Industry), None);
    }
}
