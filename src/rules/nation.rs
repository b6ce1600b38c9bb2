//! Battle nations: the owners of blocks in a combat.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::tech::Edition;

/// Display colors for a nation's blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationColors {
    pub primary: String,
    pub pip: String,
}

/// Strength caps: a default plus per-unit overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPips {
    pub default: u32,
    #[serde(flatten)]
    pub overrides: HashMap<String, u32>,
}

impl Default for MaxPips {
    fn default() -> Self {
        MaxPips {
            default: 4,
            overrides: HashMap::new(),
        }
    }
}

/// Static description of a nation that fields blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationInfo {
    pub name: String,
    /// Acronym used by the compact block encoding. Must not be empty.
    pub code: String,
    #[serde(default)]
    pub edition: Edition,
    #[serde(default)]
    pub colors: NationColors,
    #[serde(default)]
    pub max_pips: MaxPips,
    /// Technologies applied automatically to every block of this nation.
    #[serde(default)]
    pub special_techs: Vec<String>,
    /// Unit types this nation may field. Empty means unrestricted.
    #[serde(default)]
    pub roster: Vec<String>,
}

impl NationInfo {
    /// Creates a nation with default caps and no specials.
    pub fn new(name: &str, code: &str) -> Self {
        NationInfo {
            name: name.to_string(),
            code: code.to_string(),
            edition: Edition::Base,
            colors: NationColors::default(),
            max_pips: MaxPips::default(),
            special_techs: Vec::new(),
            roster: Vec::new(),
        }
    }

    /// Adds an automatically applied technology.
    pub fn with_special_tech(mut self, tech: &str) -> Self {
        self.special_techs.push(tech.to_string());
        self
    }

    /// Returns the strength cap for `unit` in this nation.
    pub fn max_pips(&self, unit: &str) -> u32 {
        self.max_pips
            .overrides
            .get(unit)
            .copied()
            .unwrap_or(self.max_pips.default)
    }

    /// Returns true if the nation may field `unit`.
    pub fn allows(&self, unit: &str) -> bool {
        self.roster.is_empty() || self.roster.iter().any(|u| u == unit)
    }

    /// Returns true if `tech` is one of this nation's specials.
    pub fn has_special(&self, tech: &str) -> bool {
        self.special_techs.iter().any(|t| t == tech)
    }
}
