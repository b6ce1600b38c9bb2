//! Unit classes and unit-type reference records.
//!
//! Every unit type belongs to exactly one `UnitClass` and carries a to-hit
//! value against each class. A value of 0 means the unit cannot damage that
//! class at all.

use serde::{Deserialize, Serialize};

/// The target class a unit belongs to and fires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitClass {
    #[serde(rename = "G")]
    Ground,
    #[serde(rename = "A")]
    Air,
    #[serde(rename = "N")]
    Naval,
    #[serde(rename = "S")]
    Submarine,
    #[serde(rename = "I")]
    Industry,
}

/// All classes in table order. Also the tie-break order for `preferred_order`.
pub const ALL_CLASSES: [UnitClass; 5] = [
    UnitClass::Ground,
    UnitClass::Air,
    UnitClass::Naval,
    UnitClass::Submarine,
    UnitClass::Industry,
];

impl UnitClass {
    /// Returns the single-letter class code.
    pub const fn code(self) -> char {
        match self {
            UnitClass::Ground => 'G',
            UnitClass::Air => 'A',
            UnitClass::Naval => 'N',
            UnitClass::Submarine => 'S',
            UnitClass::Industry => 'I',
        }
    }

    /// Parses a class from its single-letter code.
    pub fn from_code(c: char) -> Option<UnitClass> {
        match c {
            'G' => Some(UnitClass::Ground),
            'A' => Some(UnitClass::Air),
            'N' => Some(UnitClass::Naval),
            'S' => Some(UnitClass::Submarine),
            'I' => Some(UnitClass::Industry),
            _ => None,
        }
    }
}

/// One value per target class, e.g. a unit's to-hit numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassValues {
    #[serde(rename = "G", default)]
    pub ground: u32,
    #[serde(rename = "A", default)]
    pub air: u32,
    #[serde(rename = "N", default)]
    pub naval: u32,
    #[serde(rename = "S", default)]
    pub submarine: u32,
    #[serde(rename = "I", default)]
    pub industry: u32,
}

impl ClassValues {
    /// Builds a table from values listed in `ALL_CLASSES` order.
    pub const fn new(ground: u32, air: u32, naval: u32, submarine: u32, industry: u32) -> Self {
        ClassValues {
            ground,
            air,
            naval,
            submarine,
            industry,
        }
    }

    /// Returns the value for `class`.
    pub const fn get(&self, class: UnitClass) -> u32 {
        match class {
            UnitClass::Ground => self.ground,
            UnitClass::Air => self.air,
            UnitClass::Naval => self.naval,
            UnitClass::Submarine => self.submarine,
            UnitClass::Industry => self.industry,
        }
    }

    /// Overwrites the value for `class`.
    pub fn set(&mut self, class: UnitClass, value: u32) {
        match class {
            UnitClass::Ground => self.ground = value,
            UnitClass::Air => self.air = value,
            UnitClass::Naval => self.naval = value,
            UnitClass::Submarine => self.submarine = value,
            UnitClass::Industry => self.industry = value,
        }
    }
}

/// Static description of a unit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTypeInfo {
    pub name: String,
    /// Short code used by the compact block encoding.
    pub code: String,
    /// Firing priority; lower values fire earlier in a round.
    pub priority: u32,
    pub class: UnitClass,
    pub attack: ClassValues,
    /// Each hit removes two strength instead of one.
    #[serde(default)]
    pub takes_double: bool,
    /// Excluded from standard strength rotation (e.g. industry).
    #[serde(default)]
    pub special: bool,
    /// Fires normally during a sea invasion (marines).
    #[serde(default)]
    pub ignore_sea_invasion: bool,
    /// Damageable classes ranked by this unit's own attack value, best first.
    #[serde(skip)]
    pub preferred_order: Vec<UnitClass>,
}

impl UnitTypeInfo {
    /// Creates a unit type and derives its preferred target order.
    pub fn new(
        name: &str,
        code: &str,
        priority: u32,
        class: UnitClass,
        attack: ClassValues,
    ) -> Self {
        let mut info = UnitTypeInfo {
            name: name.to_string(),
            code: code.to_string(),
            priority,
            class,
            attack,
            takes_double: false,
            special: false,
            ignore_sea_invasion: false,
            preferred_order: Vec::new(),
        };
        info.compute_preferred_order();
        info
    }

    /// Marks the unit as losing two strength per hit.
    pub fn with_takes_double(mut self) -> Self {
        self.takes_double = true;
        self
    }

    /// Marks the unit as able to fire while landing from the sea.
    pub fn with_ignore_sea_invasion(mut self) -> Self {
        self.ignore_sea_invasion = true;
        self
    }

    /// Recomputes `preferred_order` from the attack table.
    ///
    /// The sort is stable, so equal values keep `ALL_CLASSES` order.
    pub fn compute_preferred_order(&mut self) {
        let mut order: Vec<UnitClass> = ALL_CLASSES
            .iter()
            .copied()
            .filter(|c| self.attack.get(*c) > 0)
            .collect();
        order.sort_by(|a, b| self.attack.get(*b).cmp(&self.attack.get(*a)));
        self.preferred_order = order;
    }
}
