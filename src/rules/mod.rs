//! Reference data consumed read-only by the combat engine.
//!
//! Contains unit types and their classes, battle nations, technologies,
//! and the `Rules` table that validates and indexes them.

pub mod nation;
pub mod tables;
pub mod tech;
pub mod unit;

pub use nation::{MaxPips, NationColors, NationInfo};
pub use tables::{DataError, Rules};
pub use tech::{Edition, TechEffect, Technology};
pub use unit::{ClassValues, UnitClass, UnitTypeInfo, ALL_CLASSES};

/// Name of the fleet unit type, the only type eligible for the optics tie-break.
pub const FLEET: &str = "Fleet";

/// Special technology that breaks naval first-fire ties in its owner's favor.
pub const PRECISION_OPTICS: &str = "Precision Optics";

/// Technology that lets ground units fire during a sea invasion.
pub const AMPH_TRACKS: &str = "AmphTracks";
