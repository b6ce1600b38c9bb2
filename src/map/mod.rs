//! Territory graph and faction state.
//!
//! Contains territories, nation groupings, factions, the `WorldState` arena
//! with its mutations and derived queries, and the polygon adjacency graph.

pub mod adjacency;
pub mod data;
pub mod faction;
pub mod nation;
pub mod state;
pub mod territory;

pub use adjacency::{Adjacency, Point};
pub use data::{load_demo, FactionRecord, MapData, TerritoryRecord};
pub use faction::{Faction, ResourceTotals};
pub use nation::{Nation, MAX_INFLUENCE};
pub use state::{StateError, WorldState};
pub use territory::{
    Blockade, CityTier, ControlStatus, FactionId, NationId, TerrainKind, Territory, TerritoryId,
};
