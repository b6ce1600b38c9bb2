//! Supply lines.
//!
//! A faction is in supply wherever a path of traversable territories leads
//! back to one of its own capitals.

use tracing::debug;

use crate::map::{Adjacency, ControlStatus, FactionId, TerritoryId, WorldState};

use super::search::{shortest_paths, Paths};

/// Returns true if supply for `faction` may pass through `t`.
///
/// Friendly and open territory always carries supply. Rival and neutral
/// territory only does at a strait. Enemy territory never does.
pub fn can_supply_for(state: &WorldState, faction: FactionId, t: TerritoryId) -> bool {
    match state.status_for(t, faction) {
        ControlStatus::Friendly | ControlStatus::Open => true,
        ControlStatus::Rival | ControlStatus::Neutral => state.territory(t).is_strait(),
        ControlStatus::Enemy => false,
    }
}

/// Every territory in supply for `faction`, with the shortest supply path
/// from the nearest held capital.
pub fn find_supplied_territories_for(
    faction: FactionId,
    state: &WorldState,
    adjacency: &Adjacency,
) -> Paths {
    let capitals = state.capitals_of(faction);
    let paths = shortest_paths(adjacency, &capitals, |t| can_supply_for(state, faction, t));
    debug!(
        faction = %state.faction(faction).name,
        capitals = capitals.len(),
        supplied = paths.len(),
        "supply computed"
    );
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::load_demo;

    #[test]
    fn straits_pass_supply_through_neutral_ground() {
        let (state, adjacency) = load_demo().unwrap();
        let ussr = state.faction_id("USSR").unwrap();
        let istanbul = state.territory_id("Istanbul").unwrap();
        let warsaw = state.territory_id("Warsaw").unwrap();
        assert!(can_supply_for(&state, ussr, istanbul));
        assert!(!can_supply_for(&state, ussr, warsaw));

        let supplied = find_supplied_territories_for(ussr, &state, &adjacency);
        let names: Vec<&str> = supplied.keys().map(|&t| state.territory_name(t)).collect();
        assert_eq!(names, vec!["Moscow", "Kiev", "Istanbul", "BlackSea", "EastMed"]);
    }

    #[test]
    fn enemy_territory_blocks_supply() {
        let (mut state, _) = load_demo().unwrap();
        let west = state.faction_id("West").unwrap();
        let axis = state.faction_id("Axis").unwrap();
        let gibraltar = state.territory_id("Gibraltar").unwrap();
        state.occupy(gibraltar, axis);
        // Straits still pass supply under rival control, but not under enemy control.
        assert!(can_supply_for(&state, west, gibraltar));
        state.declare_war(west, axis).unwrap();
        assert!(!can_supply_for(&state, west, gibraltar));
    }

    #[test]
    fn no_capitals_means_no_supply() {
        let (mut state, adjacency) = load_demo().unwrap();
        let ussr = state.faction_id("USSR").unwrap();
        let axis = state.faction_id("Axis").unwrap();
        let moscow = state.territory_id("Moscow").unwrap();
        state.occupy(moscow, axis);
        assert!(find_supplied_territories_for(ussr, &state, &adjacency).is_empty());
    }
}
