//! Trade routes.
//!
//! Trade leaves the main capital over land, takes to the sea wherever that
//! land reaches a coast, and comes ashore again on any coast those seas
//! touch. Submarines of an enemy that escaped into a sea zone cut the
//! routes through it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::map::{Adjacency, ControlStatus, FactionId, TerritoryId, WorldState};

use super::search::reachable;

/// Returns true if trade for `faction` may pass through `t`.
pub fn can_trade_for(state: &WorldState, faction: FactionId, t: TerritoryId) -> bool {
    match state.status_for(t, faction) {
        ControlStatus::Friendly | ControlStatus::Neutral => true,
        ControlStatus::Rival => state.territory(t).is_strait(),
        ControlStatus::Enemy => false,
        ControlStatus::Open => {
            let own = state.faction(faction);
            // With no enemies every open sea is safe.
            !own.has_enemies()
                || !state
                    .territory(t)
                    .escaped_subs
                    .iter()
                    .any(|&sub| own.is_at_war_with(sub))
        }
    }
}

/// Neighbors of `from` that satisfy `keep`, deduplicated.
fn adjacent_where(
    adjacency: &Adjacency,
    from: &BTreeSet<TerritoryId>,
    mut keep: impl FnMut(TerritoryId) -> bool,
) -> Vec<TerritoryId> {
    from.iter()
        .flat_map(|&t| adjacency.neighbors(t).iter().copied())
        .filter(|&t| keep(t))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every territory `faction` can trade with, sorted by id.
pub fn find_tradable_territories_for(
    faction: FactionId,
    state: &WorldState,
    adjacency: &Adjacency,
) -> Vec<TerritoryId> {
    let Some(capital) = state.main_capital_of(faction) else {
        return Vec::new();
    };
    let land = |t: TerritoryId| state.territory(t).is_land() && can_trade_for(state, faction, t);
    let sea = |t: TerritoryId| state.territory(t).is_sea() && can_trade_for(state, faction, t);

    let overland = reachable(adjacency, &[capital], land);
    let ports = adjacent_where(adjacency, &overland, sea);
    let seas = reachable(adjacency, &ports, sea);
    let coasts = adjacent_where(adjacency, &seas, land);
    let inland = reachable(adjacency, &coasts, land);

    let tradable: BTreeSet<TerritoryId> = overland.into_iter().chain(seas).chain(inland).collect();
    debug!(
        faction = %state.faction(faction).name,
        tradable = tradable.len(),
        "trade computed"
    );
    tradable.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::load_demo;

    fn names(state: &WorldState, ids: &[TerritoryId]) -> Vec<String> {
        ids.iter().map(|&t| state.territory_name(t).to_string()).collect()
    }

    #[test]
    fn seas_carry_trade_to_distant_coasts() {
        let (state, adjacency) = load_demo().unwrap();
        let ussr = state.faction_id("USSR").unwrap();
        let tradable = find_tradable_territories_for(ussr, &state, &adjacency);
        assert_eq!(
            names(&state, &tradable),
            vec!["Warsaw", "Moscow", "Lvov", "Kiev", "Istanbul", "BlackSea", "EastMed", "Ankara"]
        );
    }

    #[test]
    fn open_sea_is_tradable_without_enemies() {
        let (mut state, _) = load_demo().unwrap();
        let west = state.faction_id("West").unwrap();
        let axis = state.faction_id("Axis").unwrap();
        let biscay = state.territory_id("Biscay").unwrap();
        state.escape_submarine(axis, biscay).unwrap();
        assert!(can_trade_for(&state, west, biscay));
        state.declare_war(west, axis).unwrap();
        assert!(!can_trade_for(&state, west, biscay));
    }

    #[test]
    fn lost_capital_means_no_trade() {
        let (mut state, adjacency) = load_demo().unwrap();
        let ussr = state.faction_id("USSR").unwrap();
        let axis = state.faction_id("Axis").unwrap();
        state.declare_war(ussr, axis).unwrap();
        let moscow = state.territory_id("Moscow").unwrap();
        state.occupy(moscow, axis);
        assert!(find_tradable_territories_for(ussr, &state, &adjacency).is_empty());
    }
}
