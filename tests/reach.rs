//! Supply and trade over the bundled demo map.

use blocksim::map::{load_demo, Blockade, ControlStatus, TerritoryId, WorldState};
use blocksim::reach::{can_trade_for, find_supplied_territories_for, find_tradable_territories_for};

fn names(state: &WorldState, ids: impl IntoIterator<Item = TerritoryId>) -> Vec<String> {
    ids.into_iter().map(|t| state.territory_name(t).to_string()).collect()
}

#[test]
fn west_supply_runs_from_both_capitals() {
    let (state, adjacency) = load_demo().unwrap();
    let west = state.faction_id("West").unwrap();
    let supplied = find_supplied_territories_for(west, &state, &adjacency);

    let mut reached = names(&state, supplied.keys().copied());
    reached.sort();
    assert_eq!(
        reached,
        vec![
            "Algiers",
            "Atlantic",
            "Biscay",
            "CentralMed",
            "Gibraltar",
            "London",
            "NorthSea",
            "Paris",
            "WestMed"
        ]
    );

    let central = state.territory_id("CentralMed").unwrap();
    assert_eq!(
        names(&state, supplied[&central].iter().copied()),
        vec!["Paris", "Gibraltar", "WestMed", "CentralMed"]
    );
    let london = state.territory_id("London").unwrap();
    assert_eq!(supplied[&london], vec![london]);
}

#[test]
fn supply_paths_start_at_a_held_capital() {
    let (state, adjacency) = load_demo().unwrap();
    for (faction, _) in state.factions() {
        let capitals = state.capitals_of(faction);
        for path in find_supplied_territories_for(faction, &state, &adjacency).values() {
            assert!(capitals.contains(&path[0]));
            for step in path.windows(2) {
                assert!(adjacency.is_adjacent(step[0], step[1]));
            }
        }
    }
}

#[test]
fn west_trades_across_the_sea() {
    let (state, adjacency) = load_demo().unwrap();
    let west = state.faction_id("West").unwrap();
    let tradable = find_tradable_territories_for(west, &state, &adjacency);
    assert_eq!(
        names(&state, tradable),
        vec![
            "Atlantic",
            "London",
            "NorthSea",
            "Biscay",
            "Paris",
            "Madrid",
            "Gibraltar",
            "WestMed",
            "Lisbon",
            "Algiers",
            "CentralMed"
        ]
    );
}

#[test]
fn open_seas_trade_freely_without_enemies() {
    let (mut state, _) = load_demo().unwrap();
    let axis = state.faction_id("Axis").unwrap();
    let west = state.faction_id("West").unwrap();
    let seas: Vec<TerritoryId> = state
        .territories()
        .filter(|(_, t)| t.is_sea())
        .map(|(id, _)| id)
        .collect();
    for &sea in &seas {
        state.escape_submarine(axis, sea).unwrap();
    }
    assert!(seas.iter().all(|&sea| can_trade_for(&state, west, sea)));
}

#[test]
fn enemy_submarines_cut_sea_trade() {
    let (mut state, adjacency) = load_demo().unwrap();
    let axis = state.faction_id("Axis").unwrap();
    let west = state.faction_id("West").unwrap();
    state.declare_war(west, axis).unwrap();
    let west_med = state.territory_id("WestMed").unwrap();
    state.escape_submarine(axis, west_med).unwrap();

    // CentralMed is still reached from the Algiers coast.
    let tradable = names(&state, find_tradable_territories_for(west, &state, &adjacency));
    assert_eq!(
        tradable,
        vec![
            "Atlantic",
            "London",
            "NorthSea",
            "Biscay",
            "Paris",
            "Madrid",
            "Gibraltar",
            "Lisbon",
            "Algiers",
            "CentralMed"
        ]
    );
    assert!(!can_trade_for(&state, west, west_med));

    state.clear_submarines(west_med);
    let tradable = names(&state, find_tradable_territories_for(west, &state, &adjacency));
    assert!(tradable.contains(&"WestMed".to_string()));
}

#[test]
fn rival_territory_trades_only_at_straits() {
    let (mut state, adjacency) = load_demo().unwrap();
    let axis = state.faction_id("Axis").unwrap();
    let west = state.faction_id("West").unwrap();
    let gibraltar = state.territory_id("Gibraltar").unwrap();
    let london = state.territory_id("London").unwrap();

    assert_eq!(state.status_for(gibraltar, axis), ControlStatus::Rival);
    assert_eq!(state.status_for(london, axis), ControlStatus::Rival);
    assert!(can_trade_for(&state, axis, gibraltar));
    assert!(!can_trade_for(&state, axis, london));

    let tradable = names(&state, find_tradable_territories_for(axis, &state, &adjacency));
    assert!(tradable.contains(&"Gibraltar".to_string()));
    assert!(tradable.contains(&"Lisbon".to_string()));
    assert!(!tradable.contains(&"London".to_string()));

    state.declare_war(axis, west).unwrap();
    assert_eq!(state.status_for(gibraltar, axis), ControlStatus::Enemy);
    let tradable = names(&state, find_tradable_territories_for(axis, &state, &adjacency));
    assert!(!tradable.contains(&"Gibraltar".to_string()));
}

#[test]
fn blockade_does_not_change_reachability() {
    let (mut state, adjacency) = load_demo().unwrap();
    let west = state.faction_id("West").unwrap();
    let before = find_supplied_territories_for(west, &state, &adjacency);
    let london = state.territory_id("London").unwrap();
    state.set_blockade(london, Blockade::Full);
    assert_eq!(find_supplied_territories_for(west, &state, &adjacency), before);
}
