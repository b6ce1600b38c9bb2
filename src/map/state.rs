//! The mutable world: territories, nations and factions in one arena.
//!
//! Entities refer to each other by id, never by reference. Every derived
//! query (ownership, control status, yields) is recomputed from the current
//! state on each call.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::faction::{Faction, ResourceTotals};
use super::nation::{Nation, MAX_INFLUENCE};
use super::territory::{Blockade, ControlStatus, FactionId, NationId, Territory, TerritoryId};

/// Illegal actions against the world state. The state is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("capital of {0} is occupied")]
    CapitalOccupied(String),

    #[error("{0} already carries the maximum influence")]
    InfluenceFull(String),

    #[error("{faction} has no influence in {nation}")]
    NoInfluence { nation: String, faction: String },

    #[error("{0} is not a neutral nation")]
    NotNeutral(String),

    #[error("{0} is not a sea zone")]
    NotSea(String),

    #[error("{0} cannot be at war with itself")]
    SelfWar(String),
}

/// Arena holding every territory, nation and faction of a session.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    territories: Vec<Territory>,
    nations: Vec<Nation>,
    factions: Vec<Faction>,
    territory_index: HashMap<String, TerritoryId>,
    nation_index: HashMap<String, NationId>,
    faction_index: HashMap<String, FactionId>,
}

impl WorldState {
    /// Creates a world with the given factions and no territories.
    pub fn new(factions: Vec<Faction>) -> Self {
        let faction_index = factions
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), FactionId(i)))
            .collect();
        WorldState {
            factions,
            faction_index,
            ..WorldState::default()
        }
    }

    /// Adds a territory and returns its id.
    pub fn push_territory(&mut self, territory: Territory) -> TerritoryId {
        let id = TerritoryId(self.territories.len());
        self.territory_index.insert(territory.name.clone(), id);
        self.territories.push(territory);
        id
    }

    /// Adds a nation and links its territories back to it.
    pub fn push_nation(&mut self, nation: Nation) -> NationId {
        let id = NationId(self.nations.len());
        for t in &nation.territories {
            self.territories[t.0].nation = Some(id);
        }
        self.nation_index.insert(nation.name.clone(), id);
        self.nations.push(nation);
        id
    }

    // ---- lookup ----

    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.0]
    }

    pub fn nation(&self, id: NationId) -> &Nation {
        &self.nations[id.0]
    }

    pub fn faction(&self, id: FactionId) -> &Faction {
        &self.factions[id.0]
    }

    pub fn territory_id(&self, name: &str) -> Option<TerritoryId> {
        self.territory_index.get(name).copied()
    }

    pub fn nation_id(&self, name: &str) -> Option<NationId> {
        self.nation_index.get(name).copied()
    }

    pub fn faction_id(&self, name: &str) -> Option<FactionId> {
        self.faction_index.get(name).copied()
    }

    pub fn territory_count(&self) -> usize {
        self.territories.len()
    }

    /// All territories with their ids, in arena order.
    pub fn territories(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories.iter().enumerate().map(|(i, t)| (TerritoryId(i), t))
    }

    pub fn nations(&self) -> impl Iterator<Item = (NationId, &Nation)> {
        self.nations.iter().enumerate().map(|(i, n)| (NationId(i), n))
    }

    pub fn factions(&self) -> impl Iterator<Item = (FactionId, &Faction)> {
        self.factions.iter().enumerate().map(|(i, f)| (FactionId(i), f))
    }

    pub fn territory_name(&self, id: TerritoryId) -> &str {
        &self.territories[id.0].name
    }

    // ---- mutations ----

    /// Gives `t` to `faction` and lifts any blockade. Taking a nation's
    /// capital clears that nation's influence markers.
    pub fn occupy(&mut self, t: TerritoryId, faction: FactionId) {
        let territory = &mut self.territories[t.0];
        territory.controller = Some(faction);
        territory.blockade = Blockade::None;
        if let Some(n) = territory.nation {
            let nation = &mut self.nations[n.0];
            if nation.capital == t {
                nation.influence.clear();
            }
        }
        debug!(
            territory = %self.territories[t.0].name,
            faction = %self.factions[faction.0].name,
            "occupy"
        );
    }

    /// Returns `t` to its neutral default, where ownership follows the nation.
    pub fn release(&mut self, t: TerritoryId) {
        self.territories[t.0].controller = None;
    }

    /// Places an influence marker for `faction` on nation `n`.
    ///
    /// A marker against another faction's influence removes one of theirs
    /// instead. The third marker occupies the capital.
    pub fn add_influence(&mut self, n: NationId, faction: FactionId) -> Result<(), StateError> {
        let nation = &self.nations[n.0];
        let capital = &self.territories[nation.capital.0];
        if capital.start.is_some() {
            return Err(StateError::NotNeutral(nation.name.clone()));
        }
        if capital.is_occupied() {
            return Err(StateError::CapitalOccupied(nation.name.clone()));
        }
        if nation.influence.len() >= MAX_INFLUENCE {
            return Err(StateError::InfluenceFull(nation.name.clone()));
        }

        let capital_id = nation.capital;
        let nation = &mut self.nations[n.0];
        match nation.influencer() {
            Some(other) if other != faction => {
                nation.influence.remove(0);
                debug!(nation = %nation.name, "influence shifted");
                return Ok(());
            }
            _ => nation.influence.push(faction),
        }
        if nation.influence.len() == MAX_INFLUENCE {
            self.occupy(capital_id, faction);
        }
        Ok(())
    }

    /// Removes one of `faction`'s markers from nation `n`.
    pub fn remove_influence(&mut self, n: NationId, faction: FactionId) -> Result<(), StateError> {
        let nation = &mut self.nations[n.0];
        match nation.influence.iter().rposition(|&f| f == faction) {
            Some(i) => {
                nation.influence.remove(i);
                Ok(())
            }
            None => Err(StateError::NoInfluence {
                nation: nation.name.clone(),
                faction: self.factions[faction.0].name.clone(),
            }),
        }
    }

    pub fn set_blockade(&mut self, t: TerritoryId, level: Blockade) {
        self.territories[t.0].blockade = level;
    }

    /// Records that `faction`'s submarines escaped into sea zone `t`.
    pub fn escape_submarine(
        &mut self,
        faction: FactionId,
        t: TerritoryId,
    ) -> Result<(), StateError> {
        let territory = &mut self.territories[t.0];
        if !territory.is_sea() {
            return Err(StateError::NotSea(territory.name.clone()));
        }
        if !territory.escaped_subs.contains(&faction) {
            territory.escaped_subs.push(faction);
        }
        Ok(())
    }

    /// Clears escaped submarines from `t`.
    pub fn clear_submarines(&mut self, t: TerritoryId) {
        self.territories[t.0].escaped_subs.clear();
    }

    /// Puts `a` and `b` at war with each other.
    pub fn declare_war(&mut self, a: FactionId, b: FactionId) -> Result<(), StateError> {
        if a == b {
            return Err(StateError::SelfWar(self.factions[a.0].name.clone()));
        }
        self.factions[a.0].enemies.insert(b);
        self.factions[b.0].enemies.insert(a);
        Ok(())
    }

    /// Ends any war between `a` and `b`.
    pub fn make_peace(&mut self, a: FactionId, b: FactionId) {
        self.factions[a.0].enemies.remove(&b);
        self.factions[b.0].enemies.remove(&a);
    }

    // ---- derived queries ----

    pub fn occupier(&self, t: TerritoryId) -> Option<FactionId> {
        self.territories[t.0].occupier()
    }

    pub fn is_occupied(&self, t: TerritoryId) -> bool {
        self.territories[t.0].is_occupied()
    }

    pub fn is_capital(&self, t: TerritoryId) -> bool {
        self.territories[t.0].is_capital()
    }

    pub fn is_main_capital(&self, t: TerritoryId) -> bool {
        self.territories[t.0].is_main_capital()
    }

    pub fn is_sub_capital(&self, t: TerritoryId) -> bool {
        self.territories[t.0].is_sub_capital()
    }

    /// Faction collecting nation `n`'s resources: the capital's occupier,
    /// else the influencing faction, else the capital's starting faction.
    pub fn resource_owner(&self, n: NationId) -> Option<FactionId> {
        let nation = &self.nations[n.0];
        let capital = &self.territories[nation.capital.0];
        capital
            .occupier()
            .or_else(|| nation.influencer())
            .or(capital.start)
    }

    /// Faction that owns `t`: its controller, else its nation's resource owner.
    pub fn owner(&self, t: TerritoryId) -> Option<FactionId> {
        let territory = &self.territories[t.0];
        territory
            .controller
            .or_else(|| territory.nation.and_then(|n| self.resource_owner(n)))
    }

    /// Control status of `t` relative to `faction`.
    pub fn status_for(&self, t: TerritoryId, faction: FactionId) -> ControlStatus {
        let territory = &self.territories[t.0];
        if territory.is_sea() {
            return ControlStatus::Open;
        }
        match self.owner(t) {
            Some(owner) if owner == faction => ControlStatus::Friendly,
            Some(owner) if self.factions[faction.0].is_at_war_with(owner) => ControlStatus::Enemy,
            Some(_) => ControlStatus::Rival,
            None if territory.nation.is_none() => ControlStatus::Open,
            None => ControlStatus::Neutral,
        }
    }

    /// The faction's own main and sub capitals that it still holds.
    pub fn capitals_of(&self, faction: FactionId) -> Vec<TerritoryId> {
        self.territories()
            .filter(|(id, t)| {
                t.is_capital()
                    && t.start == Some(faction)
                    && self.status_for(*id, faction) == ControlStatus::Friendly
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// The faction's main capital, whether or not it still holds it.
    pub fn main_capital_of(&self, faction: FactionId) -> Option<TerritoryId> {
        self.territories()
            .find(|(_, t)| t.is_main_capital() && t.start == Some(faction))
            .map(|(id, _)| id)
    }

    /// Land territories currently owned by `faction`.
    pub fn owned_by(&self, faction: FactionId) -> Vec<TerritoryId> {
        self.territories()
            .filter(|(id, t)| t.is_land() && self.owner(*id) == Some(faction))
            .map(|(id, _)| id)
            .collect()
    }

    /// Collectable yields over every territory `faction` owns.
    pub fn resources_for(&self, faction: FactionId) -> ResourceTotals {
        let mut totals = ResourceTotals::default();
        for t in self.owned_by(faction) {
            totals += self.territories[t.0].collectable();
        }
        totals
    }
}
