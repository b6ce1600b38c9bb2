//! Engine state management.
//!
//! Holds the reference tables, the tracked world state with its adjacency
//! graph, and the engine options. Battles are simulated on demand from
//! encoded forces; world commands mutate the tracked state one at a time.

use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::combat::{simulate, CombatRound, OutcomeSummary, Side, SimulationConfig};
use crate::map::{
    Adjacency, Blockade, FactionId, MapData, NationId, StateError, TerritoryId, WorldState,
};
use crate::protocol::encoding::decode_force;
use crate::protocol::parser::BattleParams;
use crate::reach::{find_supplied_territories_for, find_tradable_territories_for};
use crate::rules::{DataError, Rules};

/// Default number of combat rounds per battle.
const DEFAULT_ROUNDS: usize = 1;

/// Errors raised while executing a command. The world is left unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown faction '{0}'")]
    UnknownFaction(String),

    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("unknown nation '{0}'")]
    UnknownNation(String),

    #[error("{0} force has no valid blocks")]
    EmptyForce(&'static str),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub rules: Rules,
    pub map: MapData,
    pub world: WorldState,
    pub adjacency: Adjacency,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine over the bundled rules and demo map.
    pub fn new() -> Result<Self, EngineError> {
        Engine::with_data(Rules::standard()?, MapData::demo()?)
    }

    /// Creates an engine over caller-supplied tables.
    pub fn with_data(rules: Rules, map: MapData) -> Result<Self, EngineError> {
        let world = WorldState::from_map(&map)?;
        let adjacency = Adjacency::from_map(&map);
        Ok(Engine {
            rules,
            map,
            world,
            adjacency,
            options: HashMap::new(),
        })
    }

    /// Restores the world to the map's initial state. Options are kept.
    pub fn new_session(&mut self) -> Result<(), EngineError> {
        self.world = WorldState::from_map(&self.map)?;
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the option parsed as `T`, or `default` if unset or invalid.
    fn option<T: FromStr>(&self, name: &str, default: T) -> T {
        self.options
            .get(name)
            .and_then(|v| v.parse::<T>().ok())
            .unwrap_or(default)
    }

    /// Simulation settings from the `Trials`, `Threads` and `Seed` options.
    pub fn simulation_config(&self) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        SimulationConfig {
            trials: self.option("Trials", defaults.trials),
            threads: self.option("Threads", defaults.threads).max(1),
            seed: self.option("Seed", defaults.seed),
        }
    }

    /// Rounds per battle from the `Rounds` option.
    pub fn default_rounds(&self) -> usize {
        self.option("Rounds", DEFAULT_ROUNDS)
    }

    /// Handles the handshake: writes id, options, and identok.
    pub fn handle_ident<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "id name blocksim")?;
        writeln!(out, "id author blocksim")?;
        writeln!(out, "option name Trials type spin default 1000 min 1 max 1000000")?;
        writeln!(out, "option name Threads type spin default 4 min 1 max 64")?;
        writeln!(out, "option name Seed type string default 0")?;
        writeln!(out, "option name Rounds type spin default {} min 1 max 100", DEFAULT_ROUNDS)?;
        writeln!(out, "identok")?;
        out.flush()?;
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "readyok")?;
        out.flush()?;
        Ok(())
    }

    /// Decodes both forces and simulates the battle.
    pub fn battle(&self, params: &BattleParams) -> Result<OutcomeSummary, EngineError> {
        let attacker = decode_force(
            &self.rules,
            "attacker",
            &params.attacker,
            &params.attacker_techs,
            &params.attacker_order,
        )
        .ok_or(EngineError::EmptyForce("attacker"))?;
        let defender = decode_force(
            &self.rules,
            "defender",
            &params.defender,
            &params.defender_techs,
            &params.defender_order,
        )
        .ok_or(EngineError::EmptyForce("defender"))?;

        let mut first = CombatRound::new(Side::A);
        if params.sea_invasion {
            first = first.with_sea_invasion();
        }
        if params.dow {
            first = first.with_dow();
        }
        let count = params.rounds.unwrap_or_else(|| self.default_rounds());
        let rounds = CombatRound::sequence(count, first);

        let config = self.simulation_config();
        let results = simulate(&self.rules, &attacker, &defender, &rounds, &config);
        Ok(OutcomeSummary::from_trials(&attacker, &defender, &results))
    }

    /// Handles `battle`: writes `outcome <json>`.
    pub fn handle_battle<W: Write>(
        &self,
        params: &BattleParams,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let summary = self.battle(params)?;
        writeln!(out, "outcome {}", serde_json::to_string(&summary)?)?;
        out.flush()?;
        Ok(())
    }

    fn faction_id(&self, name: &str) -> Result<FactionId, EngineError> {
        self.world
            .faction_id(name)
            .ok_or_else(|| EngineError::UnknownFaction(name.to_string()))
    }

    fn territory_id(&self, name: &str) -> Result<TerritoryId, EngineError> {
        self.world
            .territory_id(name)
            .ok_or_else(|| EngineError::UnknownTerritory(name.to_string()))
    }

    fn nation_id(&self, name: &str) -> Result<NationId, EngineError> {
        self.world
            .nation_id(name)
            .ok_or_else(|| EngineError::UnknownNation(name.to_string()))
    }

    fn names(&self, ids: impl IntoIterator<Item = TerritoryId>) -> Vec<&str> {
        ids.into_iter().map(|t| self.world.territory_name(t)).collect()
    }

    pub fn occupy(&mut self, faction: &str, territory: &str) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let t = self.territory_id(territory)?;
        self.world.occupy(t, f);
        Ok(())
    }

    pub fn release(&mut self, territory: &str) -> Result<(), EngineError> {
        let t = self.territory_id(territory)?;
        self.world.release(t);
        Ok(())
    }

    pub fn influence(&mut self, faction: &str, nation: &str) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let n = self.nation_id(nation)?;
        self.world.add_influence(n, f)?;
        Ok(())
    }

    pub fn set_blockade(&mut self, level: Blockade, territory: &str) -> Result<(), EngineError> {
        let t = self.territory_id(territory)?;
        self.world.set_blockade(t, level);
        Ok(())
    }

    pub fn escape(&mut self, faction: &str, sea: &str) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let t = self.territory_id(sea)?;
        self.world.escape_submarine(f, t)?;
        Ok(())
    }

    pub fn war(&mut self, a: &str, b: &str) -> Result<(), EngineError> {
        let (a, b) = (self.faction_id(a)?, self.faction_id(b)?);
        self.world.declare_war(a, b)?;
        Ok(())
    }

    pub fn peace(&mut self, a: &str, b: &str) -> Result<(), EngineError> {
        let (a, b) = (self.faction_id(a)?, self.faction_id(b)?);
        self.world.make_peace(a, b);
        Ok(())
    }

    /// Handles `supply`: one `path` line per supplied territory, then the set.
    pub fn handle_supply<W: Write>(&self, faction: &str, out: &mut W) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let paths = find_supplied_territories_for(f, &self.world, &self.adjacency);
        for (&target, path) in &paths {
            writeln!(
                out,
                "path {} {}",
                self.world.territory_name(target),
                self.names(path.iter().copied()).join(" ")
            )?;
        }
        writeln!(out, "supply {}", self.names(paths.keys().copied()).join(" "))?;
        out.flush()?;
        info!(faction, supplied = paths.len(), "supply reported");
        Ok(())
    }

    /// Handles `trade`: writes the tradable set.
    pub fn handle_trade<W: Write>(&self, faction: &str, out: &mut W) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let tradable = find_tradable_territories_for(f, &self.world, &self.adjacency);
        writeln!(out, "trade {}", self.names(tradable).join(" "))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `resources`: writes the faction's collectable yields.
    pub fn handle_resources<W: Write>(
        &self,
        faction: &str,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let f = self.faction_id(faction)?;
        let totals = self.world.resources_for(f);
        writeln!(
            out,
            "resources population {} resources {} trans_africa {}",
            totals.population, totals.resources, totals.trans_africa
        )?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new().unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), EngineError>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_no_options() {
        let engine = engine();
        assert!(engine.options.is_empty());
        assert_eq!(engine.simulation_config(), SimulationConfig::default());
        assert_eq!(engine.default_rounds(), 1);
    }

    #[test]
    fn options_feed_simulation_config() {
        let mut engine = engine();
        engine.set_option("Trials".to_string(), Some("50".to_string()));
        engine.set_option("Threads".to_string(), Some("0".to_string()));
        engine.set_option("Seed".to_string(), Some("nonsense".to_string()));
        let config = engine.simulation_config();
        assert_eq!(config.trials, 50);
        assert_eq!(config.threads, 1);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn handle_ident_outputs_handshake() {
        let engine = engine();
        let text = output(|out| engine.handle_ident(out));
        assert!(text.contains("id name blocksim"));
        assert!(text.contains("option name Trials"));
        assert!(text.trim_end().ends_with("identok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = engine();
        assert_eq!(output(|out| engine.handle_isready(out)).trim(), "readyok");
    }

    #[test]
    fn battle_reports_every_trial() {
        let mut engine = engine();
        engine.set_option("Trials".to_string(), Some("20".to_string()));
        engine.set_option("Seed".to_string(), Some("3".to_string()));
        let params = BattleParams {
            attacker: "WeTa3".to_string(),
            defender: "AxIn4|AxIn4".to_string(),
            ..BattleParams::default()
        };
        let summary = engine.battle(&params).unwrap();
        assert_eq!(summary.trials, 20);
        assert_eq!(
            summary.attacker_wins + summary.defender_wins + summary.mutual + summary.undecided,
            20
        );
        let text = output(|out| engine.handle_battle(&params, out));
        assert!(text.starts_with("outcome {"));
    }

    #[test]
    fn battle_rejects_empty_forces() {
        let engine = engine();
        let params = BattleParams {
            attacker: "Zz9".to_string(),
            defender: "AxIn4".to_string(),
            ..BattleParams::default()
        };
        assert!(matches!(engine.battle(&params), Err(EngineError::EmptyForce("attacker"))));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut engine = engine();
        assert!(matches!(engine.occupy("Martians", "Paris"), Err(EngineError::UnknownFaction(_))));
        assert!(matches!(engine.occupy("Axis", "Atlantis"), Err(EngineError::UnknownTerritory(_))));
        assert!(matches!(engine.influence("Axis", "Narnia"), Err(EngineError::UnknownNation(_))));
    }

    #[test]
    fn new_session_restores_initial_world() {
        let mut engine = engine();
        engine.occupy("Axis", "Paris").unwrap();
        engine.war("Axis", "West").unwrap();
        engine.new_session().unwrap();
        let paris = engine.world.territory_id("Paris").unwrap();
        assert_eq!(engine.world.territory(paris).controller, None);
        let axis = engine.world.faction_id("Axis").unwrap();
        assert!(!engine.world.faction(axis).has_enemies());
    }

    #[test]
    fn supply_lists_paths_then_set() {
        let engine = engine();
        let text = output(|out| engine.handle_supply("USSR", out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.last(), Some(&"supply Moscow Kiev Istanbul BlackSea EastMed"));
        assert!(lines.contains(&"path EastMed Moscow Kiev BlackSea Istanbul EastMed"));
    }

    #[test]
    fn resources_line() {
        let mut engine = engine();
        engine.set_blockade(Blockade::Med, "London").unwrap();
        let text = output(|out| engine.handle_resources("West", out));
        assert_eq!(text.trim(), "resources population 13 resources 6 trans_africa 9");
    }
}
