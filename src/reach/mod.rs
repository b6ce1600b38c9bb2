//! Supply and trade reachability over the territory graph.

pub mod search;
pub mod supply;
pub mod trade;

pub use search::{reachable, shortest_paths, Paths};
pub use supply::{can_supply_for, find_supplied_territories_for};
pub use trade::{can_trade_for, find_tradable_territories_for};
