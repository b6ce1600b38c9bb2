//! blocksim engine library.
//!
//! Exposes the reference tables, the combat simulator, the territory model,
//! supply/trade reachability, and protocol modules for use by integration
//! tests and the binary entry points.

pub mod combat;
pub mod engine;
pub mod map;
pub mod protocol;
pub mod reach;
pub mod rules;
