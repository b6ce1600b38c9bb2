//! Text protocol handling.
//!
//! This module implements the compact block and technology encodings used
//! to share battle setups, and the command parser for the main loop.

pub mod encoding;
pub mod parser;

pub use encoding::{
    blocks_to_string, decode_force, parse_block, string_to_blocks, string_to_techs, techs_to_string,
};
pub use parser::{parse_command, BattleParams, Command};
