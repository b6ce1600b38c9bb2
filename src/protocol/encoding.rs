//! Compact text encodings for force composition and technologies.
//!
//! A block is written as `<nation code><unit code><strength>`, e.g. `WeTa3`
//! for a West tank at strength 3, and blocks are joined with `|`.
//! Technologies are written as their codes joined with `|`.
//!
//! Decoding is lenient: tokens that cannot be resolved against the rules
//! are dropped with a warning and the rest of the string still decodes.

use tracing::warn;

use crate::combat::force::{Block, Force, TargetOrder};
use crate::rules::Rules;

/// Separator between tokens in both encodings.
pub const SEPARATOR: char = '|';

/// Encodes blocks. Blocks whose nation or unit is unknown are skipped.
pub fn blocks_to_string(rules: &Rules, blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|b| {
            let nation = rules.nation(&b.nation)?;
            let unit = rules.unit(&b.unit)?;
            Some(format!("{}{}{}", nation.code, unit.code, b.strength))
        })
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Decodes one `<nation><unit><strength>` token.
///
/// The unit must be on the nation's roster. Strength is capped at the
/// nation's maximum for that unit.
pub fn parse_block(rules: &Rules, token: &str) -> Option<Block> {
    let digits_at = token.find(|c: char| c.is_ascii_digit())?;
    let (prefix, digits) = token.split_at(digits_at);
    let strength: u32 = digits.parse().ok()?;
    if strength == 0 {
        return None;
    }

    // Codes have no fixed width, so try every split of the prefix.
    (1..prefix.len()).filter(|&i| prefix.is_char_boundary(i)).find_map(|i| {
        let (nation_code, unit_code) = prefix.split_at(i);
        let nation = rules.nation_by_code(nation_code)?;
        let unit = rules.unit_by_code(unit_code)?;
        if !nation.allows(&unit.name) {
            return None;
        }
        let strength = strength.min(nation.max_pips(&unit.name));
        Some(Block::new(&unit.name, strength, &nation.name))
    })
}

/// Decodes a `|`-separated block string, dropping malformed tokens.
pub fn string_to_blocks(rules: &Rules, s: &str) -> Vec<Block> {
    s.split(SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|token| {
            let block = parse_block(rules, token);
            if block.is_none() {
                warn!(token, "dropping malformed block token");
            }
            block
        })
        .collect()
}

/// Encodes technology names as codes. Unknown names are skipped.
pub fn techs_to_string(rules: &Rules, techs: &[String]) -> String {
    techs
        .iter()
        .filter_map(|name| rules.tech(name).map(|t| t.code.as_str()))
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Decodes technology codes into names, dropping unknown codes.
pub fn string_to_techs(rules: &Rules, s: &str) -> Vec<String> {
    s.split(SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|code| match rules.tech_by_code(code) {
            Some(tech) => Some(tech.name.clone()),
            None => {
                warn!(code, "dropping unknown technology code");
                None
            }
        })
        .collect()
}

/// Builds a force from its encoded blocks, technologies and attack order.
///
/// The force takes the nation of its first block. Returns `None` when no
/// block survives decoding.
pub fn decode_force(
    rules: &Rules,
    name: &str,
    blocks: &str,
    techs: &str,
    order: &str,
) -> Option<Force> {
    let blocks = string_to_blocks(rules, blocks);
    let nation = blocks.first()?.nation.clone();
    let mut force = Force::new(name, &nation).with_blocks(blocks);
    force.technologies = string_to_techs(rules, techs);
    if !order.is_empty() {
        let parsed = TargetOrder::parse_list(order);
        if parsed.is_empty() {
            warn!(order, "ignoring unreadable attack order");
        } else {
            force.attack_order = parsed;
        }
    }
    Some(force)
}
