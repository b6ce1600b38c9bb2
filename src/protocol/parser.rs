//! Command parser for the line protocol.
//!
//! Parses incoming commands from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use tracing::warn;

use crate::map::Blockade;

/// Battle setup passed with the `battle` command. Forces and technologies
/// stay in their compact encodings until the engine decodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleParams {
    pub attacker: String,
    pub defender: String,
    pub attacker_techs: String,
    pub defender_techs: String,
    pub attacker_order: String,
    pub defender_order: String,
    pub rounds: Option<usize>,
    pub sea_invasion: bool,
    pub dow: bool,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Identify the engine and list its options.
    Ident,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset the world to the initial map state.
    NewSession,

    /// Simulate a battle and report the outcome distribution.
    Battle(BattleParams),

    Occupy { faction: String, territory: String },
    Release { territory: String },
    Influence { faction: String, nation: String },
    SetBlockade { level: Blockade, territory: String },
    Escape { faction: String, sea: String },
    War { a: String, b: String },
    Peace { a: String, b: String },

    /// Report the supply set and paths of a faction.
    Supply { faction: String },

    /// Report the tradable territories of a faction.
    Trade { faction: String },

    /// Report the collectable yields of a faction.
    Resources { faction: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "ident" => Some(Command::Ident),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newsession" => Some(Command::NewSession),

        "setoption" => parse_setoption(&tokens),
        "battle" => parse_battle(args),

        "occupy" => {
            two(head, args).map(|(faction, territory)| Command::Occupy { faction, territory })
        }
        "influence" => {
            two(head, args).map(|(faction, nation)| Command::Influence { faction, nation })
        }
        "escape" => two(head, args).map(|(faction, sea)| Command::Escape { faction, sea }),
        "war" => two(head, args).map(|(a, b)| Command::War { a, b }),
        "peace" => two(head, args).map(|(a, b)| Command::Peace { a, b }),
        "blockade" => parse_blockade(args),

        "release" => one(head, args).map(|territory| Command::Release { territory }),
        "supply" => one(head, args).map(|faction| Command::Supply { faction }),
        "trade" => one(head, args).map(|faction| Command::Trade { faction }),
        "resources" => one(head, args).map(|faction| Command::Resources { faction }),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

fn one(head: &str, args: &[&str]) -> Option<String> {
    match args {
        [a] => Some(a.to_string()),
        _ => {
            warn!(command = head, "expected exactly one argument");
            None
        }
    }
}

fn two(head: &str, args: &[&str]) -> Option<(String, String)> {
    match args {
        [a, b] => Some((a.to_string(), b.to_string())),
        _ => {
            warn!(command = head, "expected exactly two arguments");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name, value) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value_parts = &tokens[vi + 1..];
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `blockade <none|med|full> <territory>`.
fn parse_blockade(args: &[&str]) -> Option<Command> {
    let (level, territory) = two("blockade", args)?;
    match Blockade::from_name(&level) {
        Some(level) => Some(Command::SetBlockade { level, territory }),
        None => {
            warn!(level = %level, "unknown blockade level");
            None
        }
    }
}

/// Parses `battle <blocksA> <blocksB> [atech <t>] [btech <t>] [aorder <o>]
/// [border <o>] [rounds <n>] [seainvasion] [dow]`.
fn parse_battle(args: &[&str]) -> Option<Command> {
    let [attacker, defender, rest @ ..] = args else {
        warn!("malformed battle: expected 'battle <attacker> <defender> [...]'");
        return None;
    };
    let mut params = BattleParams {
        attacker: attacker.to_string(),
        defender: defender.to_string(),
        ..BattleParams::default()
    };

    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "seainvasion" => params.sea_invasion = true,
            "dow" => params.dow = true,
            key @ ("atech" | "btech" | "aorder" | "border" | "rounds") => {
                i += 1;
                let Some(&value) = rest.get(i) else {
                    warn!(key, "missing value");
                    break;
                };
                match key {
                    "atech" => params.attacker_techs = value.to_string(),
                    "btech" => params.defender_techs = value.to_string(),
                    "aorder" => params.attacker_order = value.to_string(),
                    "border" => params.defender_order = value.to_string(),
                    _ => match value.parse::<usize>() {
                        Ok(n) => params.rounds = Some(n),
                        Err(_) => warn!(value, "invalid rounds value"),
                    },
                }
            }
            other => warn!(param = other, "unknown battle parameter"),
        }
        i += 1;
    }

    Some(Command::Battle(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("ident"), Some(Command::Ident));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newsession"), Some(Command::NewSession));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name Trials value 500"),
            Some(Command::SetOption {
                name: "Trials".to_string(),
                value: Some("500".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_command("setoption name Seed"),
            Some(Command::SetOption { name: "Seed".to_string(), value: None })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_battle_minimal() {
        let cmd = parse_command("battle WeTa3 AxIn4|AxIn4").unwrap();
        assert_eq!(
            cmd,
            Command::Battle(BattleParams {
                attacker: "WeTa3".to_string(),
                defender: "AxIn4|AxIn4".to_string(),
                ..BattleParams::default()
            })
        );
    }

    #[test]
    fn parse_battle_all_options() {
        let line = concat!(
            "battle AxIn4 SUIn3 atech HT|JE btech RA ",
            "aorder G border MAX rounds 3 seainvasion dow"
        );
        let cmd = parse_command(line).unwrap();
        let Command::Battle(p) = cmd else {
            panic!("expected battle");
        };
        assert_eq!(p.attacker_techs, "HT|JE");
        assert_eq!(p.defender_techs, "RA");
        assert_eq!(p.attacker_order, "G");
        assert_eq!(p.defender_order, "MAX");
        assert_eq!(p.rounds, Some(3));
        assert!(p.sea_invasion && p.dow);
    }

    #[test]
    fn parse_battle_tolerates_bad_parameters() {
        let line = "battle AxIn4 SUIn3 rounds x bogus atech";
        let Some(Command::Battle(p)) = parse_command(line) else {
            panic!("expected battle");
        };
        assert_eq!(p.rounds, None);
        assert!(p.attacker_techs.is_empty());
        assert_eq!(parse_command("battle AxIn4"), None);
    }

    #[test]
    fn parse_state_commands() {
        assert_eq!(
            parse_command("occupy Axis Paris"),
            Some(Command::Occupy { faction: "Axis".to_string(), territory: "Paris".to_string() })
        );
        assert_eq!(
            parse_command("influence West Spain"),
            Some(Command::Influence { faction: "West".to_string(), nation: "Spain".to_string() })
        );
        assert_eq!(
            parse_command("blockade med London"),
            Some(Command::SetBlockade { level: Blockade::Med, territory: "London".to_string() })
        );
        assert_eq!(parse_command("blockade half London"), None);
        assert_eq!(parse_command("occupy Axis"), None);
        assert_eq!(
            parse_command("release Paris"),
            Some(Command::Release {
                territory: "Paris".to_string()
            })
        );
        assert_eq!(
            parse_command("war Axis West"),
            Some(Command::War {
                a: "Axis".to_string(),
                b: "West".to_string()
            })
        );
    }

    #[test]
    fn parse_queries() {
        assert_eq!(
            parse_command("supply USSR"),
            Some(Command::Supply {
                faction: "USSR".to_string()
            })
        );
        assert_eq!(
            parse_command("trade West"),
            Some(Command::Trade {
                faction: "West".to_string()
            })
        );
        assert_eq!(
            parse_command("resources Axis"),
            Some(Command::Resources {
                faction: "Axis".to_string()
            })
        );
        assert_eq!(parse_command("supply"), None);
    }
}
