//! blocksim -- a block-wargame battle simulator and supply tracker.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics and command errors go to stderr.

use std::io::{self, BufRead};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use blocksim::engine::{Engine, EngineError};
use blocksim::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut engine = match Engine::new() {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "failed to load bundled data");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result: Result<(), EngineError> = match cmd {
            Command::Ident => engine.handle_ident(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewSession => engine.new_session(),
            Command::Battle(params) => engine.handle_battle(&params, &mut out),
            Command::Occupy { faction, territory } => engine.occupy(&faction, &territory),
            Command::Release { territory } => engine.release(&territory),
            Command::Influence { faction, nation } => engine.influence(&faction, &nation),
            Command::SetBlockade { level, territory } => engine.set_blockade(level, &territory),
            Command::Escape { faction, sea } => engine.escape(&faction, &sea),
            Command::War { a, b } => engine.war(&a, &b),
            Command::Peace { a, b } => engine.peace(&a, &b),
            Command::Supply { faction } => engine.handle_supply(&faction, &mut out),
            Command::Trade { faction } => engine.handle_trade(&faction, &mut out),
            Command::Resources { faction } => engine.handle_resources(&faction, &mut out),
            Command::Quit => break,
        };

        match result {
            Ok(()) => {}
            Err(EngineError::Io(e)) => {
                error!(error = %e, "output closed");
                return ExitCode::FAILURE;
            }
            Err(e) => error!(command = %line.trim(), error = %e, "command rejected"),
        }
    }
    ExitCode::SUCCESS
}
