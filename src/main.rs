//! Skirmish -- a grid-tactics combat engine implementing the SUI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the SUI (Skirmish Universal Interface) convention: a UI or
//! transport feeds it clicks and peer messages, and it emits the wire
//! messages to forward to the opponent.

use std::io::{self, BufRead};

use skirmish::engine::Engine;
use skirmish::protocol::parser::{parse_command, Command};

/// Runs the main SUI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Sui => {
                engine.handle_sui(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::SetPlayer { player } => {
                engine.set_player(player);
            }
            Command::NewMatch => {
                engine.new_match();
            }
            Command::Ready => {
                engine.handle_ready(&mut out);
            }
            Command::Click { col, row } => {
                engine.handle_click(col, row, &mut out);
            }
            Command::Peer { raw } => {
                engine.handle_peer(&raw, &mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
