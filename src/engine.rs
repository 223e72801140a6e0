//! Engine session management.
//!
//! Holds the engine options, the local player assignment, and the live
//! match session (grid, units, match state, turn machine). Dispatches
//! protocol commands, enforces the turn-ownership boundary before the
//! state machine sees a click, and emits outgoing wire messages as
//! `send` lines on the output sink.

use std::collections::HashMap;
use std::io::Write;

use crate::board::{Cell, Grid, MatchState, Player, Roster, ALL_UNITS};
use crate::protocol::wire::{self, Message};
use crate::rules;
use crate::snapshot::MatchSnapshot;
use crate::turn::{ClickOutcome, TurnEngine};

/// Default board dimensions.
const DEFAULT_COLS: u16 = 8;
const DEFAULT_ROWS: u16 = 8;

/// Board dimension bounds advertised in the handshake.
const MIN_DIM: u16 = 4;
const MAX_DIM: u16 = 32;

/// One live match: play-state views plus the authoritative match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSession {
    pub grid: Grid,
    pub roster: Roster,
    pub state: MatchState,
    pub turn: TurnEngine,
}

impl MatchSession {
    /// Creates a session with all six units deployed on the starting
    /// layout.
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut grid = Grid::new(cols, rows);
        let mut roster = Roster::new();
        for id in ALL_UNITS {
            let cell = id.starting_cell(cols, rows);
            roster.get_mut(id).position = Some(cell);
            grid.set_occupant(cell, Some(id));
        }
        MatchSession {
            grid,
            roster,
            state: MatchState::new(cols, rows),
            turn: TurnEngine::new(),
        }
    }
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: Option<MatchSession>,
    pub local_player: Option<Player>,
    pub options: HashMap<String, String>,
}

fn send<W: Write>(out: &mut W, msg: &Message) {
    writeln!(out, "send {}", wire::format_message(msg)).unwrap();
}

impl Engine {
    /// Creates a new engine with no match or player assignment.
    pub fn new() -> Self {
        Engine {
            session: None,
            local_player: None,
            options: HashMap::new(),
        }
    }

    /// Handles the SUI handshake: writes id, options, protocol_version,
    /// and suiok.
    pub fn handle_sui<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name skirmish").unwrap();
        writeln!(out, "id author skirmish").unwrap();
        writeln!(
            out,
            "option name Cols type spin default {} min {} max {}",
            DEFAULT_COLS, MIN_DIM, MAX_DIM
        )
        .unwrap();
        writeln!(
            out,
            "option name Rows type spin default {} min {} max {}",
            DEFAULT_ROWS, MIN_DIM, MAX_DIM
        )
        .unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "suiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Declares which side this session plays.
    pub fn set_player(&mut self, player: Player) {
        self.local_player = Some(player);
    }

    /// Returns a board dimension from options, clamped to the advertised
    /// range.
    fn board_dim(&self, name: &str, default: u16) -> u16 {
        self.options
            .get(name)
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(default)
            .clamp(MIN_DIM, MAX_DIM)
    }

    /// Starts a fresh match using the configured board dimensions. The
    /// player assignment carries over.
    pub fn new_match(&mut self) {
        let cols = self.board_dim("Cols", DEFAULT_COLS);
        let rows = self.board_dim("Rows", DEFAULT_ROWS);
        self.session = Some(MatchSession::new(cols, rows));
    }

    /// Marks the local player ready and announces it to the peer.
    pub fn handle_ready<W: Write>(&mut self, out: &mut W) {
        let local = match self.local_player {
            Some(p) => p,
            None => {
                eprintln!("ready: no local player set");
                return;
            }
        };
        let session = match &mut self.session {
            Some(s) => s,
            None => {
                eprintln!("ready: no match in progress");
                return;
            }
        };

        session.state.set_ready(local);
        send(out, &Message::Ready { player: local });
        if session.state.all_ready() {
            writeln!(
                out,
                "info match started turn {}",
                session.state.turn_owner().wire_id()
            )
            .unwrap();
        }
        out.flush().unwrap();
    }

    /// Feeds a click at a grid cell through the turn machine.
    ///
    /// The ownership boundary lives here: clicks before the match starts,
    /// after it is decided, or out of turn never reach the state machine.
    pub fn handle_click<W: Write>(&mut self, col: u16, row: u16, out: &mut W) {
        let local = match self.local_player {
            Some(p) => p,
            None => {
                eprintln!("click: no local player set");
                return;
            }
        };
        let session = match &mut self.session {
            Some(s) => s,
            None => {
                eprintln!("click: no match in progress");
                return;
            }
        };
        if !session.state.all_ready() {
            eprintln!("click: match not started");
            return;
        }
        if session.state.game_over() {
            eprintln!("click: match is over");
            return;
        }
        if !session.state.is_players_turn(local) {
            eprintln!("click: not your turn");
            return;
        }

        let cell = Cell::new(col, row);
        if !session.grid.contains(cell) {
            // The input mapper only produces on-board cells; tolerate
            // anything else silently.
            return;
        }

        let outcome = session.turn.handle_click(
            local,
            cell,
            &mut session.roster,
            &mut session.grid,
            &mut session.state,
        );
        match outcome {
            ClickOutcome::Ignored => {}
            ClickOutcome::Selected(id) => {
                writeln!(out, "info selected {}", id.wire_id()).unwrap();
            }
            ClickOutcome::MoveCancelled => {
                writeln!(out, "info move cancelled").unwrap();
            }
            ClickOutcome::MoveRejected => {
                writeln!(out, "info illegal move").unwrap();
            }
            ClickOutcome::Moved {
                unit,
                dest,
                attack_offered,
            } => {
                send(out, &Message::Move { unit, dest });
                if attack_offered {
                    writeln!(out, "info phase attacking").unwrap();
                } else {
                    self.announce_turn_end(out);
                }
            }
            ClickOutcome::Attacked(report) => {
                send(
                    out,
                    &Message::Attack {
                        target: report.target,
                        damage: report.damage,
                    },
                );
                self.announce_turn_end(out);
            }
            ClickOutcome::AttackForfeited => {
                self.announce_turn_end(out);
            }
        }
        out.flush().unwrap();
    }

    /// Announces the turn handoff and, when the match was just decided,
    /// the result.
    fn announce_turn_end<W: Write>(&mut self, out: &mut W) {
        let session = match &self.session {
            Some(s) => s,
            None => return,
        };
        send(
            out,
            &Message::TurnChanged {
                player: session.state.turn_owner(),
            },
        );
        if let Some(winner) = session.state.winner() {
            send(out, &Message::GameOver { winner });
        }
    }

    /// Applies a wire message received from the peer.
    pub fn handle_peer<W: Write>(&mut self, raw: &str, out: &mut W) {
        let msg = match wire::parse_message(raw) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("peer: {}", e);
                return;
            }
        };
        let session = match &mut self.session {
            Some(s) => s,
            None => {
                eprintln!("peer: no match in progress");
                return;
            }
        };

        match msg {
            Message::Ready { player } => {
                session.state.set_ready(player);
                if session.state.all_ready() {
                    writeln!(
                        out,
                        "info match started turn {}",
                        session.state.turn_owner().wire_id()
                    )
                    .unwrap();
                }
            }
            Message::Move { unit, dest } => {
                if !session.grid.contains(dest) {
                    eprintln!("peer: move off the board");
                    return;
                }
                if !session.roster.get(unit).is_alive() {
                    eprintln!("peer: move for a dead unit");
                    return;
                }
                rules::apply_move(session.roster.get_mut(unit), dest, &mut session.grid);
                session.state.record_move(unit, dest);
            }
            Message::Attack { target, damage } => {
                rules::apply_damage_to(session.roster.get_mut(target), damage, &mut session.grid);
                session.state.record_attack(target, damage);
                session.state.determine_game_over();
            }
            Message::TurnChanged { player } => {
                session.state.set_turn_owner(player);
                writeln!(out, "info turn {}", player.wire_id()).unwrap();
            }
            Message::GameOver { winner } => {
                session.state.determine_game_over();
                writeln!(out, "info gameover winner {}", winner.wire_id()).unwrap();
            }
        }
        out.flush().unwrap();
    }

    /// Prints the current session state as one JSON line.
    pub fn handle_state<W: Write>(&self, out: &mut W) {
        let session = match &self.session {
            Some(s) => s,
            None => {
                eprintln!("state: no match in progress");
                return;
            }
        };
        let snapshot = MatchSnapshot::capture(session);
        writeln!(out, "state {}", serde_json::to_string(&snapshot).unwrap()).unwrap();
        out.flush().unwrap();
    }
}
