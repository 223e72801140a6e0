//! Integration tests for the skirmish engine binary.
//!
//! Tests the full SUI protocol session flow by spawning the engine
//! process, sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use skirmish::snapshot::MatchSnapshot;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_skirmish");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start skirmish");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Returns the `send ...` lines, stripped of the prefix.
fn sent_messages(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("send "))
        .collect()
}

#[test]
fn sui_handshake_with_protocol_version() {
    let lines = run_engine(&["sui", "quit"]);

    assert!(lines.iter().any(|l| l == "id name skirmish"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));
    assert!(lines.iter().any(|l| l == "suiok"));

    // suiok must close the handshake.
    let suiok_idx = lines.iter().position(|l| l == "suiok").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < suiok_idx, "protocol_version must appear before suiok");
}

#[test]
fn sui_handshake_includes_board_options() {
    let lines = run_engine(&["sui", "quit"]);
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 2);
    assert!(option_lines.iter().any(|l| l.contains("name Cols")));
    assert!(option_lines.iter().any(|l| l.contains("name Rows")));
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert!(lines.contains(&"readyok".to_string()));
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "isready", "quit"]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], "readyok");
}

#[test]
fn ready_exchange_announces_match_start() {
    let lines = run_engine(&[
        "setplayer 1",
        "newmatch",
        "ready",
        "peer ready 2",
        "quit",
    ]);
    assert_eq!(sent_messages(&lines), vec!["ready 1"]);
    assert!(lines.contains(&"info match started turn 1".to_string()));
}

#[test]
fn clicks_before_ready_produce_no_output() {
    let lines = run_engine(&["setplayer 1", "newmatch", "click 0 0", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn first_turn_flow_over_the_wire() {
    let lines = run_engine(&[
        "setplayer 1",
        "newmatch",
        "ready",
        "peer ready 2",
        // Select the light unit and step it two columns right; no enemy
        // is in reach, so the turn ends immediately.
        "click 0 0",
        "click 2 0",
        "quit",
    ]);
    assert!(lines.contains(&"info selected 1".to_string()));
    assert_eq!(sent_messages(&lines), vec!["ready 1", "move 1 2 0", "turn 2"]);
}

#[test]
fn malformed_peer_lines_are_tolerated() {
    let lines = run_engine(&[
        "setplayer 1",
        "newmatch",
        "ready",
        "peer ready 2",
        "peer fortify 1",
        "peer move 7 1",
        "click 0 0",
        "quit",
    ]);
    // The session survives and keeps taking clicks.
    assert!(lines.contains(&"info selected 1".to_string()));
}

#[test]
fn scripted_match_to_gameover() {
    let lines = run_engine(&[
        "setplayer 1",
        "newmatch",
        "ready",
        "peer ready 2",
        // The opponent's light and medium units have already fallen and
        // its heavy unit hangs on at 1 health.
        "peer attack 4 5",
        "peer attack 5 8",
        "peer attack 6 9",
        // Our medium unit marches toward the enemy heavy at (7,7).
        "click 0 4",
        "click 3 7",
        "peer turn 1",
        "click 3 7",
        "click 6 7",
        // Landing beside the target offers the attack; take it.
        "click 7 7",
        "state",
        "quit",
    ]);

    assert_eq!(
        sent_messages(&lines),
        vec![
            "ready 1",
            "move 2 3 7",
            "turn 2",
            "move 2 6 7",
            "attack 6 2",
            "turn 2",
            "gameover 1",
        ]
    );
    assert!(lines.contains(&"info phase attacking".to_string()));

    let state_line = lines
        .iter()
        .find_map(|l| l.strip_prefix("state "))
        .expect("state line");
    let snapshot: MatchSnapshot = serde_json::from_str(state_line).unwrap();
    assert!(snapshot.game_over);
    assert_eq!(snapshot.winner, Some(1));
    // The fallen units have no board position.
    for unit in snapshot.units.iter().filter(|u| u.unit >= 4) {
        assert_eq!(unit.health, 0);
        assert_eq!(unit.position, None);
    }
}

#[test]
fn state_snapshot_of_fresh_match() {
    let lines = run_engine(&["setplayer 1", "newmatch", "state", "quit"]);
    let state_line = lines
        .iter()
        .find_map(|l| l.strip_prefix("state "))
        .expect("state line");
    let snapshot: MatchSnapshot = serde_json::from_str(state_line).unwrap();
    assert_eq!(snapshot.cols, 8);
    assert_eq!(snapshot.rows, 8);
    assert_eq!(snapshot.ready, [false, false]);
    assert_eq!(snapshot.turn_owner, 1);
    assert_eq!(snapshot.units.len(), 6);
    assert!(snapshot.units.iter().all(|u| u.position.is_some()));
}

#[test]
fn configured_board_dimensions_apply_to_the_next_match() {
    let lines = run_engine(&[
        "setoption name Cols value 12",
        "setoption name Rows value 6",
        "setplayer 2",
        "newmatch",
        "state",
        "quit",
    ]);
    let state_line = lines
        .iter()
        .find_map(|l| l.strip_prefix("state "))
        .expect("state line");
    let snapshot: MatchSnapshot = serde_json::from_str(state_line).unwrap();
    assert_eq!(snapshot.cols, 12);
    assert_eq!(snapshot.rows, 6);
    // Player 2's units sit on the right edge of the wider board.
    let p2_light = snapshot.units.iter().find(|u| u.unit == 4).unwrap();
    assert_eq!(p2_light.position.map(|c| (c.col, c.row)), Some((11, 0)));
}
