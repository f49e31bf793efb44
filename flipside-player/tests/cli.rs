use assert_cmd::Command;
use flipside_othello::{Board, Location};
use flipside_player::GameState;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_state(dir: &Path, state: &GameState) -> std::path::PathBuf {
    let path = dir.join("state.txt");
    fs::write(&path, state.to_string()).unwrap();
    path
}

fn parse_action(text: &str) -> Location {
    let coords: Vec<usize> = text
        .split_whitespace()
        .map(|token| token.parse().unwrap())
        .collect();
    assert_eq!(coords.len(), 2, "action {:?}", text);
    Location::from_coords(coords[0], coords[1]).unwrap()
}

fn flipside() -> Command {
    Command::cargo_bin("flipside").unwrap()
}

#[test]
fn writes_a_legal_opening_move() {
    let dir = tempdir().unwrap();
    let state = write_state(dir.path(), &GameState::from_board(&Board::new()));
    let action = dir.path().join("action.txt");

    flipside().arg(&state).arg(&action).assert().success();

    let text = fs::read_to_string(&action).unwrap();
    assert!(text.ends_with('\n'));
    assert!(Board::new().legal_moves().contains(parse_action(&text)));
}

#[test]
fn exhaustive_flag_picks_same_move() {
    let dir = tempdir().unwrap();
    let state = write_state(dir.path(), &GameState::from_board(&Board::new()));
    let pruned = dir.path().join("pruned.txt");
    let full = dir.path().join("full.txt");

    flipside()
        .args(["--depth", "3"])
        .arg(&state)
        .arg(&pruned)
        .assert()
        .success();
    flipside()
        .args(["--depth", "3", "--exhaustive"])
        .arg(&state)
        .arg(&full)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&pruned).unwrap(),
        fs::read_to_string(&full).unwrap()
    );
}

#[test]
fn empty_move_list_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut game = GameState::from_board(&Board::new());
    game.legal_moves.clear();
    let state = write_state(dir.path(), &game);
    let action = dir.path().join("action.txt");

    flipside().arg(&state).arg(&action).assert().success();

    assert!(!action.exists());
}

#[test]
fn mismatched_moves_are_reported() {
    let dir = tempdir().unwrap();
    let mut game = GameState::from_board(&Board::new());
    game.legal_moves = vec![Location::from_coords(0, 0).unwrap()];
    let state = write_state(dir.path(), &game);
    let action = dir.path().join("action.txt");

    flipside()
        .arg(&state)
        .arg(&action)
        .assert()
        .success()
        .stderr(predicate::str::contains("disagree"));

    let mv = parse_action(&fs::read_to_string(&action).unwrap());
    assert!(Board::new().legal_moves().contains(mv));
}

#[test]
fn weights_file_is_used() {
    let dir = tempdir().unwrap();
    let state = write_state(dir.path(), &GameState::from_board(&Board::new()));
    let weights = dir.path().join("weights.json");
    fs::write(&weights, r#"{ "disc": 5, "mobility": 0.0 }"#).unwrap();
    let action = dir.path().join("action.txt");

    flipside()
        .arg("--weights")
        .arg(&weights)
        .arg(&state)
        .arg(&action)
        .assert()
        .success();

    assert!(action.exists());
}

#[test]
fn bad_weights_file_fails() {
    let dir = tempdir().unwrap();
    let state = write_state(dir.path(), &GameState::from_board(&Board::new()));
    let weights = dir.path().join("weights.json");
    fs::write(&weights, r#"{ "no_such_weight": 1 }"#).unwrap();

    flipside()
        .arg("--weights")
        .arg(&weights)
        .arg(&state)
        .arg(dir.path().join("action.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid weights file"));
}

#[test]
fn malformed_state_fails() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.txt");
    fs::write(&state, "1\n0 0 0\n").unwrap();
    let action = dir.path().join("action.txt");

    flipside()
        .arg(&state)
        .arg(&action)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of input"));

    assert!(!action.exists());
}

#[test]
fn missing_state_file_fails() {
    let dir = tempdir().unwrap();

    flipside()
        .arg(dir.path().join("absent.txt"))
        .arg(dir.path().join("action.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading state file"));
}

#[test]
fn presets_are_accepted() {
    let dir = tempdir().unwrap();
    let state = write_state(dir.path(), &GameState::from_board(&Board::new()));

    for preset in ["balanced", "classic", "edges", "greedy"] {
        let action = dir.path().join(format!("{}.txt", preset));
        flipside()
            .args(["--preset", preset, "--depth", "2"])
            .arg(&state)
            .arg(&action)
            .assert()
            .success();
        assert!(action.exists());
    }
}
