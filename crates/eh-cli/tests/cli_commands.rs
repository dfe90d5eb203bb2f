//! Integration tests for the eaglehill CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn eaglehill() -> Command {
    let mut cmd = Command::cargo_bin("eaglehill").unwrap();
    cmd.env_remove("EAGLEHILL_LOG");
    cmd
}

fn play(save: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    eaglehill()
        .arg("play")
        .arg("--save-dir")
        .arg(save.path())
        .write_stdin(input)
        .assert()
}

fn save_file(save: &TempDir) -> std::path::PathBuf {
    save.path().join("phantom_eagle_hill_save.json")
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_shows_intro_and_start() {
    let save = TempDir::new().unwrap();
    play(&save, "quit\n")
        .success()
        .stdout(predicate::str::contains("The Phantom of Eagle Hill"))
        .stdout(predicate::str::contains("Dorm Room"))
        .stdout(predicate::str::contains("You found: Ski Goggles!"))
        .stdout(predicate::str::contains("1. Go to Ski Lodge"));
    assert!(save_file(&save).exists());
}

#[test]
fn play_moves_and_collects() {
    let save = TempDir::new().unwrap();
    play(&save, "1\ni\n")
        .success()
        .stdout(predicate::str::contains("Ski Lodge"))
        .stdout(predicate::str::contains("You found: Torn Crimson Fabric!"))
        .stdout(predicate::str::contains("Ski Goggles"));
}

#[test]
fn play_reports_locked_door() {
    let save = TempDir::new().unwrap();
    // Ski Lodge, then Frozen Pond, then the shed without its key.
    play(&save, "1\n3\n2\n")
        .success()
        .stdout(predicate::str::contains("needs an old iron key"));
}

#[test]
fn play_solves_the_mystery() {
    let save = TempDir::new().unwrap();
    // The Rock, Ski Lodge, Frozen Pond, Old Equipment Shed, accuse the coach.
    play(&save, "2\n3\n3\n2\n2\n")
        .success()
        .stdout(predicate::str::contains("You found: Shed Key!"))
        .stdout(predicate::str::contains("Who is the culprit?"))
        .stdout(predicate::str::contains("Case closed!"))
        .stdout(predicate::str::contains("The Eagle Trophy is safe"));
    let saved = fs::read_to_string(save_file(&save)).unwrap();
    assert!(saved.contains("COACH_THORNTON"));
}

#[test]
fn play_uses_world_victory_text() {
    let output = eaglehill().args(["world", "--json"]).output().unwrap();
    let mut world: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    world["victory"] = "The lift reopens at dawn.".into();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, world.to_string()).unwrap();

    let save = TempDir::new().unwrap();
    eaglehill()
        .arg("play")
        .arg("--save-dir")
        .arg(save.path())
        .arg("--world")
        .arg(&path)
        .write_stdin("2\n3\n3\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Case closed!"))
        .stdout(predicate::str::contains("The lift reopens at dawn."))
        .stdout(predicate::str::contains("Eagle Trophy is safe").not());
}

#[test]
fn play_wrong_accusation_keeps_playing() {
    let save = TempDir::new().unwrap();
    play(&save, "2\n3\n3\n2\n1\nevidence\n")
        .success()
        .stdout(predicate::str::contains("That doesn't seem right"))
        .stdout(predicate::str::contains("Marcus Chen"))
        .stdout(predicate::str::contains("clues found"));
}

#[test]
fn play_resumes_saved_progress() {
    let save = TempDir::new().unwrap();
    play(&save, "1\nquit\n").success();
    play(&save, "quit\n")
        .success()
        .stdout(predicate::str::contains("Ski Lodge"))
        .stdout(predicate::str::contains("The Phantom of Eagle Hill").not());
}

#[test]
fn play_ignores_corrupt_save() {
    let save = TempDir::new().unwrap();
    fs::write(save_file(&save), "{ not json").unwrap();
    play(&save, "quit\n")
        .success()
        .stdout(predicate::str::contains("Dorm Room"));
}

#[test]
fn play_rejects_bad_option() {
    let save = TempDir::new().unwrap();
    play(&save, "9\ndance\n")
        .success()
        .stdout(predicate::str::contains("There is no option 9."))
        .stdout(predicate::str::contains("Unknown command 'dance'."));
}

#[test]
fn play_restart_starts_over() {
    let save = TempDir::new().unwrap();
    play(&save, "1\nrestart\ni\n")
        .success()
        .stdout(predicate::str::contains("You start the night over."))
        .stdout(predicate::str::contains("Torn Crimson Fabric").count(1));
}

// ---------------------------------------------------------------------------
// reset
// ---------------------------------------------------------------------------

#[test]
fn reset_clears_save() {
    let save = TempDir::new().unwrap();
    play(&save, "1\n").success();
    assert!(save_file(&save).exists());

    eaglehill()
        .arg("reset")
        .arg("--save-dir")
        .arg(save.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved game cleared."));
    assert!(!save_file(&save).exists());
}

#[test]
fn reset_without_save_succeeds() {
    let save = TempDir::new().unwrap();
    eaglehill()
        .args(["reset", "--save-dir"])
        .arg(save.path())
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// world
// ---------------------------------------------------------------------------

#[test]
fn world_lists_locations() {
    eaglehill()
        .arg("world")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dorm Room (start)"))
        .stdout(predicate::str::contains("Old Equipment Shed"))
        .stdout(predicate::str::contains("6 locations, 7 items, 3 suspects"));
}

#[test]
fn world_json_round_trips_through_file() {
    let output = eaglehill().args(["world", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["start"], "DORM_ROOM");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, &json).unwrap();
    eaglehill()
        .arg("world")
        .arg("--world")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Eagle Hill Summit"));
}

#[test]
fn world_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"title": "Broken"}"#).unwrap();
    eaglehill()
        .arg("world")
        .arg("--world")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot load"));
}

// ---------------------------------------------------------------------------
// ski / course
// ---------------------------------------------------------------------------

#[test]
fn ski_prints_summary() {
    eaglehill()
        .args(["ski", "--seed", "7", "--autopilot", "--events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed=7, autopilot"))
        .stdout(predicate::str::contains("Opponent"))
        .stdout(predicate::str::contains("Event Log"))
        .stdout(predicate::str::contains("The race is on"));
}

#[test]
fn ski_tick_limit_stops_race() {
    eaglehill()
        .args(["ski", "--max-ticks", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STOPPED"))
        .stdout(predicate::str::contains("after 30 ticks"));
}

#[test]
fn ski_is_deterministic() {
    let run = || {
        eaglehill()
            .args(["ski", "--seed", "3", "--autopilot"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn course_reports_free_lanes() {
    eaglehill()
        .args(["course", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free lanes"))
        .stdout(predicate::str::contains("1 rock, 1 lodge"))
        .stdout(predicate::str::contains("Every row leaves a free lane."));
}
