//! End-to-end tests for the CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STARFORGED: &str = include_str!("../../iv-datasworn/tests/fixtures/starforged_mini.json");

const HOMEBREW_ACTION: &str = r#"{
  "_id": "homebrew",
  "type": "expansion",
  "ruleset": "starforged",
  "title": "House Rules",
  "oracles": {
    "core": {
      "_id": "starforged/oracles/core",
      "name": "Core Oracles",
      "oracle_type": "tables",
      "contents": {
        "action": {
          "_id": "starforged/oracles/core/action",
          "name": "Action",
          "oracle_type": "table_text",
          "rows": [
            { "roll": { "min": 1, "max": 100 }, "text": "Betray" }
          ]
        }
      }
    }
  }
}"#;

const BROKEN_LAYOUT: &str = r#"{
  "_id": "broken",
  "type": "expansion",
  "oracles": {
    "odd": {
      "_id": "broken/oracles/odd",
      "name": "Odd",
      "oracle_type": "weird_layout"
    }
  }
}"#;

const MULTI_ROLL: &str = r#"{
  "kind": "multi",
  "roll": 98,
  "tableId": "starforged/oracles/core/action",
  "tableName": "Action",
  "results": ["Scheme", "Clash"],
  "rolls": [
    { "kind": "simple", "roll": 12, "tableId": "starforged/oracles/core/action", "tableName": "Action", "results": ["Scheme"] }
  ]
}"#;

/// A temp directory holding the built-in package and a homebrew folder.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("starforged.json"), STARFORGED).unwrap();
        fs::create_dir(dir.path().join("homebrew")).unwrap();
        Self { dir }
    }

    fn builtin(&self) -> PathBuf {
        self.dir.path().join("starforged.json")
    }

    fn homebrew(&self) -> PathBuf {
        self.dir.path().join("homebrew")
    }

    fn add_homebrew(&self, name: &str, content: &str) -> &Self {
        fs::write(self.homebrew().join(name), content).unwrap();
        self
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn iv() -> Command {
    Command::cargo_bin("iv").unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_builtin_counts() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "check"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("12 records indexed from 1 source")
                .and(predicate::str::contains("All checks passed")),
        );
}

#[test]
fn check_includes_homebrew_and_ignores_other_files() {
    let fx = Fixture::new();
    fx.add_homebrew("house.json", HOMEBREW_ACTION)
        .add_homebrew("notes.txt", "not a package");

    iv().args(["-s", arg(&fx.builtin()), "-H", arg(&fx.homebrew()), "check"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("13 records indexed from 2 sources")
                .and(predicate::str::contains("homebrew")),
        );
}

#[test]
fn check_skips_unsupported_layout_and_fails() {
    let fx = Fixture::new();
    fx.add_homebrew("broken.json", BROKEN_LAYOUT);

    iv().args(["-s", arg(&fx.builtin()), "-H", arg(&fx.homebrew()), "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("12 records indexed from 1 source"))
        .stderr(
            predicate::str::contains("skipping package")
                .and(predicate::str::contains("weird_layout"))
                .and(predicate::str::contains("1 package failed to load")),
        );
}

#[test]
fn check_skips_malformed_json() {
    let fx = Fixture::new();
    fx.add_homebrew("bad.json", "{ not json");

    iv().args(["-s", arg(&fx.builtin()), "-H", arg(&fx.homebrew()), "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("skipping malformed package"));
}

#[test]
fn check_needs_some_package() {
    iv().arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rules packages given"));
}

#[test]
fn verbose_logs_loaded_packages() {
    let fx = Fixture::new();
    iv().args(["-v", "-s", arg(&fx.builtin()), "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("package loaded"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_filters_by_kind() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "list", "oracle"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("starforged/oracles/core/action")
                .and(predicate::str::contains("4 records"))
                .and(predicate::str::contains("starforged/moves/quest").not()),
        );
}

#[test]
fn list_all_records() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 records"));
}

#[test]
fn list_rejects_unknown_kind() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "list", "spell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown record kind: spell"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_oracle_table() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "show", "starforged/oracles/core/action"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Action")
                .and(predicate::str::contains("51-100"))
                .and(predicate::str::contains("Clash"))
                .and(predicate::str::contains("Core Oracles")),
        );
}

#[test]
fn show_asset_move_origin() {
    let fx = Fixture::new();
    iv().args([
        "-s",
        arg(&fx.builtin()),
        "show",
        "starforged/assets/command_vehicle/starship/abilities/0/moves/repair",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("asset:      starforged/assets/command_vehicle/starship")
            .and(predicate::str::contains("kind:       Action")),
    );
}

#[test]
fn show_prefers_homebrew_by_default() {
    let fx = Fixture::new();
    fx.add_homebrew("house.json", HOMEBREW_ACTION);

    iv().args([
        "-s",
        arg(&fx.builtin()),
        "-H",
        arg(&fx.homebrew()),
        "show",
        "starforged/oracles/core/action",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("Betray")
            .and(predicate::str::contains("Clash").not())
            .and(predicate::str::contains("overrides 1 other definition")),
    );
}

#[test]
fn show_respects_lower_homebrew_priority() {
    let fx = Fixture::new();
    fx.add_homebrew("house.json", HOMEBREW_ACTION);

    iv().args([
        "-s",
        arg(&fx.builtin()),
        "-H",
        arg(&fx.homebrew()),
        "--homebrew-priority=-1",
        "show",
        "starforged/oracles/core/action",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Clash").and(predicate::str::contains("Betray").not()));
}

#[test]
fn show_suggests_close_ids() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "show", "starforged/oracles/core/actoin"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("did you mean")
                .and(predicate::str::contains("starforged/oracles/core/action")),
        );
}

// ---------------------------------------------------------------------------
// conflicts
// ---------------------------------------------------------------------------

#[test]
fn conflicts_lists_every_source() {
    let fx = Fixture::new();
    fx.add_homebrew("house.json", HOMEBREW_ACTION);
    let house = fx.homebrew().join("house.json");

    iv().args([
        "-s",
        arg(&fx.builtin()),
        "-H",
        arg(&fx.homebrew()),
        "conflicts",
        "starforged/oracles/core/action",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("defined by 2 sources")
            .and(predicate::str::contains(format!("winner: {}", house.display()))),
    );
}

#[test]
fn first_wins_keeps_builtin_on_equal_priority() {
    let fx = Fixture::new();
    fx.add_homebrew("house.json", HOMEBREW_ACTION);

    iv().args([
        "-s",
        arg(&fx.builtin()),
        "-H",
        arg(&fx.homebrew()),
        "--homebrew-priority=0",
        "--first-wins",
        "conflicts",
        "starforged/oracles/core/action",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
        "winner: {}",
        fx.builtin().display()
    )));
}

#[test]
fn conflicts_unknown_id_fails() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "conflicts", "nothing/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record with id \"nothing/here\""));
}

// ---------------------------------------------------------------------------
// oracles
// ---------------------------------------------------------------------------

#[test]
fn oracles_groups_nested_collections() {
    let fx = Fixture::new();
    iv().args(["-s", arg(&fx.builtin()), "oracles"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ironsworn: Starforged")
                .and(predicate::str::contains("Planets > Desert World > Settlements"))
                .and(predicate::str::contains("Terminus"))
                .and(predicate::str::contains("4 oracles")),
        );
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_accepts_multi_roll() {
    let fx = Fixture::new();
    let file = fx.write("roll.json", MULTI_ROLL);
    iv().args(["roll", arg(&file)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("valid multi roll: 2 table rolls, depth 2")
                .and(predicate::str::contains("Action (98): Scheme, Clash")),
        );
}

#[test]
fn roll_accepts_oracle_block() {
    let fx = Fixture::new();
    let block = format!(r#"{{ "roll": {MULTI_ROLL}, "question": "What do they want?" }}"#);
    let file = fx.write("block.json", &block);
    iv().args(["roll", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("What do they want?"));
}

#[test]
fn roll_accepts_deeply_nested_roll() {
    let fx = Fixture::new();
    let mut roll = MULTI_ROLL.to_string();
    for _ in 0..70 {
        roll = format!(
            r#"{{"kind":"multi","roll":1,"tableId":"t","tableName":"T","results":["x"],"rolls":[{roll}]}}"#
        );
    }
    let file = fx.write("deep.json", &roll);
    iv().args(["roll", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid multi roll: 72 table rolls, depth 72"));
}

#[test]
fn roll_reports_error_path() {
    let fx = Fixture::new();
    let file = fx.write("bad.json", &MULTI_ROLL.replace("\"roll\": 12", "\"roll\": 0"));
    iv().args(["roll", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("$.rolls[0].roll"));
}

#[test]
fn roll_rejects_invalid_json() {
    let fx = Fixture::new();
    let file = fx.write("bad.json", "{ nope");
    iv().args(["roll", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}
