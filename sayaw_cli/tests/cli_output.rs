use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn temp_path(tag: &str, ext: &str) -> PathBuf {
    env::temp_dir().join(format!("sayaw_cli_{tag}_{}.{ext}", std::process::id()))
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sayaw"))
        .args(args)
        .output()
        .unwrap()
}

const SCRIPT: &str = r#"{
  "mode": "sinulog",
  "player_name": "Maria",
  "walls": [
    {
      "id": 1,
      "name": "Wall",
      "spawn_time": 0.0,
      "children": [
        { "name": "PerfectHitPoints_LeftArm", "position": [-0.5, 1.0, 0.0] },
        { "name": "PerfectHitPoints_LeftArm", "position": [0.5, 1.0, 0.0] }
      ]
    },
    {
      "id": 2,
      "name": "Wall",
      "spawn_time": 1.0,
      "children": [
        { "name": "PerfectHitPoints_LeftArm", "position": [-0.5, 1.0, 0.0] },
        { "name": "PerfectHitPoints_RightArm", "position": [0.5, 1.0, 0.0] }
      ]
    }
  ],
  "strikes": [
    { "time": 5.5, "wall": 1, "body_part": "LeftArm", "position": [-0.5, 1.1, 0.0] },
    { "time": 5.5, "wall": 1, "body_part": "RightArm", "position": [0.5, 1.4, 0.0] }
  ]
}"#;

fn write_script(tag: &str) -> PathBuf {
    let path = temp_path(tag, "json");
    fs::write(&path, SCRIPT).unwrap();
    path
}

fn play(script: &Path, ledger: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "play",
        script.to_str().unwrap(),
        "--ledger",
        ledger.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run(&args)
}

#[test]
fn help_lists_subcommands() {
    let output = run(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("play"));
    assert!(stdout.contains("leaderboard"));
}

#[test]
fn play_prints_summary_and_grade() {
    let script = write_script("summary");
    let ledger = temp_path("summary_ledger", "json");
    let _ = fs::remove_file(&ledger);

    let output = play(&script, &ledger, &[]);
    assert!(output.status.success());

    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("Final Score: 110"));
    assert!(stdout.contains("Grade: C (Average Dancer)"));
    assert!(stdout.contains("Walls Hit: 1/2"));
    assert!(stdout.contains("Missed Walls: 0"));
    assert!(stdout.contains("#2 missed"));

    let _ = fs::remove_file(&script);
    let _ = fs::remove_file(&ledger);
}

#[test]
fn play_json_summary() {
    let script = write_script("json");
    let ledger = temp_path("json_ledger", "json");
    let _ = fs::remove_file(&ledger);

    let output = play(&script, &ledger, &["--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["final_score"], 110);
    assert_eq!(summary["walls_hit"], 1);
    assert_eq!(summary["total_walls"], 2);
    assert_eq!(summary["grade"], "C");

    let _ = fs::remove_file(&script);
    let _ = fs::remove_file(&ledger);
}

#[test]
fn play_missing_script_fails() {
    let missing = temp_path("missing_script", "json");
    let _ = fs::remove_file(&missing);
    let ledger = temp_path("missing_ledger", "json");

    let output = play(&missing, &ledger, &[]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: failed to read script: "));
}

#[test]
fn play_finishes_with_very_long_lived_wall() {
    let script = temp_path("long_lived", "json");
    fs::write(&script, SCRIPT.replace(r#""spawn_time": 1.0,"#, r#""spawn_time": 1.0, "lifetime": 1e12,"#))
        .unwrap();
    let ledger = temp_path("long_lived_ledger", "json");
    let _ = fs::remove_file(&ledger);

    let output = play(&script, &ledger, &["--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["walls_hit"], 1);
    assert_eq!(summary["total_walls"], 2);

    let _ = fs::remove_file(&script);
    let _ = fs::remove_file(&ledger);
}

#[test]
fn play_rejects_negative_lifetime() {
    let script = temp_path("negative_lifetime", "json");
    fs::write(&script, SCRIPT.replace(r#""spawn_time": 1.0,"#, r#""spawn_time": 1.0, "lifetime": -2.0,"#))
        .unwrap();
    let ledger = temp_path("negative_lifetime_ledger", "json");

    let output = play(&script, &ledger, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid lifetime -2"));

    let _ = fs::remove_file(&script);
    let _ = fs::remove_file(&ledger);
}

#[test]
fn leaderboard_rejects_unknown_mode() {
    let ledger = temp_path("unknown_mode_ledger", "json");
    let output = run(&[
        "leaderboard",
        "--ledger",
        ledger.to_str().unwrap(),
        "show",
        "tinikling",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown game mode: tinikling"));
}

#[test]
fn leaderboard_shows_then_clears_saved_scores() {
    let script = write_script("board");
    let ledger = temp_path("board_ledger", "json");
    let _ = fs::remove_file(&ledger);
    let ledger_arg = ledger.to_str().unwrap();

    assert!(play(&script, &ledger, &["--player", "Juan Dela"]).status.success());

    let shown = run(&["leaderboard", "--ledger", ledger_arg, "show", "Sinulog"]);
    assert!(shown.status.success());
    let stdout = String::from_utf8_lossy(&shown.stdout);
    assert!(stdout.contains("1. Juan Dela"));
    assert!(stdout.contains("110"));

    assert!(run(&["leaderboard", "--ledger", ledger_arg, "clear-all"])
        .status
        .success());

    let emptied = run(&["leaderboard", "--ledger", ledger_arg, "show", "sinulog"]);
    assert!(emptied.status.success());
    assert!(String::from_utf8_lossy(&emptied.stdout).contains("No scores for sinulog"));

    let _ = fs::remove_file(&script);
    let _ = fs::remove_file(&ledger);
}
