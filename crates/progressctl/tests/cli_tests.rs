//! CLI parsing and command flows against an in-memory store

use clap::Parser;
use progress_tracker::{MemoryStore, ProgressTracker, TrackerConfig};
use progressctl::cli::{Cli, Commands};
use progressctl::commands::execute;
use progressctl::{resolve_data_dir, run as run_cli};
use progress_tracker::FileStore;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::tempdir;

fn run(tracker: &mut ProgressTracker<MemoryStore>, args: &[&str]) -> String {
    run_with_input(tracker, args, "")
}

fn run_with_input(tracker: &mut ProgressTracker<MemoryStore>, args: &[&str], input: &str) -> String {
    let mut argv = vec!["progressctl"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");

    let mut out = Vec::new();
    let mut input = Cursor::new(input.as_bytes().to_vec());
    execute(tracker, cli.command, &mut out, &mut input, false).expect("command should succeed");
    String::from_utf8(out).unwrap()
}

#[test]
fn parse_answer_command() {
    let cli = Cli::try_parse_from([
        "progressctl",
        "answer",
        "ch01-q1",
        "b",
        "--correct",
        "b",
        "--options",
        "a,b,c",
    ])
    .unwrap();

    match cli.command {
        Commands::Answer {
            quiz_id,
            selected,
            correct,
            options,
            explanation,
        } => {
            assert_eq!(quiz_id, "ch01-q1");
            assert_eq!(selected, "b");
            assert_eq!(correct, "b");
            assert_eq!(options, vec!["a", "b", "c"]);
            assert_eq!(explanation, "");
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn answer_requires_correct_option() {
    assert!(Cli::try_parse_from(["progressctl", "answer", "ch01-q1", "b"]).is_err());
}

#[test]
fn blank_rejects_malformed_pair() {
    assert!(Cli::try_parse_from(["progressctl", "blank", "--pair", "nope"]).is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["progressctl", "status", "--data-dir", "/tmp/p", "-v"]).unwrap();
    assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/p")));
    assert!(cli.verbose);
}

#[test]
fn data_dir_precedence() {
    let config = TrackerConfig {
        data_dir: Some(PathBuf::from("/from/config")),
        ..Default::default()
    };

    let cli = Cli::try_parse_from(["progressctl", "status"]).unwrap();
    assert_eq!(resolve_data_dir(&cli, &config), PathBuf::from("/from/config"));

    let cli = Cli::try_parse_from(["progressctl", "--data-dir", "/from/flag", "status"]).unwrap();
    assert_eq!(resolve_data_dir(&cli, &config), PathBuf::from("/from/flag"));
}

#[test]
fn answer_flow_credits_once() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());

    let out = run(
        &mut tracker,
        &["answer", "ch01-q1", "b", "--correct", "b", "--explanation", "Right.", "--options", "a,b"],
    );
    assert!(out.contains("✅ Correct! Right."));
    assert!(out.contains("+25 XP"));
    assert!(out.contains("Options: a | b ✓"));
    assert!(out.contains("XP 25 | Level 1"));

    let out = run(&mut tracker, &["answer", "ch01-q1", "b", "--correct", "b"]);
    assert!(!out.contains("+25 XP"));
    assert!(!out.contains('\x1b'), "uncoloured output expected: {:?}", out);
    assert_eq!(tracker.gamification().xp, 25);
}

#[test]
fn wrong_answer_flow() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    let out = run(&mut tracker, &["answer", "ch02-q1", "a", "--correct", "c", "--options", "a,b,c"]);
    assert!(out.contains("❌ Not quite."));
    assert!(out.contains("a ✗ | b | c ✓"));
    assert!(out.contains("[Try again next time]"));
}

#[test]
fn complete_and_status() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    let out = run(&mut tracker, &["complete", "ch05"]);
    assert!(out.contains("Chapter ch05 marked complete"));
    assert!(out.contains("+50 XP"));

    let out = run(&mut tracker, &["complete", "ch05"]);
    assert!(out.contains("already complete"));

    let out = run(&mut tracker, &["status"]);
    assert!(out.contains("XP:        50"));
    assert!(out.contains("Completed: 1/22"));
    assert!(out.contains("fundamentals"));
}

#[test]
fn status_json() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    run(&mut tracker, &["answer", "ch20-q1", "x", "--correct", "x"]);

    let out = run(&mut tracker, &["status", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["xp"], 25);
    assert_eq!(value["level"], 1);
    let expert = value["paths"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "expert")
        .unwrap();
    assert_eq!(expert["percent"], 100);
}

#[test]
fn visit_streak_flow() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    let out = run(&mut tracker, &["visit", "--date", "Mon Jan 01 2024"]);
    assert!(out.contains("Streak: 1 day"));

    let out = run(&mut tracker, &["visit", "--date", "2024-01-02"]);
    assert!(out.contains("Streak: 2 days (Extended)"));
    assert_eq!(tracker.gamification().last_visit.as_deref(), Some("Tue Jan 02 2024"));
}

#[test]
fn blank_flow() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    let out = run(&mut tracker, &["blank", "--pair", "Label= label", "--pair", "Text=Text"]);
    assert!(out.contains("All blanks filled correctly"));
    assert_eq!(tracker.gamification().xp, 25);

    let out = run(&mut tracker, &["blank", "--pair", "Label=Button"]);
    assert!(out.contains("Some answers are incorrect"));
    assert_eq!(tracker.gamification().xp, 25);
}

#[test]
fn score_uses_recorded_quizzes_by_default() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    run(&mut tracker, &["answer", "ch01-q1", "b", "--correct", "b"]);
    run(&mut tracker, &["answer", "ch01-q2", "a", "--correct", "b"]);
    run(&mut tracker, &["answer", "ch02-q1", "b", "--correct", "b"]);

    let out = run(&mut tracker, &["score", "ch01"]);
    assert!(out.contains("Score: 1/2"));

    let out = run(&mut tracker, &["score", "ch01", "ch01-q1", "ch01-q2", "ch01-q3"]);
    assert!(out.contains("Score: 1/3"));
}

#[test]
fn reset_needs_confirmation() {
    let mut tracker = ProgressTracker::new(MemoryStore::new());
    run(&mut tracker, &["complete", "ch01"]);

    let out = run_with_input(&mut tracker, &["reset"], "n\n");
    assert!(out.contains("Cancelled"));
    assert_eq!(tracker.gamification().xp, 50);

    let out = run_with_input(&mut tracker, &["reset"], "y\n");
    assert!(out.contains("All progress cleared"));
    assert_eq!(tracker.gamification().xp, 0);

    run(&mut tracker, &["complete", "ch01"]);
    run(&mut tracker, &["reset", "--yes"]);
    assert!(tracker.store().is_empty());
}

#[test]
fn run_persists_to_file_store() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let args = |extra: &[&str]| {
        let mut argv = vec!["progressctl", "--data-dir", data_dir.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    };
    run_cli(args(&["answer", "ch01-q1", "b", "--correct", "b"])).unwrap();
    run_cli(args(&["complete", "ch01"])).unwrap();

    let tracker = ProgressTracker::new(FileStore::new(&data_dir));
    assert_eq!(tracker.gamification().xp, 75);
    assert!(tracker.answers().is_correct("ch01-q1"));

    run_cli(args(&["reset", "--yes"])).unwrap();
    assert_eq!(tracker.gamification().xp, 0);
    assert!(tracker.answers().is_empty());
}

#[test]
fn run_reads_data_dir_from_config_file() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("from-config");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, format!("data_dir = {:?}\n", data_dir.to_str().unwrap())).unwrap();

    let cli = Cli::try_parse_from([
        "progressctl",
        "--config",
        config_path.to_str().unwrap(),
        "complete",
        "ch03",
    ])
    .unwrap();
    run_cli(cli).unwrap();

    let tracker = ProgressTracker::new(FileStore::new(&data_dir));
    assert!(tracker.gamification().has_completed("ch03"));
}

#[test]
fn run_rejects_missing_config_file() {
    let dir = tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "progressctl",
        "--config",
        dir.path().join("absent.toml").to_str().unwrap(),
        "status",
    ])
    .unwrap();
    assert!(run_cli(cli).is_err());
}
