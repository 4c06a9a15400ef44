#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rpomo() -> Command {
    cargo_bin_cmd!("rpomo")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpomo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Unique user store path; the file and its `.backup` sibling are removed
pub fn setup_users_file(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpomo_users.json", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    fs::remove_file(format!("{}.backup", p)).ok();
    p
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `rpomo --db <db> --test <args…>`
pub fn run_db(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = rpomo();
    cmd.args(["--db", db_path, "--test"]).args(args);
    cmd
}

/// `rpomo --users <file> --test user <args…>`
pub fn run_user(users_path: &str, args: &[&str]) -> Command {
    let mut cmd = rpomo();
    cmd.args(["--users", users_path, "--test", "user"]).args(args);
    cmd
}

/// `rpomo --db <db> --users <file> --test user <args…>`
pub fn run_user_db(db_path: &str, users_path: &str, args: &[&str]) -> Command {
    let mut cmd = rpomo();
    cmd.args(["--db", db_path, "--users", users_path, "--test", "user"])
        .args(args);
    cmd
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    run_db(db_path, &["init"]).assert().success();

    run_db(db_path, &["add", "2025-09-01", "09:00", "09:25"])
        .assert()
        .success();
    run_db(db_path, &["add", "2025-09-15", "14:00", "14:50"])
        .assert()
        .success();
    run_db(db_path, &["add", "2025-10-02", "08:30", "08:55"])
        .assert()
        .success();
}
