use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rpomo::store::users::hash_password;
use std::fs;

mod common;
use common::{run_db, run_user, run_user_db, setup_test_db, setup_users_file, temp_out};

fn read_json(path: &str) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read users file")).expect("valid json")
}

#[test]
fn test_register_twice_fails() {
    let users = setup_users_file("register_twice");

    run_user(&users, &["register", "alice", "--password", "secret1"])
        .assert()
        .success()
        .stdout(contains("registered"));

    run_user(&users, &["register", "alice", "--password", "other12"])
        .assert()
        .failure()
        .stderr(contains("Username already exists"));
}

#[test]
fn test_register_validation_messages() {
    let users = setup_users_file("register_validation");

    run_user(&users, &["register", "al", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(contains("Username must be at least 3 characters"));

    run_user(&users, &["register", "alice", "--password", "12345"])
        .assert()
        .failure()
        .stderr(contains("Password must be at least 6 characters"));

    run_user(&users, &["register", "a|ice", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(contains("invalid characters"));
}

#[test]
fn test_password_is_stored_as_sha256() {
    let users = setup_users_file("stored_hash");

    run_user(&users, &["register", "carol", "--password", "hunter22"])
        .assert()
        .success();

    let raw = fs::read_to_string(&users).unwrap();
    assert!(!raw.contains("hunter22"));

    let json = read_json(&users);
    assert_eq!(json["carol"]["password_hash"], hash_password("hunter22"));
    assert_eq!(json["carol"]["is_active"], true);
    assert_eq!(json["carol"]["login_count"], 0);
}

#[test]
fn test_login_right_and_wrong_password() {
    let users = setup_users_file("login");

    run_user(&users, &["register", "dave", "--password", "secret1"])
        .assert()
        .success();

    run_user(&users, &["login", "dave", "--password", "secret1"])
        .assert()
        .success()
        .stdout(contains("Welcome back, dave"));

    run_user(&users, &["login", "dave", "--password", "wrong12"])
        .assert()
        .failure()
        .stderr(contains("Authentication failed"));

    run_user(&users, &["login", "nobody", "--password", "secret1"])
        .assert()
        .failure();

    let json = read_json(&users);
    assert_eq!(json["dave"]["login_count"], 1);
    assert!(json["dave"]["last_login"].is_string());
}

#[test]
fn test_backup_file_holds_previous_contents() {
    let users = setup_users_file("backup_sibling");
    let backup = format!("{}.backup", users);

    run_user(&users, &["register", "erin", "--password", "secret1"])
        .assert()
        .success();
    assert!(!std::path::Path::new(&backup).exists());

    run_user(&users, &["login", "erin", "--password", "secret1"])
        .assert()
        .success();

    let previous = read_json(&backup);
    let current = read_json(&users);
    assert_eq!(previous["erin"]["login_count"], 0);
    assert_eq!(current["erin"]["login_count"], 1);
}

#[test]
fn test_deactivated_user_cannot_login() {
    let users = setup_users_file("deactivate");

    run_user(&users, &["register", "frank", "--password", "secret1"])
        .assert()
        .success();

    run_user(&users, &["deactivate", "frank", "--password", "secret1"])
        .assert()
        .success()
        .stdout(contains("deactivated"));

    run_user(&users, &["login", "frank", "--password", "secret1"])
        .assert()
        .failure();

    run_user(&users, &["list"])
        .assert()
        .success()
        .stdout(contains("frank (deactivated)"));

    let json = read_json(&users);
    assert_eq!(json["frank"]["is_active"], false);
    assert!(json["frank"]["deactivated_at"].is_string());
    assert_eq!(json["frank"]["login_count"], 0);
    assert!(json["frank"]["last_login"].is_null());
}

#[test]
fn test_change_password() {
    let users = setup_users_file("passwd");

    run_user(&users, &["register", "grace", "--password", "secret1"])
        .assert()
        .success();

    run_user(
        &users,
        &["passwd", "grace", "--old", "nope123", "--new", "secret2"],
    )
    .assert()
    .failure();

    run_user(
        &users,
        &["passwd", "grace", "--old", "secret1", "--new", "secret2"],
    )
    .assert()
    .success();

    run_user(&users, &["login", "grace", "--password", "secret1"])
        .assert()
        .failure();
    run_user(&users, &["login", "grace", "--password", "secret2"])
        .assert()
        .success();

    let json = read_json(&users);
    assert!(json["grace"]["password_updated"].is_string());
}

#[test]
fn test_legacy_hash_entry_still_authenticates() {
    let users = setup_users_file("legacy_entry");
    fs::write(
        &users,
        format!("{{\"henry\": \"{}\"}}", hash_password("oldpass1")),
    )
    .unwrap();

    run_user(&users, &["login", "henry", "--password", "oldpass1"])
        .assert()
        .success();

    run_user(&users, &["info", "henry"])
        .assert()
        .success()
        .stdout(contains("Active:").and(contains("yes")));
}

#[test]
fn test_malformed_store_starts_empty() {
    let users = setup_users_file("malformed_store");
    fs::write(&users, "{ not json").unwrap();

    run_user(&users, &["list"])
        .assert()
        .success()
        .stdout(contains("No users registered"));

    run_user(&users, &["register", "ivan", "--password", "secret1"])
        .assert()
        .success();
    assert!(read_json(&users)["ivan"].is_object());
}

#[test]
fn test_user_info_and_backup() {
    let users = setup_users_file("info_backup");
    let out = temp_out("info_backup_users", "json");

    run_user(&users, &["register", "judy", "--password", "secret1"])
        .assert()
        .success();

    run_user(&users, &["info", "judy"])
        .assert()
        .success()
        .stdout(contains("Logins:").and(contains("password_hash").not()));

    run_user(&users, &["info", "nobody"])
        .assert()
        .failure()
        .stderr(contains("User not found"));

    run_user(&users, &["backup", "--file", &out])
        .assert()
        .success();
    assert!(read_json(&out)["judy"].is_object());
}

#[test]
fn test_deactivate_with_wrong_password_keeps_account() {
    let users = setup_users_file("deactivate_wrong");

    run_user(&users, &["register", "iris", "--password", "secret1"])
        .assert()
        .success();

    run_user(&users, &["deactivate", "iris", "--password", "wrong12"])
        .assert()
        .failure()
        .stderr(contains("Authentication failed"));

    let json = read_json(&users);
    assert_eq!(json["iris"]["is_active"], true);
    assert_eq!(json["iris"]["login_count"], 0);
}

#[test]
fn test_user_changes_reach_the_audit_log() {
    let db_path = setup_test_db("user_audit");
    let users = setup_users_file("user_audit");
    run_db(&db_path, &["init"]).assert().success();

    run_user_db(&db_path, &users, &["register", "judy", "--password", "secret1"])
        .assert()
        .success();
    run_user_db(&db_path, &users, &["login", "judy", "--password", "secret1"])
        .assert()
        .success();
    run_user_db(
        &db_path,
        &users,
        &["passwd", "judy", "--old", "secret1", "--new", "secret2"],
    )
    .assert()
    .success();
    run_user_db(&db_path, &users, &["deactivate", "judy", "--password", "secret2"])
        .assert()
        .success();

    run_db(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("user_register")
                .and(contains("user_login"))
                .and(contains("user_passwd"))
                .and(contains("user_deactivate"))
                .and(contains("judy")),
        );
}
