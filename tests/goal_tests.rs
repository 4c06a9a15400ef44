use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rpomo::db::pool::DbPool;
use rpomo::db::queries::find_goal;

mod common;
use common::{run_db, setup_test_db};

fn goal_state(db_path: &str, title: &str) -> (i64, i64, String) {
    let pool = DbPool::new(db_path).expect("open db");
    let g = find_goal(&pool.conn, title)
        .expect("query goal")
        .expect("goal exists");
    (g.time_done, g.time_goal, g.color)
}

#[test]
fn test_goal_add_and_list() {
    let db_path = setup_test_db("goal_add_list");
    run_db(&db_path, &["init"]).assert().success();

    run_db(&db_path, &["goal", "add", "Algebra", "--target", "60"])
        .assert()
        .success()
        .stdout(contains("Goal added: Algebra (0h 00m / 1h 00m)"));

    run_db(
        &db_path,
        &["goal", "add", "Reading", "--target", "30", "--color", "#FF8800"],
    )
    .assert()
    .success();

    run_db(&db_path, &["goal", "add", "Algebra"])
        .assert()
        .failure()
        .stderr(contains("A goal named 'Algebra' already exists"));

    run_db(&db_path, &["goal", "add", "   "])
        .assert()
        .failure()
        .stderr(contains("Goal title cannot be empty"));

    run_db(&db_path, &["goal", "add", "Bad", "--color", "red"])
        .assert()
        .failure()
        .stderr(contains("expected #RRGGBB"));

    assert_eq!(goal_state(&db_path, "Algebra").2, "#77DD77");
    assert_eq!(goal_state(&db_path, "Reading").2, "#FF8800");

    run_db(&db_path, &["goal", "list"])
        .assert()
        .success()
        .stdout(contains("Algebra").and(contains("Reading")));
}

#[test]
fn test_goal_log_percent_and_cap() {
    let db_path = setup_test_db("goal_log_cap");
    run_db(&db_path, &["init"]).assert().success();
    run_db(&db_path, &["goal", "add", "Chemistry", "--target", "40"])
        .assert()
        .success();

    run_db(&db_path, &["goal", "log", "Chemistry", "10"])
        .assert()
        .success()
        .stdout(contains(" 25%").and(contains("0h 10m / 0h 40m")));

    run_db(&db_path, &["goal", "log", "Chemistry", "100"])
        .assert()
        .success()
        .stdout(contains("100%"))
        .stdout(contains("only 30 of 100 minute(s) counted"));

    assert_eq!(goal_state(&db_path, "Chemistry").0, 40);

    run_db(&db_path, &["goal", "log", "Missing", "5"])
        .assert()
        .failure()
        .stderr(contains("Goal not found"));
}

#[test]
fn test_goal_edit_clamps_and_renames() {
    let db_path = setup_test_db("goal_edit");
    run_db(&db_path, &["init"]).assert().success();
    run_db(&db_path, &["goal", "add", "Physics", "--target", "120"])
        .assert()
        .success();
    run_db(&db_path, &["goal", "add", "Biology", "--target", "30"])
        .assert()
        .success();
    run_db(&db_path, &["goal", "log", "Physics", "90"])
        .assert()
        .success();

    run_db(&db_path, &["goal", "edit", "Physics", "--target", "60"])
        .assert()
        .success();
    assert_eq!(goal_state(&db_path, "Physics"), (60, 60, "#77DD77".into()));

    run_db(&db_path, &["goal", "edit", "Physics", "--title", "Biology"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    run_db(
        &db_path,
        &["goal", "edit", "Physics", "--title", "Mechanics", "--target", "-5"],
    )
    .assert()
    .success()
    .stdout(contains("Goal updated: Mechanics"));

    let (done, target, _) = goal_state(&db_path, "Mechanics");
    assert_eq!(target, 0);
    assert_eq!(done, 60);
}

#[test]
fn test_goal_del_and_reset() {
    let db_path = setup_test_db("goal_del_reset");
    run_db(&db_path, &["init"]).assert().success();
    run_db(&db_path, &["goal", "add", "History", "--target", "20"])
        .assert()
        .success();
    run_db(&db_path, &["goal", "add", "Art", "--target", "20"])
        .assert()
        .success();
    run_db(&db_path, &["goal", "log", "Art", "15"]).assert().success();

    run_db(&db_path, &["goal", "reset"])
        .assert()
        .success()
        .stdout(contains("2 goal(s) reset"));
    assert_eq!(goal_state(&db_path, "Art").0, 0);

    run_db(&db_path, &["goal", "del", "History"])
        .assert()
        .success();
    run_db(&db_path, &["goal", "del", "History"])
        .assert()
        .failure()
        .stderr(contains("Goal not found"));

    run_db(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("goal_reset").and(contains("goal_del")));
}
