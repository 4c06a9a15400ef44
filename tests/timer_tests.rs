use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rpomo::db::pool::DbPool;
use rpomo::db::queries::{find_goal, load_sessions};
use rpomo::models::session_source::SessionSource;

mod common;
use common::{run_db, setup_test_db};

#[test]
fn test_timer_saves_focus_session() {
    let db_path = setup_test_db("timer_saves");
    run_db(&db_path, &["init"]).assert().success();

    run_db(&db_path, &["timer", "--minutes", "1", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(contains("Pomodoro finished").and(contains("Session saved")));

    let pool = DbPool::new(&db_path).unwrap();
    let sessions = load_sessions(&pool.conn, None).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].duration, 1);
    assert_eq!(sessions[0].source, SessionSource::Timer);
}

#[test]
fn test_timer_no_save_and_breaks_are_not_recorded() {
    let db_path = setup_test_db("timer_no_save");
    run_db(&db_path, &["init"]).assert().success();

    run_db(
        &db_path,
        &["timer", "--minutes", "1", "--tick-ms", "1", "--no-save"],
    )
    .assert()
    .success()
    .stdout(contains("Session not saved"));

    run_db(
        &db_path,
        &["timer", "--kind", "break", "--minutes", "1", "--tick-ms", "1"],
    )
    .assert()
    .success()
    .stdout(contains("Short break finished"));

    let pool = DbPool::new(&db_path).unwrap();
    assert!(load_sessions(&pool.conn, None).unwrap().is_empty());
}

#[test]
fn test_timer_credits_goal_each_minute() {
    let db_path = setup_test_db("timer_goal");
    run_db(&db_path, &["init"]).assert().success();
    run_db(&db_path, &["goal", "add", "Essay", "--target", "30"])
        .assert()
        .success();

    run_db(
        &db_path,
        &[
            "timer", "--minutes", "2", "--tick-ms", "1", "--goal", "Essay",
        ],
    )
    .assert()
    .success()
    .stdout(contains("Goal 'Essay': +2 min"));

    let pool = DbPool::new(&db_path).unwrap();
    let g = find_goal(&pool.conn, "Essay").unwrap().unwrap();
    assert_eq!(g.time_done, 2);
    assert_eq!(load_sessions(&pool.conn, None).unwrap()[0].duration, 2);
}

#[test]
fn test_timer_unknown_goal_fails_before_starting() {
    let db_path = setup_test_db("timer_unknown_goal");
    run_db(&db_path, &["init"]).assert().success();

    run_db(
        &db_path,
        &["timer", "--minutes", "1", "--tick-ms", "1", "--goal", "Nope"],
    )
    .assert()
    .failure()
    .stderr(contains("Goal not found"));
}

#[test]
fn test_timer_cycles_insert_breaks_between_pomodoros() {
    let db_path = setup_test_db("timer_cycles");
    run_db(&db_path, &["init"]).assert().success();

    run_db(
        &db_path,
        &["timer", "--cycles", "2", "--minutes", "1", "--tick-ms", "1"],
    )
    .assert()
    .success()
    .stdout(contains("break finished").and(contains("Pomodoro finished")));

    let pool = DbPool::new(&db_path).unwrap();
    let sessions = load_sessions(&pool.conn, None).unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.duration == 1));
    assert!(sessions.iter().all(|s| s.source == SessionSource::Timer));
}
