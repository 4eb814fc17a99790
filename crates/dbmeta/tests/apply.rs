//! `build-db` and `update-db` against real SQLite files.

mod common;

use dbmeta::config::DATABASE_FILE;
use dbmeta::{build_database, update_database, ConnectionSettings, DbMetaError};

const TABLES: &str = "\
CREATE TABLE customers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
-- lookup table
CREATE TABLE statuses (code TEXT);
";

const SEED: &str = "\
INSERT INTO customers VALUES (1, 'alice');
INSERT INTO missing VALUES (1);
INSERT INTO customers VALUES (2, 'bob');
";

#[tokio::test]
async fn test_build_applies_scripts_and_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = common::write_scripts(
        &dir.path().join("scripts"),
        &[("seed.sql", SEED), ("tables.sql", TABLES), ("notes.txt", "ignored")],
    );
    let db_dir = dir.path().join("db");

    let report = build_database(&db_dir, &scripts).await.unwrap();

    assert_eq!(report.applied(), ["tables.sql"]);
    assert_eq!(report.errors_for("seed.sql").len(), 1);
    assert!(report.errors_for("seed.sql")[0].contains("missing"));

    let pool = common::open(&db_dir.join(DATABASE_FILE)).await;
    assert_eq!(common::count_rows(&pool, "customers").await, 2);
    assert_eq!(common::count_rows(&pool, "statuses").await, 0);
}

#[tokio::test]
async fn test_build_replaces_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = common::write_scripts(&dir.path().join("scripts"), &[("tables.sql", TABLES)]);
    let db_dir = dir.path().join("db");

    let first = build_database(&db_dir, &scripts).await.unwrap();
    let second = build_database(&db_dir, &scripts).await.unwrap();

    assert!(first.is_success());
    assert!(second.is_success(), "second build failed:\n{second}");
}

#[tokio::test]
async fn test_build_missing_scripts_dir() {
    let dir = tempfile::tempdir().unwrap();
    let db_dir = dir.path().join("db");

    let result = build_database(&db_dir, &dir.path().join("absent")).await;

    assert!(matches!(result, Err(DbMetaError::ScriptsDirNotFound(_))));
    assert!(!db_dir.exists());
}

#[tokio::test]
async fn test_update_rolls_back_failed_script() {
    let dir = tempfile::tempdir().unwrap();
    let base = common::write_scripts(&dir.path().join("base"), &[("tables.sql", TABLES)]);
    let db_dir = dir.path().join("db");
    build_database(&db_dir, &base).await.unwrap();

    let updates = common::write_scripts(
        &dir.path().join("updates"),
        &[
            (
                "01_alice.sql",
                "INSERT INTO customers VALUES (1, 'alice');\n",
            ),
            (
                "02_broken.sql",
                "INSERT INTO customers VALUES (2, 'bob');\nINSERT INTO missing VALUES (1);\nINSERT INTO customers VALUES (3, 'carol');\n",
            ),
            (
                "03_status.sql",
                "INSERT INTO statuses VALUES ('NEW');\n",
            ),
        ],
    );
    let settings = ConnectionSettings::from_path(db_dir.join(DATABASE_FILE));

    let report = update_database(&settings, &updates).await.unwrap();

    assert_eq!(report.applied(), ["01_alice.sql", "03_status.sql"]);
    assert_eq!(report.errors_for("02_broken.sql").len(), 1);

    let pool = common::open(&db_dir.join(DATABASE_FILE)).await;
    assert_eq!(common::count_rows(&pool, "customers").await, 1);
    assert_eq!(common::count_rows(&pool, "statuses").await, 1);
}

#[tokio::test]
async fn test_update_with_key_value_connection_string() {
    let dir = tempfile::tempdir().unwrap();
    let base = common::write_scripts(&dir.path().join("base"), &[("tables.sql", TABLES)]);
    let db_dir = dir.path().join("db");
    build_database(&db_dir, &base).await.unwrap();

    let updates = common::write_scripts(
        &dir.path().join("updates"),
        &[("seed.sql", "INSERT INTO statuses VALUES ('OK');\n")],
    );
    let connection = format!(
        "User=SYSDBA;Password=masterkey;Database={};",
        db_dir.join(DATABASE_FILE).display()
    );
    let settings = ConnectionSettings::parse(&connection).unwrap();

    let report = update_database(&settings, &updates).await.unwrap();

    assert!(report.is_success());
    let pool = common::open(&db_dir.join(DATABASE_FILE)).await;
    assert_eq!(common::count_rows(&pool, "statuses").await, 1);
}

#[tokio::test]
async fn test_update_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let updates = common::write_scripts(&dir.path().join("updates"), &[]);
    let settings = ConnectionSettings::from_path(dir.path().join("absent.db"));

    let result = update_database(&settings, &updates).await;

    assert!(matches!(result, Err(DbMetaError::Database(_))));
}
