//! CLI integration tests: argument parsing, output and exit codes.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the dbmeta binary.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dbmeta").unwrap();
    cmd.env_remove("DBMETA_CONNECTION_STRING")
        .env_remove("DBMETA_SCRIPTS_DIR");
    cmd
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build-db"))
        .stdout(predicate::str::contains("export-scripts"))
        .stdout(predicate::str::contains("update-db"));
}

#[test]
fn test_no_command_is_usage_error() {
    cmd().assert().code(1);
}

#[test]
fn test_unknown_command_is_usage_error() {
    cmd()
        .arg("migrate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("migrate"));
}

#[test]
fn test_build_requires_scripts_dir() {
    cmd()
        .args(["build-db", "--db-dir", "db"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--scripts-dir"));
}

#[test]
fn test_update_requires_connection_string() {
    cmd()
        .args(["update-db", "--scripts-dir", "scripts"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--connection-string"));
}

// =============================================================================
// Runs
// =============================================================================

#[test]
fn test_build_missing_scripts_dir_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg("build-db")
        .arg("--db-dir")
        .arg(dir.path().join("db"))
        .arg("--scripts-dir")
        .arg(dir.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scripts directory not found"));
}

#[test]
fn test_build_reports_ok_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = common::write_scripts(
        &dir.path().join("scripts"),
        &[("tables.sql", "CREATE TABLE t (id INTEGER);\n")],
    );

    cmd()
        .arg("build")
        .arg("--db-dir")
        .arg(dir.path().join("db"))
        .arg("--scripts-dir")
        .arg(&scripts)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: tables.sql"))
        .stdout(predicate::str::contains("Errors:").not());

    assert!(dir.path().join("db").join("database.db").is_file());
}

#[test]
fn test_build_prints_errors_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = common::write_scripts(
        &dir.path().join("scripts"),
        &[("seed.sql", "INSERT INTO missing VALUES (1);\n")],
    );

    cmd()
        .arg("build-db")
        .arg("--db-dir")
        .arg(dir.path().join("db"))
        .env("DBMETA_SCRIPTS_DIR", &scripts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors:"))
        .stdout(predicate::str::contains("seed.sql -> "));
}

#[test]
fn test_update_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let base = common::write_scripts(
        &dir.path().join("base"),
        &[("tables.sql", "CREATE TABLE t (id INTEGER);\n")],
    );
    let updates = common::write_scripts(
        &dir.path().join("updates"),
        &[
            ("01_ok.sql", "INSERT INTO t VALUES (1);\n"),
            ("02_bad.sql", "INSERT INTO missing VALUES (1);\n"),
        ],
    );
    let db_dir = dir.path().join("db");

    cmd()
        .arg("build-db")
        .arg("--db-dir")
        .arg(&db_dir)
        .arg("--scripts-dir")
        .arg(&base)
        .assert()
        .success();

    cmd()
        .args(["update-db", "--json"])
        .arg("--scripts-dir")
        .arg(&updates)
        .env("DBMETA_CONNECTION_STRING", db_dir.join("database.db"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\": \"update-db\""))
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("\"01_ok.sql\""));
}

#[test]
fn test_export_writes_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::write_scripts(
        &dir.path().join("source"),
        &[(
            "tables.sql",
            "CREATE TABLE T (\n    ID INTEGER PRIMARY KEY AUTOINCREMENT,\n    NAME VARCHAR(10)\n);\n",
        )],
    );
    let db_dir = dir.path().join("db");
    let out = dir.path().join("out");

    cmd()
        .arg("build-db")
        .arg("--db-dir")
        .arg(&db_dir)
        .arg("--scripts-dir")
        .arg(&source)
        .assert()
        .success();

    cmd()
        .arg("export")
        .arg("--connection-string")
        .arg(format!("Database={};", db_dir.join("database.db").display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scripts exported"));

    for name in ["domains.sql", "tables.sql", "procedures.sql"] {
        assert!(out.join(name).is_file(), "{name} missing");
    }

    cmd()
        .arg("build-db")
        .arg("--db-dir")
        .arg(dir.path().join("replayed"))
        .arg("--scripts-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: tables.sql"))
        .stdout(predicate::str::contains("Errors:").not());
}

#[test]
fn test_invalid_connection_string_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["export-scripts", "--connection-string", "User=SYSDBA;"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid connection string"));
}
