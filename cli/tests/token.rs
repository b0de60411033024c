//! # projgit Token Integration Tests
//!
//! File: cli/tests/token.rs
//!

mod common;
use common::Sandbox;
use predicates::prelude::*;

#[test]
fn test_issues_token_for_allowed_identifier() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("APP_KEY", "integration-secret")
        .env("PROJGIT_VALID_IDENTIFIERS", "ci-bot, dashboard")
        .args(["token", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[\w-]+\.[\w-]+\.[\w-]+\n$").unwrap());
}

#[test]
fn test_rejects_unknown_identifier() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("APP_KEY", "integration-secret")
        .env("PROJGIT_VALID_IDENTIFIERS", r#"["ci-bot"]"#)
        .args(["token", "intruder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Identifier 'intruder' is not in the list of valid identifiers.",
        ));
}

#[test]
fn test_requires_signing_key() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("PROJGIT_VALID_IDENTIFIERS", "ci-bot")
        .args(["token", "ci-bot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No signing key configured"));
}

#[test]
fn test_prompts_for_identifier() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("APP_KEY", "integration-secret")
        .env("PROJGIT_VALID_IDENTIFIERS", "ci-bot")
        .arg("token")
        .write_stdin("ci-bot\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Identifier: "));
}
