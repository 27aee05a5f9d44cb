//! Tests for error messages, suggestions and exit codes.

mod common;

use std::fs;

use predicates::prelude::*;

use common::{project, stencil};

#[test]
fn missing_arguments_are_usage_errors() {
    let dir = project();
    stencil(dir.path()).arg("render").assert().code(2);
}

#[test]
fn conflicting_write_flags_are_configuration_errors() {
    let dir = project();
    stencil(dir.path())
        .args(["render", "-t", "model.jinja", "-o", "user.rs", "--set", "name=user"])
        .args(["--overwrite", "--append"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("append and overwrite"));

    assert!(!dir.path().join("user.rs").exists());
}

#[test]
fn missing_template_is_not_found() {
    let dir = project();
    stencil(dir.path())
        .args(["render", "-t", "nope.jinja", "-o", "out.rs"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unable to open template file"));

    assert!(!dir.path().join("out.rs").exists());
}

#[test]
fn undefined_variable_is_a_user_error() {
    let dir = project();
    stencil(dir.path())
        .args(["render", "-t", "model.jinja", "-o", "user.rs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("template execution failed"));

    assert!(!dir.path().join("user.rs").exists());
}

#[test]
fn broken_template_syntax_is_reported() {
    let dir = project();
    stencil(dir.path())
        .args(["eval", "{% if %}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to create template"));
}

#[test]
fn malformed_set_is_invalid_input() {
    let dir = project();
    stencil(dir.path())
        .args(["eval", "x", "--set", "novalue"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn missing_manifest_suggests_flag() {
    let dir = project();
    stencil(dir.path())
        .arg("generate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"))
        .stderr(predicate::str::contains("--manifest"));
}

#[test]
fn invalid_manifest_is_a_user_error() {
    let dir = project();
    fs::write(dir.path().join("stencil.toml"), "[[targets]]\npath = \"x.rs\"\n").unwrap();
    stencil(dir.path())
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid manifest"));
}

#[test]
fn generate_stops_at_first_failure() {
    let dir = project();
    fs::write(
        dir.path().join("stencil.toml"),
        r#"
[context]
name = "user"

[[targets]]
template = "model.jinja"
path = "first.rs"

[[targets]]
template = "missing.jinja"
path = "second.rs"

[[targets]]
template = "line.jinja"
path = "third.rs"
"#,
    )
    .unwrap();

    stencil(dir.path())
        .arg("generate")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("first.rs"));

    assert!(dir.path().join("first.rs").exists());
    assert!(!dir.path().join("third.rs").exists());
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let dir = project();
    stencil(dir.path())
        .args(["config", "get", "no.such.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn explicit_missing_config_file_fails_early() {
    let dir = project();
    stencil(dir.path())
        .args(["--config", "absent.toml", "eval", "x"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn verbose_shows_the_error_chain() {
    let dir = project();
    stencil(dir.path())
        .args(["-v", "eval", "x", "--context", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot load context"))
        .stderr(predicate::str::contains("--verbose").not());
}
