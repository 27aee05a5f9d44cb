//! Shared helpers for the CLI integration tests.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch project directory holding a couple of templates.
pub fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("model.jinja"),
        "pub struct {{ name | pascal_case }};\n",
    )
    .unwrap();
    fs::write(dir.path().join("line.jinja"), "{{ name }}\n").unwrap();
    dir
}

/// `stencil` running inside `dir`, isolated from the caller's config and
/// environment.
pub fn stencil(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STENCIL_CONFIG")
        .env_remove("STENCIL_TEMPLATES__DIR")
        .env_remove("STENCIL_FORMATTER__COMMAND")
        .env_remove("STENCIL_FORMATTER__ARGS")
        .env_remove("STENCIL_OUTPUT__FORMAT");
    cmd
}

pub fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}
