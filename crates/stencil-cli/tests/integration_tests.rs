//! End-to-end tests for the `stencil` binary.

mod common;

use std::fs;

use predicates::prelude::*;

use common::{project, read, stencil};

#[test]
fn help_lists_subcommands() {
    let dir = project();
    stencil(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("eval"));
}

#[test]
fn version_matches_package() {
    let dir = project();
    stencil(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn render_creates_nested_file() {
    let dir = project();
    stencil(dir.path())
        .args(["render", "-t", "model.jinja", "-o", "src/{{ name }}.rs"])
        .args(["--set", "name=user_account"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("src/user_account.rs"));

    assert_eq!(
        read(dir.path(), "src/user_account.rs"),
        "pub struct UserAccount;\n"
    );
}

#[test]
fn existing_file_is_left_alone_until_forced() {
    let dir = project();
    fs::write(dir.path().join("user.rs"), "// hand edited\n").unwrap();
    let render = ["render", "-t", "model.jinja", "-o", "user.rs", "--set", "name=user"];

    stencil(dir.path())
        .args(render)
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
    assert_eq!(read(dir.path(), "user.rs"), "// hand edited\n");

    stencil(dir.path())
        .args(render)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten"));
    assert_eq!(read(dir.path(), "user.rs"), "pub struct User;\n");

    // --force did not persist anywhere: the next plain run is a no-op again.
    fs::write(dir.path().join("user.rs"), "// edited again\n").unwrap();
    stencil(dir.path()).args(render).assert().success();
    assert_eq!(read(dir.path(), "user.rs"), "// edited again\n");
}

#[test]
fn append_accumulates() {
    let dir = project();
    for name in ["a", "b"] {
        stencil(dir.path())
            .args(["render", "-t", "line.jinja", "-o", "lines.txt", "--append"])
            .args(["--set", &format!("name={name}")])
            .assert()
            .success();
    }
    assert_eq!(read(dir.path(), "lines.txt"), "a\nb\n");
}

#[test]
fn partial_template_expands_named_fragment() {
    let dir = project();
    fs::write(
        dir.path().join("entities.jinja"),
        "{% macro entity() %}struct {{ name | pascal_case }};{% endmacro %}\
         {% macro other() %}unused{% endmacro %}",
    )
    .unwrap();

    stencil(dir.path())
        .args(["render", "-t", "entities.jinja", "-o", "entity.rs"])
        .args(["--partial", "--name", "entity", "--set", "name=order_line"])
        .assert()
        .success();

    assert_eq!(read(dir.path(), "entity.rs"), "struct OrderLine;");
}

#[cfg(unix)]
#[test]
fn format_runs_in_process_then_external_formatter() {
    let dir = project();
    fs::write(
        dir.path().join("config.toml"),
        "[formatter]\ncommand = \"true\"\nargs = []\n",
    )
    .unwrap();
    fs::write(dir.path().join("messy.jinja"), "pub struct   {{ name }}{a:u8}").unwrap();

    stencil(dir.path())
        .args(["--config", "config.toml"])
        .args(["render", "-t", "messy.jinja", "-o", "messy.rs", "--format"])
        .args(["--set", "name=Messy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(formatted)"));

    assert_eq!(read(dir.path(), "messy.rs"), "pub struct Messy {\n    a: u8,\n}\n");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = project();
    stencil(dir.path())
        .args(["render", "-t", "model.jinja", "-o", "out/user.rs"])
        .args(["--set", "name=user", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would be created"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn json_output_is_an_array_of_reports() {
    let dir = project();
    let output = stencil(dir.path())
        .args(["--output-format", "json"])
        .args(["render", "-t", "model.jinja", "-o", "user.rs", "--set", "name=user"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["target"], "model");
    assert_eq!(reports[0]["outcome"], "created");
    assert_eq!(reports[0]["path"], "user.rs");
}

#[test]
fn eval_prints_rendered_string() {
    let dir = project();
    stencil(dir.path())
        .args(["eval", "{{ name | kebab_case }}-{{ port + 1 }}"])
        .args(["--set", "name=UserAccount", "--set", "port=8080"])
        .assert()
        .success()
        .stdout("user-account-8081\n");
}

#[test]
fn context_files_feed_templates() {
    let dir = project();
    fs::write(dir.path().join("ctx.json"), r#"{"service": {"name": "billing"}}"#).unwrap();
    fs::write(dir.path().join("ctx.toml"), "[service]\nname = \"ledger\"\n").unwrap();

    stencil(dir.path())
        .args(["eval", "{{ service.name }}", "--context", "ctx.json"])
        .assert()
        .success()
        .stdout("billing\n");

    // Later files win.
    stencil(dir.path())
        .args(["eval", "{{ service.name }}"])
        .args(["-C", "ctx.json", "-C", "ctx.toml"])
        .assert()
        .success()
        .stdout("ledger\n");
}

#[test]
fn generate_renders_every_manifest_target() {
    let dir = project();
    fs::create_dir(dir.path().join("codegen")).unwrap();
    fs::write(
        dir.path().join("codegen/model.jinja"),
        "pub struct {{ name | pascal_case }};\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("codegen/mod.jinja"),
        "pub mod {{ name }};\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("codegen/stencil.toml"),
        r#"
[context]
name = "invoice"

[[targets]]
template = "model.jinja"
path = "src/{{ name }}.rs"

[[targets]]
template = "mod.jinja"
path = "src/lib.rs"
append = true
"#,
    )
    .unwrap();

    stencil(dir.path())
        .args(["generate", "--manifest", "codegen/stencil.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/invoice.rs"))
        .stdout(predicate::str::contains("src/lib.rs"));

    // CLI context overrides the manifest's.
    stencil(dir.path())
        .args(["gen", "-m", "codegen/stencil.toml", "--set", "name=receipt"])
        .assert()
        .success();

    assert_eq!(read(dir.path(), "src/invoice.rs"), "pub struct Invoice;\n");
    assert_eq!(read(dir.path(), "src/receipt.rs"), "pub struct Receipt;\n");
    assert_eq!(
        read(dir.path(), "src/lib.rs"),
        "pub mod invoice;\npub mod receipt;\n"
    );
}

#[test]
fn templates_dir_from_config() {
    let dir = project();
    fs::create_dir(dir.path().join("tpl")).unwrap();
    fs::write(dir.path().join("tpl/hello.jinja"), "hello {{ who }}\n").unwrap();

    stencil(dir.path())
        .env("STENCIL_TEMPLATES__DIR", dir.path().join("tpl"))
        .args(["render", "-t", "hello.jinja", "-o", "hello.txt", "--set", "who=world"])
        .assert()
        .success();

    assert_eq!(read(dir.path(), "hello.txt"), "hello world\n");
}

#[test]
fn config_inspection() {
    let dir = project();
    stencil(dir.path())
        .args(["config", "get", "formatter.command"])
        .assert()
        .success()
        .stdout("rustfmt\n");

    stencil(dir.path())
        .env("STENCIL_FORMATTER__ARGS", "--edition 2021")
        .args(["config", "get", "formatter.args"])
        .assert()
        .success()
        .stdout("[\"--edition\",\"2021\"]\n");

    stencil(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("config.toml\n"));
}

#[test]
fn completions_are_generated() {
    let dir = project();
    stencil(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}
