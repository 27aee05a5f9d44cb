//! Build a [`RenderContext`] from `--context` files and `--set` pairs.
//!
//! Layers, lowest priority first: the caller's base (a manifest's
//! `[context]` table), each context file in order, then each `--set`.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use stencil_core::domain::RenderContext;

use crate::{
    cli::ContextArgs,
    error::{CliError, CliResult},
};

/// Layer `args` on top of `base`.
pub fn load(args: &ContextArgs, base: RenderContext) -> CliResult<RenderContext> {
    let mut context = base;
    for path in &args.files {
        context = context.merge(read_file(path)?);
    }
    for assignment in &args.assignments {
        let (key, value) = parse_assignment(assignment)?;
        context.insert(key, value);
    }
    Ok(context)
}

/// Read a JSON or TOML context file. The top level must be a table.
fn read_file(path: &Path) -> CliResult<RenderContext> {
    let error = |message: String| CliError::ContextError {
        path: path.to_path_buf(),
        message,
    };

    let text = fs::read_to_string(path).map_err(|e| error(e.to_string()))?;
    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str::<Value>(&text).map_err(|e| error(e.to_string()))?,
        Some("toml") => {
            let table = toml::from_str::<toml::Table>(&text).map_err(|e| error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| error(e.to_string()))?
        }
        _ => return Err(error("expected a .json or .toml file".into())),
    };
    if !value.is_object() {
        return Err(error("top level must be an object".into()));
    }

    debug!(path = %path.display(), "Context file loaded");
    Ok(RenderContext::from(value))
}

/// `KEY=VALUE`. The value is a JSON scalar when it parses as one
/// (`8080`, `true`, `null`, `"quoted"`), else the raw string.
fn parse_assignment(assignment: &str) -> CliResult<(&str, Value)> {
    let invalid = |message: &str| CliError::InvalidInput {
        message: format!("--set {assignment}: {message}"),
        source: None,
    };

    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(invalid("key cannot be empty"));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) if !value.is_object() && !value.is_array() => value,
        _ => Value::String(raw.to_owned()),
    };
    Ok((key, value))
}
