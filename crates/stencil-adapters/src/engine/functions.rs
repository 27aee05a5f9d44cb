//! Template function library.
//!
//! Every registered function is installed twice: as a global callable
//! (`snake_case(name)`) and as a filter (`name | snake_case`). In filter
//! form the piped value becomes the first argument.

use std::collections::BTreeMap;

use minijinja::value::{Rest, Value};
use minijinja::{Environment, Error, State};

use super::case;

/// Named functions made available to every template.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Value>,
}

impl FunctionRegistry {
    /// An empty registry. See [`FunctionRegistry::standard`] for the default
    /// library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default library: case conversion, string and list helpers,
    /// timestamps and ids.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        // Case
        registry.insert("snake_case", Value::from_function(snake_case));
        registry.insert("camel_case", Value::from_function(camel_case));
        registry.insert("pascal_case", Value::from_function(pascal_case));
        registry.insert("kebab_case", Value::from_function(kebab_case));
        registry.insert("upper_snake_case", Value::from_function(upper_snake_case));

        // Strings
        registry.insert("trim_prefix", Value::from_function(trim_prefix));
        registry.insert("trim_suffix", Value::from_function(trim_suffix));
        registry.insert("has_prefix", Value::from_function(has_prefix));
        registry.insert("has_suffix", Value::from_function(has_suffix));
        registry.insert("contains", Value::from_function(contains));
        registry.insert("repeat", Value::from_function(repeat));
        registry.insert("quote", Value::from_function(quote));
        registry.insert("squote", Value::from_function(squote));
        registry.insert("indent", Value::from_function(indent));
        registry.insert("nindent", Value::from_function(nindent));
        registry.insert("split", Value::from_function(split));

        // Lists
        registry.insert("uniq", Value::from_function(uniq));
        registry.insert("compact", Value::from_function(compact));
        registry.insert("has", Value::from_function(has));

        // Time and ids
        registry.insert("now", Value::from_function(now));
        registry.insert("date", Value::from_function(date));
        registry.insert("uuidv4", Value::from_function(uuidv4));

        registry
    }

    /// Register `function` under `name`, replacing any previous entry.
    ///
    /// `function` must be callable, typically built with
    /// [`Value::from_function`].
    pub fn insert(&mut self, name: impl Into<String>, function: Value) {
        self.functions.insert(name.into(), function);
    }

    /// Builder-style [`FunctionRegistry::insert`].
    pub fn with(mut self, name: impl Into<String>, function: Value) -> Self {
        self.insert(name, function);
        self
    }

    /// Merge `overrides` into this registry. On a name collision the
    /// override wins.
    pub fn merge(mut self, overrides: FunctionRegistry) -> Self {
        self.functions.extend(overrides.functions);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Install every function as a global and as a filter.
    pub fn install(&self, env: &mut Environment<'_>) {
        for (name, function) in &self.functions {
            env.add_global(name.clone(), function.clone());

            let function = function.clone();
            env.add_filter(
                name.clone(),
                move |state: &State, value: Value, rest: Rest<Value>| -> Result<Value, Error> {
                    let mut args = Vec::with_capacity(rest.len() + 1);
                    args.push(value);
                    args.extend(rest.0);
                    function.call(state, &args)
                },
            );
        }
    }
}

// ── Case ──────────────────────────────────────────────────────────────────────

fn snake_case(value: &str) -> String {
    case::to_snake_case(value)
}

fn camel_case(value: &str) -> String {
    case::to_camel_case(value)
}

fn pascal_case(value: &str) -> String {
    case::to_pascal_case(value)
}

fn kebab_case(value: &str) -> String {
    case::to_kebab_case(value)
}

fn upper_snake_case(value: &str) -> String {
    case::to_upper_snake_case(value)
}

// ── Strings ───────────────────────────────────────────────────────────────────

fn trim_prefix(value: &str, prefix: &str) -> String {
    value.strip_prefix(prefix).unwrap_or(value).to_owned()
}

fn trim_suffix(value: &str, suffix: &str) -> String {
    value.strip_suffix(suffix).unwrap_or(value).to_owned()
}

fn has_prefix(value: &str, prefix: &str) -> bool {
    value.starts_with(prefix)
}

fn has_suffix(value: &str, suffix: &str) -> bool {
    value.ends_with(suffix)
}

fn contains(value: &str, needle: &str) -> bool {
    value.contains(needle)
}

fn repeat(value: &str, count: usize) -> String {
    value.repeat(count)
}

/// Double-quote with `\` and `"` escaped.
fn quote(value: Value) -> String {
    let text = value.to_string();
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn squote(value: Value) -> String {
    format!("'{value}'")
}

/// Prefix every non-empty line with `spaces` spaces.
fn indent(value: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    value
        .lines()
        .map(|line| {
            if line.is_empty() {
                line.to_owned()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// [`indent`] preceded by a newline.
fn nindent(value: &str, spaces: usize) -> String {
    format!("\n{}", indent(value, spaces))
}

fn split(value: &str, separator: &str) -> Vec<String> {
    value.split(separator).map(str::to_owned).collect()
}

// ── Lists ─────────────────────────────────────────────────────────────────────

/// Drop repeated items, keeping first occurrences in order.
fn uniq(values: Vec<Value>) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Drop falsy items (empty strings, zero, none, empty collections).
fn compact(values: Vec<Value>) -> Vec<Value> {
    values.into_iter().filter(Value::is_true).collect()
}

fn has(values: Vec<Value>, needle: Value) -> bool {
    values.contains(&needle)
}

// ── Time and ids ──────────────────────────────────────────────────────────────

/// Local time, RFC 3339.
fn now() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Local time rendered with a `strftime` pattern, e.g. `date("%Y")`.
fn date(format: &str) -> String {
    chrono::Local::now().format(format).to_string()
}

fn uuidv4() -> String {
    uuid::Uuid::new_v4().to_string()
}
