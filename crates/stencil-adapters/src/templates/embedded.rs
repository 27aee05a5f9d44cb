//! Virtual template filesystem held in memory.
//!
//! # Directory layout
//!
//! ```text
//! templates/
//! ├── model.rs.jinja          ← opened as "model.rs.jinja"
//! └── handlers/
//!     └── crud.rs.jinja       ← opened as "handlers/crud.rs.jinja"
//! ```
//!
//! Every regular file under the root is read once by [`EmbeddedTemplates::from_dir`];
//! later opens never touch the disk. Keys are relative, `/`-separated paths.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Cursor, Read},
    path::{Component, Path},
    sync::Arc,
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::{StencilError, StencilResult},
};

/// In-memory template source.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedTemplates {
    files: BTreeMap<String, Arc<[u8]>>,
}

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template (builder style).
    pub fn with_template(mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = content.into();
        self.files.insert(normalize(path.as_ref()), Arc::from(bytes));
    }

    /// Load every regular file under `root`.
    ///
    /// # Errors
    ///
    /// - `StencilError::Configuration` if `root` is not a directory
    /// - `ApplicationError::FileRead` if a file cannot be read
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn from_dir(root: impl AsRef<Path>) -> StencilResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(StencilError::Configuration {
                message: format!("templates directory not found: {}", root.display()),
            });
        }

        let mut templates = Self::new();
        for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::FileRead {
                path: root.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let abs_path = entry.path();
            let rel_path = abs_path.strip_prefix(root).map_err(|_| StencilError::Internal {
                message: format!(
                    "failed to relativise '{}' against '{}'",
                    abs_path.display(),
                    root.display()
                ),
            })?;
            let bytes = fs::read(abs_path).map_err(|e| ApplicationError::FileRead {
                path: abs_path.to_path_buf(),
                reason: e.to_string(),
            })?;
            templates.insert(rel_path, bytes);
        }

        debug!(count = templates.len(), "Templates loaded");
        Ok(templates)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Template keys, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    fn is_directory(&self, key: &str) -> bool {
        let prefix = format!("{key}/");
        key.is_empty() || self.files.keys().any(|k| k.starts_with(&prefix))
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let key = normalize(path);
        if let Some(bytes) = self.files.get(&key) {
            return Ok(Box::new(Cursor::new(Arc::clone(bytes))));
        }

        let reason = if self.is_directory(&key) {
            format!("{} is a directory", path.display())
        } else {
            format!("{} is not an embedded template", path.display())
        };
        Err(io::Error::new(io::ErrorKind::NotFound, reason))
    }
}

/// `./a\b/../c.jinja` style noise → `a/c.jinja`.
fn normalize(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().replace('\\', "/")),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(templates: &EmbeddedTemplates, path: &str) -> io::Result<String> {
        let mut text = String::new();
        templates.open(Path::new(path))?.read_to_string(&mut text)?;
        Ok(text)
    }

    #[test]
    fn loads_nested_tree_from_disk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("handlers")).unwrap();
        fs::write(dir.path().join("model.jinja"), "model").unwrap();
        fs::write(dir.path().join("handlers/crud.jinja"), "crud").unwrap();

        let templates = EmbeddedTemplates::from_dir(dir.path()).unwrap();

        assert_eq!(templates.len(), 2);
        assert_eq!(read(&templates, "model.jinja").unwrap(), "model");
        assert_eq!(read(&templates, "./handlers/crud.jinja").unwrap(), "crud");
    }

    #[test]
    fn missing_root_is_a_configuration_error() {
        let err = EmbeddedTemplates::from_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, StencilError::Configuration { .. }));
    }

    #[test]
    fn directories_and_unknown_paths_are_not_found() {
        let templates = EmbeddedTemplates::new().with_template("handlers/crud.jinja", "crud");

        let folder = templates.open(Path::new("handlers")).err().unwrap();
        assert_eq!(folder.kind(), io::ErrorKind::NotFound);
        assert!(folder.to_string().contains("directory"));

        let unknown = templates.open(Path::new("nope.jinja")).err().unwrap();
        assert_eq!(unknown.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn keys_are_normalized() {
        let templates = EmbeddedTemplates::new().with_template("./a/../b.jinja", "b");
        assert_eq!(templates.paths().collect::<Vec<_>>(), vec!["b.jinja"]);
    }
}
