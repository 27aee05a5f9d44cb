//! Templates read from the local filesystem.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use stencil_core::application::ports::TemplateSource;

/// Opens templates relative to an optional root directory.
///
/// Without a root, paths resolve against the current working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalTemplateSource {
    root: Option<PathBuf>,
}

impl LocalTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative template paths against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TemplateSource for LocalTemplateSource {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let resolved = self.resolve(path);
        // Only regular files: opening a FIFO would block.
        if !fs::metadata(&resolved)?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a regular file", resolved.display()),
            ));
        }
        Ok(Box::new(File::open(resolved)?))
    }
}
