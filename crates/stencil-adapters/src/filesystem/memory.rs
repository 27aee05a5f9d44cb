//! In-memory writer for testing and dry runs.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tracing::debug;

use stencil_core::{
    application::ports::FileWriter,
    domain::{DomainValidator as validator, WriteAction, WriteMode, WriteOutcome},
    error::{StencilError, StencilResult},
};

/// In-memory file map that follows the same decision table as
/// [`LocalFileWriter`](super::LocalFileWriter).
///
/// Clones share the same storage, so a clone handed to a generator can be
/// inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileWriter {
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Read a file's content as text.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let files = self.files.read().ok()?;
        files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut files) = self.files.write() {
            files.clear();
        }
    }
}

impl FileWriter for MemoryFileWriter {
    fn write_file(
        &self,
        path: &Path,
        content: &[u8],
        mode: WriteMode,
    ) -> StencilResult<WriteOutcome> {
        validator::validate_destination(path)?;

        let mut files = self.files.write().map_err(|_| StencilError::Internal {
            message: "memory writer lock poisoned".into(),
        })?;

        let action = mode.decide(files.contains_key(path))?;
        match action {
            WriteAction::Create | WriteAction::Overwrite => {
                files.insert(path.to_path_buf(), content.to_vec());
            }
            WriteAction::Append => {
                files
                    .entry(path.to_path_buf())
                    .or_default()
                    .extend_from_slice(content);
            }
            WriteAction::Skip => {}
        }
        debug!(path = %path.display(), ?action, "Memory write");

        Ok(action.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::DomainError;

    #[test]
    fn follows_the_decision_table() {
        let writer = MemoryFileWriter::new().with_file("kept.txt", "mine");
        let kept = Path::new("kept.txt");

        assert_eq!(
            writer.write_file(kept, b"theirs", WriteMode::preserve()).unwrap(),
            WriteOutcome::NoOp
        );
        assert_eq!(writer.read_file(kept).unwrap(), "mine");

        assert_eq!(
            writer.write_file(kept, b"+", WriteMode::append()).unwrap(),
            WriteOutcome::Appended
        );
        assert_eq!(writer.read_file(kept).unwrap(), "mine+");

        assert_eq!(
            writer.write_file(kept, b"new", WriteMode::overwrite()).unwrap(),
            WriteOutcome::Overwritten
        );
        assert_eq!(writer.read_file(kept).unwrap(), "new");

        let fresh = Path::new("fresh.txt");
        assert_eq!(
            writer.write_file(fresh, b"x", WriteMode::preserve()).unwrap(),
            WriteOutcome::Created
        );
        assert_eq!(writer.list_files().len(), 2);
    }

    #[test]
    fn clones_share_storage() {
        let writer = MemoryFileWriter::new();
        let handle = writer.clone();
        writer
            .write_file(Path::new("a"), b"1", WriteMode::preserve())
            .unwrap();
        assert!(handle.exists(Path::new("a")));

        handle.clear();
        assert!(writer.list_files().is_empty());
    }

    #[test]
    fn rejects_conflict_and_empty_destination() {
        let writer = MemoryFileWriter::new();
        let conflict = WriteMode {
            overwrite_existing: true,
            append: true,
        };
        assert!(matches!(
            writer.write_file(Path::new("a"), b"", conflict),
            Err(StencilError::Domain(DomainError::WriteModeConflict))
        ));
        assert!(matches!(
            writer.write_file(Path::new(""), b"", WriteMode::preserve()),
            Err(StencilError::Domain(DomainError::EmptyDestination))
        ));
    }
}
