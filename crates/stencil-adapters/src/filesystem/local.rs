//! Local filesystem writer using std::fs.
//!
//! Implements the write decision engine against the real filesystem:
//! validate, bootstrap the parent directory, probe it for writability
//! (repairing permissions once if needed), then create, overwrite, append
//! or leave the destination alone.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use stencil_core::{
    application::{ApplicationError, ports::FileWriter},
    domain::{DomainValidator as validator, WriteAction, WriteMode, WriteOutcome},
    error::StencilResult,
};

/// Sentinel created and removed in a destination folder to prove it is
/// writable.
pub const WRITE_PROBE: &str = ".stencil-write-probe";

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Production writer implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileWriter;

impl LocalFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for LocalFileWriter {
    #[instrument(skip(self, content), fields(path = %path.display(), mode = %mode, bytes = content.len()))]
    fn write_file(
        &self,
        path: &Path,
        content: &[u8],
        mode: WriteMode,
    ) -> StencilResult<WriteOutcome> {
        validator::validate_destination(path)?;
        validator::validate_write_mode(&mode)?;

        let folder = parent_dir(path);
        ensure_folder(folder)?;
        ensure_writable(folder)?;

        let exists = path
            .try_exists()
            .map_err(|e| write_failed(path, e, "inspect destination"))?;
        let action = mode.decide(exists)?;
        debug!(?action, exists, "Write decided");

        match action {
            WriteAction::Create => {
                let file = create_options()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .map_err(|e| write_failed(path, e, "create file"))?;
                write_all(file, path, content)?;
            }
            WriteAction::Overwrite => {
                let file = OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .open(path)
                    .map_err(|e| write_failed(path, e, "open file for overwrite"))?;
                write_all(file, path, content)?;
            }
            WriteAction::Append => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(path)
                    .map_err(|e| write_failed(path, e, "open file for append"))?;
                write_all(file, path, content)?;
            }
            WriteAction::Skip => {
                debug!("Destination exists and is not managed, skipping");
            }
        }

        Ok(action.outcome())
    }
}

/// The folder a destination lives in. A bare file name lives in `.`.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn ensure_folder(folder: &Path) -> StencilResult<()> {
    if folder.is_dir() {
        return Ok(());
    }
    debug!(folder = %folder.display(), "Creating target folder");

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(folder)
        .map_err(|e| ApplicationError::DirectoryBootstrap {
            path: folder.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(())
}

fn ensure_writable(folder: &Path) -> StencilResult<()> {
    ensure_writable_with(folder, probe, relax_permissions)
}

/// Probe `folder`; on a denied probe, `relax` it once and probe again.
fn ensure_writable_with(
    folder: &Path,
    mut probe: impl FnMut(&Path) -> io::Result<()>,
    relax: impl FnOnce(&Path) -> io::Result<()>,
) -> StencilResult<()> {
    match probe(folder) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(folder = %folder.display(), "Target folder is not writable, relaxing permissions");
            relax(folder).map_err(|e| permission_repair(folder, e))?;
            probe(folder).map_err(|e| permission_repair(folder, e))
        }
        Err(e) => Err(ApplicationError::DirectoryBootstrap {
            path: folder.to_path_buf(),
            reason: e.to_string(),
        }
        .into()),
    }
}

/// Create and remove the sentinel. The handle is closed before removal.
fn probe(folder: &Path) -> io::Result<()> {
    let sentinel = folder.join(WRITE_PROBE);
    drop(File::create(&sentinel)?);
    fs::remove_file(&sentinel)
}

#[cfg(unix)]
fn relax_permissions(folder: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(folder, fs::Permissions::from_mode(DIR_MODE))
}

#[cfg(not(unix))]
fn relax_permissions(folder: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(folder)?.permissions();
    perms.set_readonly(false);
    fs::set_permissions(folder, perms)
}

fn create_options() -> OpenOptions {
    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options
}

/// Write and flush; the handle is dropped on every path out.
fn write_all(mut file: File, path: &Path, content: &[u8]) -> StencilResult<()> {
    file.write_all(content)
        .and_then(|()| file.flush())
        .map_err(|e| write_failed(path, e, "write content"))
}

fn write_failed(path: &Path, e: io::Error, operation: &str) -> stencil_core::error::StencilError {
    ApplicationError::WriteFailed {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn permission_repair(folder: &Path, e: io::Error) -> stencil_core::error::StencilError {
    ApplicationError::PermissionRepair {
        path: PathBuf::from(folder),
        reason: e.to_string(),
    }
    .into()
}
