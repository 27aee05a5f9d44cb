//! External formatter run on written files.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use stencil_core::{
    application::{ApplicationError, ports::ImportResolver},
    error::StencilResult,
};

/// Runs `program args... <path>` and requires a zero exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// `rustfmt --edition 2024`
    pub fn rustfmt() -> Self {
        Self::new("rustfmt").with_args(["--edition", "2024"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program and arguments joined for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandFormatter {
    fn default() -> Self {
        Self::rustfmt()
    }
}

impl ImportResolver for CommandFormatter {
    #[instrument(skip(self), fields(command = %self.command_line(), path = %path.display()))]
    fn format_path(&self, path: &Path) -> StencilResult<()> {
        let failed = |reason: String| ApplicationError::ExternalFormatter {
            command: self.command_line(),
            path: path.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| failed(format!("failed to execute: {e}")))?;

        if output.status.success() {
            debug!("Formatter succeeded");
            return Ok(());
        }

        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        Err(failed(format!("exit code {exit_code}: {message}")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::error::StencilError;

    #[test]
    fn default_is_rustfmt() {
        let formatter = CommandFormatter::default();
        assert_eq!(formatter.program(), "rustfmt");
        assert_eq!(formatter.args(), ["--edition", "2024"]);
    }

    #[test]
    fn missing_program_is_reported() {
        let err = CommandFormatter::new("stencil-no-such-formatter")
            .format_path(Path::new("x.rs"))
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::ExternalFormatter { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_success() {
        assert!(CommandFormatter::new("true").format_path(Path::new("x.rs")).is_ok());

        let err = CommandFormatter::new("false")
            .format_path(Path::new("x.rs"))
            .unwrap_err();
        assert!(err.to_string().contains("exit code 1"));
    }
}
