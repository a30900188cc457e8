//! Error types for constants generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for constants generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors that can occur while generating the constants artifact.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Destination could not be opened, written or replaced.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Interpreter executable could not be launched.
    #[error("failed to launch interpreter {}: {source}", .program.display())]
    InterpreterLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Interpreter ran but exited unsuccessfully.
    #[error("interpreter {} exited with {status}: {stderr}", .program.display())]
    InterpreterFailed {
        program: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// Generator option would break the artifact layout.
    #[error("invalid {field}: {value:?}")]
    InvalidOption { field: &'static str, value: String },

    /// Interpreter output was not a `major.minor` version.
    #[error("unrecognised interpreter version output: {0:?}")]
    InterpreterOutput(String),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
