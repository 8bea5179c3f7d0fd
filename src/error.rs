//! Error types for shell-exec.

use std::process::ExitStatus;

use thiserror::Error;

use crate::execution::OutputSource;

/// Main error type for command execution.
///
/// Every variant raised after the child has been spawned carries the output
/// captured up to the point of failure; see [`ShellError::output`].
#[derive(Error, Debug)]
pub enum ShellError {
    /// The command line produced no program to run.
    #[error("no command specified to run")]
    EmptyCommand,

    /// The process could not be created.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The process exited with a non-zero status or was killed by a signal.
    #[error("shell error: {output}")]
    ExecutionFailed { status: ExitStatus, output: String },

    /// Waiting for the process to exit failed.
    #[error("failed to wait for child process: {source}")]
    Wait {
        output: String,
        source: std::io::Error,
    },

    /// Relaying bytes from one of the child's pipes failed.
    #[error("failed to copy {stream} of child process: {error}")]
    StreamCopy {
        stream: OutputSource,
        output: String,
        #[source]
        error: std::io::Error,
    },
}

impl ShellError {
    /// Output captured before the failure. Empty when nothing was captured.
    pub fn output(&self) -> &str {
        match self {
            Self::ExecutionFailed { output, .. }
            | Self::Wait { output, .. }
            | Self::StreamCopy { output, .. } => output,
            Self::EmptyCommand | Self::Spawn { .. } => "",
        }
    }

    /// Exit code of a failed process, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExecutionFailed { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Convenience Result type for shell-exec operations.
pub type Result<T> = std::result::Result<T, ShellError>;
