//! Command execution engine.
//!
//! This module provides:
//! - Splitting a command line into an argument vector
//! - Running the command with stdout and stderr captured into one buffer
//! - Optional live mirroring to the parent's terminal
//!
//! # Example
//!
//! ```no_run
//! use shell_exec::execution::{ExecOptions, Shell};
//!
//! let shell = Shell::new();
//!
//! // Mirror to the terminal and keep the output verbatim
//! let output = shell.exec("git status", ExecOptions::default()).unwrap();
//! println!("captured {} bytes", output.len());
//!
//! // Capture quietly and trim
//! let branch = shell
//!     .exec(
//!         "git rev-parse --abbrev-ref HEAD",
//!         ExecOptions::new().silent(true).trim_output(true),
//!     )
//!     .unwrap();
//! ```

mod capture;
mod command;
mod executor;
mod options;
mod tokenizer;

pub use capture::{CaptureBuffer, OutputSource, TeeWriter};
pub use command::Command;
pub use executor::{exec, exec_async, Executor, Shell};
pub use options::ExecOptions;
pub use tokenizer::split_command_line;
