//! # shell-exec
//!
//! Run local commands from a host program, capturing their combined output.
//!
//! A command line is split into an argument vector and the program is
//! started directly, without a shell interpreter. Its stdout and stderr are
//! drained concurrently into one buffer and, unless asked to stay silent,
//! mirrored live to the caller's terminal.
//!
//! ## Features
//!
//! - **Quote-aware splitting**: `grep -r 'some phrase' .` passes the phrase as one argument
//! - **Combined capture**: stdout and stderr end up in a single string
//! - **Errors keep output**: failures carry everything captured so far
//! - **Blocking or async**: thread-based and tokio-based execution
//!
//! ## Quick Start
//!
//! ```no_run
//! use shell_exec::{split_lines, ExecOptions, Shell};
//!
//! fn main() -> shell_exec::Result<()> {
//!     // Initialize logging
//!     shell_exec::logging::try_init().ok();
//!
//!     let shell = Shell::new();
//!     let output = shell.exec("ls -1", ExecOptions::new().silent(true).trim_output(true))?;
//!
//!     for entry in split_lines(&output) {
//!         println!("{}", entry);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use error::{Result, ShellError};
pub use execution::{split_command_line, Command, ExecOptions, Executor, OutputSource, Shell};
pub use output::split_lines;
