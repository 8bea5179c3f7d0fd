//! Processing of captured output.
//!
//! # Example
//!
//! ```
//! use shell_exec::output::split_lines;
//!
//! let lines = split_lines("first\nsecond\n");
//! assert_eq!(lines, ["first", "second"]);
//! ```

mod lines;

pub use lines::split_lines;
