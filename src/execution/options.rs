//! Execution options.

use serde::{Deserialize, Serialize};

/// Options for a single command execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecOptions {
    /// Capture output without mirroring it to the terminal.
    pub silent: bool,
    /// Strip leading and trailing whitespace from the captured output.
    pub trim_output: bool,
}

impl ExecOptions {
    /// Create options with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is mirrored to the terminal.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set whether the captured output is trimmed.
    pub fn trim_output(mut self, trim: bool) -> Self {
        self.trim_output = trim;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExecOptions::default();
        assert!(!options.silent);
        assert!(!options.trim_output);
        assert_eq!(options, ExecOptions::new());
    }

    #[test]
    fn test_builder_chain() {
        let options = ExecOptions::new().silent(true).trim_output(true);
        assert!(options.silent);
        assert!(options.trim_output);
    }

    #[test]
    fn test_partial_json() {
        let options: ExecOptions = serde_json::from_str(r#"{"trim_output": true}"#).unwrap();
        assert!(!options.silent);
        assert!(options.trim_output);
    }
}
