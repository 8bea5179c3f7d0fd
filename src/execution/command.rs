//! Command representation.

use std::fmt;

use super::tokenizer::split_command_line;
use crate::error::ShellError;
use crate::Result;

/// A program and its arguments, ready to be spawned without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    /// Create a command for the given program with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a raw command line.
    ///
    /// Fails with [`ShellError::EmptyCommand`] when the line yields no
    /// program name.
    pub fn parse(command_line: &str) -> Result<Self> {
        Self::from_argv(split_command_line(command_line))
    }

    /// Build a command from an argument vector whose first element is the
    /// program.
    pub fn from_argv<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().ok_or(ShellError::EmptyCommand)?;
        if program.is_empty() {
            return Err(ShellError::EmptyCommand);
        }
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The full argument vector, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}
