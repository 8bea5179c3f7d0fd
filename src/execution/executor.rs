//! Command execution engine.

use std::io::{self, Read, Write};
use std::process::{ExitStatus, Stdio};
use std::thread;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinError;
use tracing::{debug, warn};

use super::capture::{CaptureBuffer, OutputSource, TeeWriter, READ_BUFFER_SIZE};
use super::command::Command;
use super::options::ExecOptions;
use crate::error::ShellError;
use crate::Result;

/// Something that can run a command line and return its captured output.
///
/// Host programs take `&dyn Executor` (or a generic bound) so tests can
/// substitute a canned implementation for [`Shell`].
pub trait Executor {
    /// Run `command` and return everything it wrote to stdout and stderr.
    fn exec(&self, command: &str, options: ExecOptions) -> Result<String>;
}

/// Runs local commands directly, without a shell interpreter.
///
/// The child inherits the parent's environment and stdin. Its stdout and
/// stderr are captured into one buffer and, unless
/// [`silent`](ExecOptions::silent) is set, mirrored live to the parent's
/// own stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shell;

impl Shell {
    /// Create a new shell.
    pub fn new() -> Self {
        Self
    }

    /// Parse and run a command line, blocking until the child exits.
    pub fn exec(&self, command: &str, options: ExecOptions) -> Result<String> {
        let command = Command::parse(command)?;
        self.exec_command(&command, options)
    }

    /// Run an already parsed command, blocking until the child exits.
    ///
    /// Stderr is drained on a scoped worker thread while stdout is drained
    /// here; both must finish before the child is reaped, otherwise a child
    /// blocked on a full pipe would never exit.
    pub fn exec_command(&self, command: &Command, options: ExecOptions) -> Result<String> {
        debug!("spawning: {}", command);

        let mut child = std::process::Command::new(command.program())
            .args(command.get_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: command.program().to_string(),
                source,
            })?;

        let capture = CaptureBuffer::new();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mirror = !options.silent;

        let (stdout_result, stderr_result) = thread::scope(|s| {
            let stderr_capture = capture.clone();
            let worker = s.spawn(move || drain(stderr, stderr_capture, mirror.then(io::stderr)));

            let stdout_result = drain(stdout, capture.clone(), mirror.then(io::stdout));
            let stderr_result = worker
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr drain thread panicked")));
            (stdout_result, stderr_result)
        });

        let status = child.wait();
        settle(command, status, &capture, stdout_result, stderr_result, options)
    }

    /// Parse and run a command line on the tokio runtime.
    pub async fn exec_async(&self, command: &str, options: ExecOptions) -> Result<String> {
        let command = Command::parse(command)?;
        self.exec_command_async(&command, options).await
    }

    /// Run an already parsed command on the tokio runtime.
    ///
    /// Stderr is drained on a spawned task and stdout on the current one;
    /// the task is awaited before the child is reaped.
    pub async fn exec_command_async(
        &self,
        command: &Command,
        options: ExecOptions,
    ) -> Result<String> {
        debug!("spawning: {}", command);

        let mut child = tokio::process::Command::new(command.program())
            .args(command.get_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: command.program().to_string(),
                source,
            })?;

        let capture = CaptureBuffer::new();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mirror = !options.silent;

        let worker = tokio::spawn(drain_async(
            stderr,
            capture.clone(),
            mirror.then(tokio::io::stderr),
        ));
        let stdout_result =
            drain_async(stdout, capture.clone(), mirror.then(tokio::io::stdout)).await;
        let stderr_result = joined(worker.await);

        let status = child.wait().await;
        settle(command, status, &capture, stdout_result, stderr_result, options)
    }
}

impl Executor for Shell {
    fn exec(&self, command: &str, options: ExecOptions) -> Result<String> {
        Shell::exec(self, command, options)
    }
}

/// Copy one child pipe into the capture buffer, mirroring if requested.
fn drain<R: Read, W: Write>(
    reader: Option<R>,
    capture: CaptureBuffer,
    mirror: Option<W>,
) -> io::Result<u64> {
    let Some(mut reader) = reader else {
        return Ok(0);
    };
    let mut tee = TeeWriter::new(capture, mirror);
    io::copy(&mut reader, &mut tee)
}

async fn drain_async<R, W>(
    reader: Option<R>,
    capture: CaptureBuffer,
    mut mirror: Option<W>,
) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(0);
    };
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        // Capture first so a broken terminal cannot lose output.
        capture.append(&buf[..n])?;
        if let Some(mirror) = mirror.as_mut() {
            mirror.write_all(&buf[..n]).await?;
            mirror.flush().await?;
        }
        total += n as u64;
    }

    Ok(total)
}

/// Flatten a drain task's join result; a panicked or cancelled task counts
/// as a failed copy.
fn joined(result: std::result::Result<io::Result<u64>, JoinError>) -> io::Result<u64> {
    result.unwrap_or_else(|e| Err(io::Error::other(e)))
}

/// Turn the outcome of a finished run into the caller's result.
///
/// Exit status is checked before either drain error, and the stdout drain
/// (run on the calling side) before the stderr drain.
fn settle(
    command: &Command,
    status: io::Result<ExitStatus>,
    capture: &CaptureBuffer,
    stdout_result: io::Result<u64>,
    stderr_result: io::Result<u64>,
    options: ExecOptions,
) -> Result<String> {
    let output = capture.text();

    let status = match status {
        Ok(status) => status,
        Err(source) => return Err(ShellError::Wait { output, source }),
    };
    debug!("{} exited with {}", command.program(), status);

    if !status.success() {
        warn!("command failed ({}): {}", status, command);
        return Err(ShellError::ExecutionFailed { status, output });
    }
    if let Err(error) = stdout_result {
        return Err(ShellError::StreamCopy {
            stream: OutputSource::Stdout,
            output,
            error,
        });
    }
    if let Err(error) = stderr_result {
        return Err(ShellError::StreamCopy {
            stream: OutputSource::Stderr,
            output,
            error,
        });
    }

    if options.trim_output {
        Ok(output.trim().to_string())
    } else {
        Ok(output)
    }
}

/// Run a command line with a default [`Shell`].
pub fn exec(command: &str, options: ExecOptions) -> Result<String> {
    Shell::new().exec(command, options)
}

/// Run a command line with a default [`Shell`] on the tokio runtime.
pub async fn exec_async(command: &str, options: ExecOptions) -> Result<String> {
    Shell::new().exec_async(command, options).await
}
