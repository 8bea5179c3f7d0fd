//! Output capture shared by the stdout and stderr drains.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Size of the chunks read from a child pipe.
pub(crate) const READ_BUFFER_SIZE: usize = 8192;

/// Which pipe of the child a piece of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl fmt::Display for OutputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Append-only byte sink that several writers may share.
///
/// Each write is appended under a lock, so chunks from different drains
/// never interleave mid-chunk.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of bytes.
    pub fn append(&self, chunk: &[u8]) -> io::Result<()> {
        let mut buf = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("capture buffer lock poisoned"))?;
        buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Number of bytes captured so far.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Captured bytes decoded as text, replacing invalid UTF-8.
    ///
    /// Still returns the data if a writer panicked while holding the lock.
    pub fn text(&self) -> String {
        let buf = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that captures every chunk and optionally mirrors it to a parent
/// stream.
///
/// The chunk is captured before it is mirrored, so a failing terminal never
/// loses captured output.
pub struct TeeWriter<W: Write> {
    capture: CaptureBuffer,
    mirror: Option<W>,
}

impl<W: Write> TeeWriter<W> {
    /// Create a tee over `capture`. `None` for `mirror` captures only.
    pub fn new(capture: CaptureBuffer, mirror: Option<W>) -> Self {
        Self { capture, mirror }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.capture.append(buf)?;
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.write_all(buf)?;
            mirror.flush()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.mirror.as_mut() {
            Some(mirror) => mirror.flush(),
            None => Ok(()),
        }
    }
}
