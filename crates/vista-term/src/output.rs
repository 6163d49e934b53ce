// SPDX-License-Identifier: MIT
//
// Output buffering — one write() per frame.
//
// Every escape sequence and text byte of a frame accumulates in memory
// first, then a single write() syscall sends the whole thing. Writing a
// frame piecemeal lets the terminal display a half-drawn screen between
// writes; one atomic write eliminates that flicker entirely, and as a
// bonus collapses hundreds of tiny syscalls into one.

use std::io::{self, Write};

/// A byte buffer that accumulates one frame of terminal output.
///
/// Implements `Write`, so the `ansi` emitters and `write!` both target it
/// directly. Nothing reaches the terminal until [`flush_stdout`] or
/// [`flush_to`] is called, and then everything goes at once.
///
/// [`flush_stdout`]: OutputBuffer::flush_stdout
/// [`flush_to`]: OutputBuffer::flush_to
pub struct OutputBuffer {
    buf: Vec<u8>,
}

/// Enough for an 80×24 frame with an escape sequence per row, with room
/// to spare for wide terminals. Reused across frames, so a one-time cost.
const DEFAULT_CAPACITY: usize = 8192;

impl OutputBuffer {
    /// Create an empty buffer with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write the accumulated frame to stdout in one call and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails. A short write is an
    /// error too — `write_all` either delivers the whole frame or fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&self.buf)?;
            stdout.flush()?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Write the accumulated frame to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
