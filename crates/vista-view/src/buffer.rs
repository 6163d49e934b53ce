//! Line storage — the file as an ordered sequence of immutable lines.
//!
//! The viewer never mutates text, so the model is deliberately plain: a
//! [`LineBuffer`] is a `Vec` of [`Line`]s in file order, and a [`Line`] is
//! an owned byte slice with its terminator already stripped. Index `i`
//! addresses the i-th line of the source for the buffer's whole lifetime.
//!
//! Everything is byte-oriented. The renderer slices lines at arbitrary
//! column offsets for horizontal scrolling, and byte storage keeps that a
//! plain range operation with no encoding assumptions about the file.

use std::fs;
use std::io;
use std::path::Path;

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// One row of source text, without its trailing line terminator.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(Box<[u8]>);

impl Line {
    /// Build a line from one raw file record, stripping a trailing `\n`
    /// or `\r\n` if present.
    fn from_record(record: &[u8]) -> Self {
        let mut end = record.len();
        if end > 0 && record[end - 1] == b'\n' {
            end -= 1;
        }
        if end > 0 && record[end - 1] == b'\r' {
            end -= 1;
        }
        Self(record[..end].into())
    }

    /// The line's content bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Content length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line has no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LineBuffer
// ---------------------------------------------------------------------------

/// The loaded file: lines in source order, queried by index.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    /// An empty buffer (no file loaded).
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Load a file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; the caller treats
    /// this as fatal.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Build a buffer from raw file content.
    ///
    /// Records are delimited by LF, optionally preceded by CR; terminators
    /// are stripped. A trailing newline does not produce a phantom empty
    /// final line.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let lines = bytes
            .split_inclusive(|&b| b == b'\n')
            .map(Line::from_record)
            .collect();
        Self { lines }
    }

    /// The line at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer holds no lines.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
