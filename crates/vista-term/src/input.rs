// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Key decoding — raw stdin bytes to logical key events.
//
// Raw mode delivers keyboard input as bare bytes, and the interesting keys
// (arrows, Home/End, page keys, Delete) arrive as multi-byte escape
// sequences. The wrinkle is that a lone ESC byte is ambiguous: it could be
// the Escape key, or the first byte of a sequence whose remainder hasn't
// arrived yet. With VMIN=0/VTIME=1 termios settings every read() doubles
// as a ~100ms timeout, so the decoder resolves the ambiguity by bounded
// lookahead: try to read the next sequence byte, and if the timeout fires
// first, the whole thing was just Escape.
//
// Decoding never fails. A malformed or truncated sequence degrades to
// `Escape` or `Unknown` and the loop carries on; only a real read() error
// from the OS propagates.
//
// The grammar lives in pure `const fn` tables ([`decode_plain`],
// [`decode_tilde`], [`decode_csi_final`]); the [`Decoder`] only sequences
// the lookahead reads. Byte acquisition hides behind the [`ByteSource`]
// trait so tests can script exact byte/timeout interleavings.

use std::io;

/// Ctrl-Q — the quit chord (0x11, 'q' with bits 5 and 6 stripped).
const CTRL_Q: u8 = 0x11;

/// The escape byte that introduces multi-byte sequences.
const ESC: u8 = 0x1b;

// ─── Key ────────────────────────────────────────────────────────────────────

/// A decoded key event.
///
/// A closed set: every byte (or byte sequence) stdin can produce maps to
/// exactly one variant. Sequences the viewer doesn't recognize map to
/// [`Unknown`](Key::Unknown) rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable byte (or any byte outside the control range).
    Char(u8),
    /// A control byte (0x00–0x1F or 0x7F), carrying the raw value.
    Ctrl(u8),
    /// The Escape key on its own (or a sequence that degraded to it).
    Escape,
    // ── Navigation ──────────────────────────────────────────────
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    /// The quit chord (Ctrl-Q).
    Quit,
    /// A well-formed but unrecognized escape sequence.
    Unknown,
}

// ─── ByteSource ─────────────────────────────────────────────────────────────

/// One byte at a time from the input device, or a timeout.
///
/// `Ok(Some(b))` — a byte arrived. `Ok(None)` — the read timed out with
/// nothing available (the VMIN=0/VTIME=1 contract). `Err` — a real read
/// failure, which is fatal.
pub trait ByteSource {
    /// Read the next byte, waiting at most one read-timeout interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails for any reason other
    /// than a timeout.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

/// [`ByteSource`] over the process's controlling terminal (stdin).
///
/// Each call issues one `read()` on `STDIN_FILENO`. Raw mode's VMIN=0 /
/// VTIME=1 settings make that read return within ~100ms: a zero-byte
/// result (or `EAGAIN`) is a timeout, not an error.
#[derive(Debug, Default)]
pub struct TtyInput;

impl TtyInput {
    /// Create a stdin byte source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl ByteSource for TtyInput {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte: u8 = 0;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast::<libc::c_void>(), 1) };
        match n {
            1 => Ok(Some(byte)),
            // VTIME expired with nothing buffered.
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                // Some platforms report the timeout as EAGAIN instead of
                // a zero-length read.
                if err.raw_os_error() == Some(libc::EAGAIN) {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}

#[cfg(not(unix))]
impl ByteSource for TtyInput {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "raw key input requires a Unix terminal",
        ))
    }
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Turns a stream of raw bytes into [`Key`] events.
///
/// [`read_key`](Self::read_key) blocks (looping on timeouts) until a key
/// arrives, then performs the bounded lookahead needed to classify escape
/// sequences. Generic over [`ByteSource`] so tests can feed scripted
/// byte/timeout patterns.
pub struct Decoder<S> {
    src: S,
}

impl<S: ByteSource> Decoder<S> {
    /// Wrap a byte source.
    pub const fn new(src: S) -> Self {
        Self { src }
    }

    /// Read and decode one key event, blocking until input arrives.
    ///
    /// Timeouts before the first byte simply loop — no input pending is
    /// not an error. Timeouts *inside* an escape sequence resolve the
    /// ambiguity: the sequence degrades to a bare [`Key::Escape`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying source fails.
    pub fn read_key(&mut self) -> io::Result<Key> {
        let first = loop {
            if let Some(byte) = self.src.next_byte()? {
                break byte;
            }
        };

        if first == ESC {
            self.decode_escape()
        } else {
            Ok(decode_plain(first))
        }
    }

    /// Decode the remainder of a sequence after a leading ESC byte.
    ///
    /// Grammar (each lookahead read may time out, degrading to `Escape`):
    ///
    /// ```text
    /// ESC [ 1|3|4|5|6|7|8 ~   → Home/Delete/End/PageUp/PageDown/Home/End
    /// ESC [ A|B|C|D|H|F       → arrows, Home, End
    /// ESC O H|F               → Home, End
    /// ```
    fn decode_escape(&mut self) -> io::Result<Key> {
        let Some(b0) = self.src.next_byte()? else {
            return Ok(Key::Escape);
        };

        match b0 {
            b'[' => {
                let Some(b1) = self.src.next_byte()? else {
                    return Ok(Key::Escape);
                };
                if b1.is_ascii_digit() {
                    // Expect a closing '~' as the fourth byte.
                    let Some(b2) = self.src.next_byte()? else {
                        return Ok(Key::Escape);
                    };
                    if b2 == b'~' {
                        Ok(decode_tilde(b1))
                    } else {
                        Ok(Key::Unknown)
                    }
                } else {
                    Ok(decode_csi_final(b1))
                }
            }
            b'O' => {
                let Some(b1) = self.src.next_byte()? else {
                    return Ok(Key::Escape);
                };
                Ok(match b1 {
                    b'H' => Key::Home,
                    b'F' => Key::End,
                    _ => Key::Unknown,
                })
            }
            // Anything else after ESC is not a sequence we speak; report
            // the Escape key and leave the byte's meaning to the next read.
            _ => Ok(Key::Escape),
        }
    }
}

// ─── Decode Tables ──────────────────────────────────────────────────────────

/// Classify a single non-ESC byte.
const fn decode_plain(byte: u8) -> Key {
    match byte {
        CTRL_Q => Key::Quit,
        0x00..=0x1f | 0x7f => Key::Ctrl(byte),
        _ => Key::Char(byte),
    }
}

/// Map the digit of a tilde-terminated sequence (`ESC [ digit ~`).
///
/// VT sequences overlap here: both 1 and 7 mean Home, both 4 and 8 mean
/// End, depending on the terminal's lineage. Digits with no assignment
/// (0, 2, 9) are `Unknown`.
const fn decode_tilde(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Unknown,
    }
}

/// Map the final letter of a plain CSI sequence (`ESC [ letter`).
const fn decode_csi_final(letter: u8) -> Key {
    match letter {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Unknown,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
