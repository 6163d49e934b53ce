//! Frame composition — one viewport snapshot to one byte buffer.
//!
//! [`render_frame`] writes a complete screen update into an
//! [`OutputBuffer`]: hide the cursor, home, repaint every row, reposition
//! the cursor, show it again. The caller then flushes the buffer to the
//! terminal in a single write, so the terminal never displays a
//! half-drawn frame.
//!
//! Rows are painted in place over the previous frame: each row's content
//! is followed by erase-to-end-of-line rather than clearing the whole
//! screen up front, which keeps the intermediate states (as far as the
//! terminal's own parser is concerned) fully drawn.
//!
//! Rows past the end of the buffer get a `~` marker. An empty buffer
//! additionally gets a centered welcome banner on the middle row.

use std::io::{self, Write};

use vista_term::ansi;
use vista_term::output::OutputBuffer;

use crate::buffer::LineBuffer;
use crate::viewport::Viewport;

/// Version shown in the welcome banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compose one full frame into `out`.
///
/// Assumes [`Viewport::scroll`] ran first, so the cursor lies within the
/// visible window; the final cursor-position directive depends on it.
///
/// # Errors
///
/// Propagates write errors from `out` (infallible for [`OutputBuffer`],
/// which is memory-backed; the fallible write happens at flush time).
pub fn render_frame(vp: &Viewport, buf: &LineBuffer, out: &mut OutputBuffer) -> io::Result<()> {
    ansi::cursor_hide(out)?;
    ansi::cursor_home(out)?;

    for y in 0..vp.rows() {
        let file_row = vp.row_off + y;

        if let Some(line) = buf.line(file_row) {
            draw_line(out, line.as_bytes(), vp.col_off, vp.cols())?;
        } else if buf.is_empty() && y == vp.rows() / 2 {
            draw_welcome(out, vp.cols())?;
        } else {
            out.write_all(b"~")?;
        }

        ansi::erase_line_tail(out)?;
        if y + 1 < vp.rows() {
            out.write_all(b"\r\n")?;
        }
    }

    // scroll() bounds both deltas within the screen, which fits u16.
    #[allow(clippy::cast_possible_truncation)]
    {
        let x = (vp.cursor_col - vp.col_off) as u16;
        let y = (vp.cursor_row - vp.row_off) as u16;
        ansi::cursor_to(out, x, y)?;
    }

    ansi::cursor_show(out)
}

/// Paint one buffer line, sliced to the horizontal window
/// `[col_off, col_off + cols)` and clamped to the available length.
fn draw_line(out: &mut OutputBuffer, bytes: &[u8], col_off: usize, cols: usize) -> io::Result<()> {
    let start = col_off.min(bytes.len());
    let end = col_off.saturating_add(cols).min(bytes.len());
    out.write_all(&bytes[start..end])
}

/// Paint the centered welcome banner for an empty buffer.
///
/// The row keeps its `~` marker as the first column when there is room,
/// matching the surrounding empty rows.
fn draw_welcome(out: &mut OutputBuffer, cols: usize) -> io::Result<()> {
    let banner = format!("vista -- version {VERSION}");
    let msg = &banner.as_bytes()[..banner.len().min(cols)];

    let mut padding = (cols - msg.len()) / 2;
    if padding > 0 {
        out.write_all(b"~")?;
        padding -= 1;
    }
    for _ in 0..padding {
        out.write_all(b" ")?;
    }
    out.write_all(msg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Render a frame and return the composed bytes as a string.
    fn render(vp: &Viewport, buf: &LineBuffer) -> String {
        let mut out = OutputBuffer::new();
        render_frame(vp, buf, &mut out).unwrap();
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn frame_hides_then_shows_cursor() {
        let frame = render(&Viewport::new(3, 10), &LineBuffer::new());
        assert!(frame.starts_with("\x1b[?25l"));
        assert!(frame.ends_with("\x1b[?25h"));
    }

    #[test]
    fn frame_homes_cursor_before_rows() {
        let frame = render(&Viewport::new(3, 10), &LineBuffer::new());
        assert!(frame.starts_with("\x1b[?25l\x1b[H"));
    }

    #[test]
    fn content_rows_and_tilde_rows() {
        let buf = LineBuffer::from_bytes(b"alpha\nbeta\n");
        let frame = render(&Viewport::new(4, 10), &buf);

        // Two content rows, then two filler rows; last row has no \r\n.
        let expected = "\x1b[?25l\x1b[H\
                        alpha\x1b[K\r\n\
                        beta\x1b[K\r\n\
                        ~\x1b[K\r\n\
                        ~\x1b[K\
                        \x1b[1;1H\x1b[?25h";
        assert_eq!(frame, expected);
    }

    #[test]
    fn long_line_clamped_to_screen_width() {
        let buf = LineBuffer::from_bytes(b"0123456789ABCDEF\n");
        let frame = render(&Viewport::new(1, 8), &buf);
        assert!(frame.contains("01234567\x1b[K"));
        assert!(!frame.contains("012345678")); // no 9th content byte
    }

    #[test]
    fn horizontal_scroll_slices_content() {
        let buf = LineBuffer::from_bytes(b"0123456789ABCDEF\n");
        let mut vp = Viewport::new(1, 4);
        vp.cursor_col = 9;
        vp.scroll(); // col_off = 6
        let frame = render(&vp, &buf);
        assert!(frame.contains("6789\x1b[K"));
    }

    #[test]
    fn col_off_past_line_end_renders_empty_row() {
        let buf = LineBuffer::from_bytes(b"ab\nlonger line here\n");
        let mut vp = Viewport::new(2, 5);
        vp.cursor_col = 9;
        vp.scroll();
        let frame = render(&vp, &buf);
        // First row's content ("ab") lies entirely left of the window.
        assert!(frame.starts_with("\x1b[?25l\x1b[H\x1b[K\r\n"));
    }

    #[test]
    fn vertical_scroll_starts_at_row_offset() {
        let buf = LineBuffer::from_bytes(b"one\ntwo\nthree\nfour\n");
        let mut vp = Viewport::new(2, 10);
        vp.cursor_row = 3;
        vp.scroll(); // row_off = 2
        let frame = render(&vp, &buf);
        assert!(frame.contains("three"));
        assert!(frame.contains("four"));
        assert!(!frame.contains("one"));
    }

    #[test]
    fn cursor_position_is_viewport_relative() {
        let buf = LineBuffer::from_bytes(b"one\ntwo\nthree\nfour\nfive\n");
        let mut vp = Viewport::new(3, 10);
        vp.cursor_row = 4;
        vp.cursor_col = 2;
        vp.scroll(); // row_off = 2
        let frame = render(&vp, &buf);
        // Screen row = 4 - 2 = 2 → ANSI row 3; col 2 → ANSI col 3.
        assert!(frame.contains("\x1b[3;3H"));
    }

    #[test]
    fn empty_buffer_centers_welcome_banner() {
        let frame = render(&Viewport::new(9, 60), &LineBuffer::new());
        let banner = format!("vista -- version {VERSION}");
        assert!(frame.contains(&banner));

        // Banner sits on the middle row (row index 4 of 9), prefixed by
        // the tilde that replaces the filler marker.
        let rows: Vec<&str> = frame.split("\r\n").collect();
        assert_eq!(rows.len(), 9);
        assert!(rows[4].contains(&banner));
        assert!(rows[4].contains('~'));
    }

    #[test]
    fn welcome_banner_is_horizontally_centered() {
        let cols = 60;
        let frame = render(&Viewport::new(3, cols), &LineBuffer::new());
        let banner = format!("vista -- version {VERSION}");
        let middle = frame.split("\r\n").nth(1).unwrap();

        // Strip the trailing erase directive before measuring.
        let content = middle.strip_suffix("\x1b[K").unwrap();
        let lead = content.len() - banner.len();
        assert_eq!(lead, (cols - banner.len()) / 2);
    }

    #[test]
    fn welcome_banner_truncated_on_narrow_screen() {
        let frame = render(&Viewport::new(3, 5), &LineBuffer::new());
        let middle = frame.split("\r\n").nth(1).unwrap();
        let content = middle.strip_suffix("\x1b[K").unwrap();
        assert_eq!(content, "vista");
    }

    #[test]
    fn nonempty_buffer_never_shows_banner() {
        let buf = LineBuffer::from_bytes(b"x\n");
        let frame = render(&Viewport::new(9, 60), &buf);
        assert!(!frame.contains("version"));
    }

    #[test]
    fn single_row_screen_has_no_newline() {
        let frame = render(&Viewport::new(1, 10), &LineBuffer::new());
        assert!(!frame.contains("\r\n"));
    }

    #[test]
    fn frame_is_composed_before_any_flush() {
        // Everything accumulates in the buffer; nothing escapes until the
        // caller flushes.
        let mut out = OutputBuffer::new();
        render_frame(&Viewport::new(2, 10), &LineBuffer::new(), &mut out).unwrap();
        assert!(!out.is_empty());

        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert!(out.is_empty());
        assert!(sink.starts_with(b"\x1b[?25l"));
    }
}
