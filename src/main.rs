// SPDX-License-Identifier: MIT
//
// vista — a minimal raw-terminal text file viewer.
//
// This is the main binary that wires together the crates:
//
//   vista-term → raw mode, ANSI output, key decoding
//   vista-view → line buffer, viewport, frame rendering
//
// The frame loop is a two-state machine: Running until the quit chord
// (Ctrl-Q) arrives, then Terminated. Each Running iteration:
//
//   scroll → render frame → flush (one write) → read key → dispatch
//
// Raw mode is held by an RAII guard scoped inside run(), so the terminal
// is restored on every exit path — quit, `?`-propagated error, and (via
// the panic hook vista-term installs) unwinding.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use vista_term::ansi;
use vista_term::input::{Decoder, Key, TtyInput};
use vista_term::output::OutputBuffer;
use vista_term::terminal::{self, DEFAULT_SIZE, RawMode};
use vista_view::buffer::LineBuffer;
use vista_view::render::render_frame;
use vista_view::viewport::{Move, Viewport};

fn main() {
    let path = env::args_os().nth(1).map(PathBuf::from);

    if let Err(err) = run(path.as_deref()) {
        // run() has already dropped the raw-mode guard by the time the
        // error reaches us, so the diagnostic prints to a sane terminal.
        eprintln!("vista: {err}");
        process::exit(1);
    }
}

/// Load the file (if any), enter raw mode, and drive the frame loop.
fn run(path: Option<&Path>) -> io::Result<()> {
    // Load before touching the terminal: an unreadable file should fail
    // with a plain error message, not a garbled raw-mode screen.
    let buffer = match path {
        Some(p) => LineBuffer::load(p)?,
        None => LineBuffer::new(),
    };

    // Captured once; the viewer treats the screen size as constant.
    let size = terminal::get_size().unwrap_or(DEFAULT_SIZE);
    let mut viewport = Viewport::new(usize::from(size.rows), usize::from(size.cols));

    let _raw = RawMode::enter()?;

    let mut decoder = Decoder::new(TtyInput::new());
    let mut out = OutputBuffer::new();

    loop {
        viewport.scroll();
        render_frame(&viewport, &buffer, &mut out)?;
        out.flush_stdout()?;

        match decoder.read_key()? {
            Key::Quit => break,
            Key::ArrowUp => viewport.move_cursor(Move::Up, buffer.len()),
            Key::ArrowDown => viewport.move_cursor(Move::Down, buffer.len()),
            Key::ArrowLeft => viewport.move_cursor(Move::Left, buffer.len()),
            Key::ArrowRight => viewport.move_cursor(Move::Right, buffer.len()),
            Key::Home => viewport.home(),
            Key::End => viewport.end(),
            Key::PageUp => viewport.page_move(Move::Up, buffer.len()),
            Key::PageDown => viewport.page_move(Move::Down, buffer.len()),
            // Everything else — printable bytes, control chords, Escape,
            // Delete, unrecognized sequences — is a no-op in a viewer.
            _ => {}
        }
    }

    // Leave a clean screen behind; the guard restores canonical mode when
    // it drops at the end of this scope.
    ansi::clear_screen(&mut out)?;
    ansi::cursor_home(&mut out)?;
    out.flush_stdout()?;

    Ok(())
}
