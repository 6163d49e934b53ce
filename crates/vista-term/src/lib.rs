// SPDX-License-Identifier: MIT
//
// vista-term — terminal layer for vista.
//
// Direct terminal control for the viewer: raw-mode termios with
// guaranteed restore, byte-level key decoding with escape-sequence
// timeout handling, ANSI escape generation, and an output buffer that
// delivers each frame to the terminal in a single write.
//
// This crate intentionally avoids TUI frameworks (ratatui, crossterm)
// in favor of direct ANSI sequences and raw termios. The viewer's whole
// point is that thin layer; every byte sent to the terminal is visible
// in this crate.

pub mod ansi;
pub mod input;
pub mod output;
pub mod terminal;
