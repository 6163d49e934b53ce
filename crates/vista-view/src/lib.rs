//! # vista-view — view layer for vista
//!
//! The model side of the viewer, kept free of terminal I/O so every piece
//! is testable against plain byte buffers:
//!
//! - **[`buffer`]** — `Line` and `LineBuffer`: the file as an ordered
//!   sequence of immutable byte lines
//! - **[`viewport`]** — cursor position and scroll offsets, with the
//!   cursor-visibility invariant
//! - **[`render`]** — composes one full frame of ANSI output into
//!   vista-term's `OutputBuffer`

pub mod buffer;
pub mod render;
pub mod viewport;
