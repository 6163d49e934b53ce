//! Viewport — cursor position and scroll offsets over the line buffer.
//!
//! The cursor lives in logical buffer coordinates, not screen coordinates:
//! `cursor_row` ranges over `[0, num_lines]` (one past the last line is a
//! valid resting place) and `cursor_col` is unbounded to the right. The
//! scroll offsets `(row_off, col_off)` name the logical coordinate of the
//! screen's top-left cell.
//!
//! Movement never touches the offsets; [`scroll`](Viewport::scroll) is
//! called once per frame before rendering and re-establishes the one
//! invariant that matters:
//!
//! ```text
//! row_off <= cursor_row < row_off + rows
//! col_off <= cursor_col < col_off + cols
//! ```
//!
//! Two deliberate permissives, kept from the original design: the cursor
//! may move right past the end of a line without bound, and Down may rest
//! one row past the last line. Line-length-aware clamping belongs to an
//! editing feature set this viewer doesn't have.

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A single-step cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Cursor and scroll state for one screen of text.
///
/// Screen dimensions are fixed at construction (captured once at startup;
/// the viewer has no live-resize handling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Cursor row in buffer coordinates, `0..=num_lines`.
    pub cursor_row: usize,
    /// Cursor column in buffer coordinates, unbounded to the right.
    pub cursor_col: usize,
    /// Buffer row shown at the top of the screen.
    pub row_off: usize,
    /// Buffer column shown at the left edge of the screen.
    pub col_off: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// Create a viewport for a `rows` × `cols` screen, cursor at the origin.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            row_off: 0,
            col_off: 0,
            rows,
            cols,
        }
    }

    /// Screen height in rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Screen width in columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    // -- Movement -----------------------------------------------------------

    /// Move the cursor one step.
    ///
    /// Left and Up stop at 0. Right is unbounded. Down stops at
    /// `num_lines` — one row past the last real line.
    pub const fn move_cursor(&mut self, mv: Move, num_lines: usize) {
        match mv {
            Move::Left => self.cursor_col = self.cursor_col.saturating_sub(1),
            Move::Right => self.cursor_col += 1,
            Move::Up => self.cursor_row = self.cursor_row.saturating_sub(1),
            Move::Down => {
                if self.cursor_row < num_lines {
                    self.cursor_row += 1;
                }
            }
        }
    }

    /// Move the cursor a full page: one single-step move per screen row,
    /// with the same clamping as [`move_cursor`](Self::move_cursor).
    pub const fn page_move(&mut self, mv: Move, num_lines: usize) {
        let mut step = 0;
        while step < self.rows {
            self.move_cursor(mv, num_lines);
            step += 1;
        }
    }

    /// Jump the cursor to column 0.
    pub const fn home(&mut self) {
        self.cursor_col = 0;
    }

    /// Jump the cursor to the rightmost screen column.
    pub const fn end(&mut self) {
        self.cursor_col = self.cols.saturating_sub(1);
    }

    // -- Scrolling ----------------------------------------------------------

    /// Recompute the scroll offsets so the cursor is visible.
    ///
    /// Pure function of the current cursor and offset state, called once
    /// per frame before rendering. Each offset moves the minimal amount:
    /// when the cursor left the window on the leading edge the offset
    /// snaps to the cursor, when it left on the trailing edge the cursor
    /// lands exactly on the last visible row/column.
    pub const fn scroll(&mut self) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }

        if self.cursor_row < self.row_off {
            self.row_off = self.cursor_row;
        }
        if self.cursor_row >= self.row_off + self.rows {
            self.row_off = self.cursor_row - self.rows + 1;
        }

        if self.cursor_col < self.col_off {
            self.col_off = self.cursor_col;
        }
        if self.cursor_col >= self.col_off + self.cols {
            self.col_off = self.cursor_col - self.cols + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// The visibility invariant scroll() must establish.
    fn assert_cursor_visible(vp: &Viewport) {
        assert!(
            vp.row_off <= vp.cursor_row && vp.cursor_row < vp.row_off + vp.rows(),
            "row {} outside [{}, {})",
            vp.cursor_row,
            vp.row_off,
            vp.row_off + vp.rows()
        );
        assert!(
            vp.col_off <= vp.cursor_col && vp.cursor_col < vp.col_off + vp.cols(),
            "col {} outside [{}, {})",
            vp.cursor_col,
            vp.col_off,
            vp.col_off + vp.cols()
        );
    }

    // -- movement clamping --------------------------------------------------

    #[test]
    fn left_stops_at_zero() {
        let mut vp = Viewport::new(24, 80);
        vp.move_cursor(Move::Left, 10);
        assert_eq!(vp.cursor_col, 0);
    }

    #[test]
    fn up_stops_at_zero() {
        let mut vp = Viewport::new(24, 80);
        vp.move_cursor(Move::Up, 10);
        assert_eq!(vp.cursor_row, 0);
    }

    #[test]
    fn right_is_unbounded() {
        let mut vp = Viewport::new(24, 80);
        for _ in 0..500 {
            vp.move_cursor(Move::Right, 10);
        }
        assert_eq!(vp.cursor_col, 500);
    }

    #[test]
    fn down_rests_one_past_last_line() {
        let mut vp = Viewport::new(24, 80);
        for _ in 0..100 {
            vp.move_cursor(Move::Down, 10);
        }
        assert_eq!(vp.cursor_row, 10);
    }

    #[test]
    fn down_in_empty_buffer_stays_at_zero() {
        let mut vp = Viewport::new(24, 80);
        vp.move_cursor(Move::Down, 0);
        assert_eq!(vp.cursor_row, 0);
    }

    #[test]
    fn row_clamps_hold_under_arbitrary_move_orders() {
        // Interleave Up/Down in several patterns; the row must stay
        // within [0, num_lines] throughout.
        let num_lines = 7;
        let patterns: &[&[Move]] = &[
            &[Move::Down; 20],
            &[Move::Up; 20],
            &[Move::Down, Move::Down, Move::Up],
            &[Move::Up, Move::Down, Move::Down, Move::Up, Move::Down],
        ];

        for pattern in patterns {
            let mut vp = Viewport::new(4, 10);
            for _ in 0..25 {
                for &mv in *pattern {
                    vp.move_cursor(mv, num_lines);
                    assert!(vp.cursor_row <= num_lines);
                }
            }
        }
    }

    // -- home / end ---------------------------------------------------------

    #[test]
    fn home_returns_to_column_zero() {
        let mut vp = Viewport::new(24, 80);
        for _ in 0..30 {
            vp.move_cursor(Move::Right, 5);
        }
        vp.home();
        assert_eq!(vp.cursor_col, 0);
    }

    #[test]
    fn end_jumps_to_rightmost_screen_column() {
        let mut vp = Viewport::new(24, 80);
        vp.end();
        assert_eq!(vp.cursor_col, 79);
    }

    // -- page moves ---------------------------------------------------------

    #[test]
    fn page_down_equals_repeated_down() {
        let num_lines = 100;
        let mut paged = Viewport::new(24, 80);
        let mut stepped = Viewport::new(24, 80);

        paged.page_move(Move::Down, num_lines);
        for _ in 0..24 {
            stepped.move_cursor(Move::Down, num_lines);
        }

        assert_eq!(paged.cursor_row, stepped.cursor_row);
        assert_eq!(paged.cursor_row, 24);
    }

    #[test]
    fn page_down_clamps_like_repeated_down() {
        // Page size larger than the file: both paths clamp identically.
        let mut paged = Viewport::new(24, 80);
        let mut stepped = Viewport::new(24, 80);

        paged.page_move(Move::Down, 5);
        for _ in 0..24 {
            stepped.move_cursor(Move::Down, 5);
        }

        assert_eq!(paged.cursor_row, stepped.cursor_row);
        assert_eq!(paged.cursor_row, 5);
    }

    #[test]
    fn page_up_from_origin_stays_put() {
        let mut vp = Viewport::new(24, 80);
        vp.page_move(Move::Up, 100);
        assert_eq!(vp.cursor_row, 0);
    }

    // -- scrolling ----------------------------------------------------------

    #[test]
    fn scroll_noop_when_cursor_visible() {
        let mut vp = Viewport::new(10, 40);
        vp.cursor_row = 5;
        vp.cursor_col = 20;
        vp.scroll();
        assert_eq!(vp.row_off, 0);
        assert_eq!(vp.col_off, 0);
    }

    #[test]
    fn scroll_down_places_cursor_on_last_row() {
        let mut vp = Viewport::new(10, 40);
        vp.cursor_row = 14;
        vp.scroll();
        assert_eq!(vp.row_off, 5); // 14 - 10 + 1
        assert_cursor_visible(&vp);
    }

    #[test]
    fn scroll_up_snaps_offset_to_cursor() {
        let mut vp = Viewport::new(10, 40);
        vp.row_off = 20;
        vp.cursor_row = 3;
        vp.scroll();
        assert_eq!(vp.row_off, 3);
        assert_cursor_visible(&vp);
    }

    #[test]
    fn scroll_right_places_cursor_on_last_column() {
        let mut vp = Viewport::new(10, 40);
        vp.cursor_col = 100;
        vp.scroll();
        assert_eq!(vp.col_off, 61); // 100 - 40 + 1
        assert_cursor_visible(&vp);
    }

    #[test]
    fn scroll_left_snaps_offset_to_cursor() {
        let mut vp = Viewport::new(10, 40);
        vp.col_off = 50;
        vp.cursor_col = 7;
        vp.scroll();
        assert_eq!(vp.col_off, 7);
        assert_cursor_visible(&vp);
    }

    #[test]
    fn scroll_is_idempotent() {
        let mut vp = Viewport::new(10, 40);
        vp.cursor_row = 33;
        vp.cursor_col = 90;
        vp.scroll();
        let after_first = vp.clone();
        vp.scroll();
        assert_eq!(vp, after_first);
    }

    #[test]
    fn scroll_zero_size_is_noop() {
        let mut vp = Viewport::new(0, 0);
        vp.cursor_row = 5;
        vp.cursor_col = 5;
        vp.scroll(); // must not underflow or panic
        assert_eq!(vp.row_off, 0);
        assert_eq!(vp.col_off, 0);
    }

    #[test]
    fn invariant_holds_across_walks() {
        // Drive the cursor through a long deterministic walk over a tall
        // file, scrolling each step as the frame loop would; the viewport
        // invariant must hold at every reachable state.
        let num_lines = 60;
        let mut vp = Viewport::new(8, 20);
        let walk = [
            Move::Down,
            Move::Down,
            Move::Right,
            Move::Down,
            Move::Right,
            Move::Right,
            Move::Up,
            Move::Left,
            Move::Down,
            Move::Right,
        ];

        for _ in 0..40 {
            for &mv in &walk {
                vp.move_cursor(mv, num_lines);
                vp.scroll();
                assert_cursor_visible(&vp);
            }
        }

        // And back to the origin.
        for _ in 0..400 {
            vp.move_cursor(Move::Up, num_lines);
            vp.move_cursor(Move::Left, num_lines);
            vp.scroll();
            assert_cursor_visible(&vp);
        }
        assert_eq!((vp.cursor_row, vp.cursor_col), (0, 0));
        assert_eq!((vp.row_off, vp.col_off), (0, 0));
    }

    #[test]
    fn page_moves_keep_invariant() {
        let num_lines = 200;
        let mut vp = Viewport::new(24, 80);
        for _ in 0..12 {
            vp.page_move(Move::Down, num_lines);
            vp.scroll();
            assert_cursor_visible(&vp);
        }
        for _ in 0..12 {
            vp.page_move(Move::Up, num_lines);
            vp.scroll();
            assert_cursor_visible(&vp);
        }
    }
}
