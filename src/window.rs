//! Viewport windowing: which slice of the card list must be materialized for
//! the current scroll position.
//!
//! Pure functions of their inputs, so windowing is testable without a real
//! scrollable surface. The math is unit-agnostic; the host contract speaks
//! pixels, the terminal renderer passes cells.

/// Grid layout parameters. `columns` is clamped to at least 1 everywhere it
/// is used; `buffer_rows` is extra rows materialized above and below the
/// viewport to mask scroll latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub card_height: usize,
    pub gap: usize,
    pub buffer_rows: usize,
}

impl GridLayout {
    pub fn columns(&self) -> usize {
        self.columns.max(1)
    }

    /// Height of one grid row including the trailing gap. Never zero.
    pub fn row_height(&self) -> usize {
        (self.card_height + self.gap).max(1)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            card_height: 8,
            gap: 1,
            buffer_rows: 1,
        }
    }
}

/// The materialized slice for one scroll position. Card indices are
/// positions in the full card list, so rendered elements keep their
/// authoritative index as the window slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub start_row: usize,
    pub end_row: usize,
    /// First card index to materialize (inclusive).
    pub first_card: usize,
    /// End of the card index range (exclusive).
    pub end_card: usize,
    pub total_rows: usize,
    /// Full content height, used to size the scroll extent.
    pub content_height: usize,
}

/// Compute the visible window for `total_cards` at the given scroll offset.
pub fn visible_window(
    total_cards: usize,
    layout: GridLayout,
    scroll_top: usize,
    viewport_height: usize,
) -> Window {
    let columns = layout.columns();
    let row_height = layout.row_height();
    let total_rows = total_cards.div_ceil(columns);
    let content_height = total_rows * row_height;

    let start_row = (scroll_top / row_height)
        .saturating_sub(layout.buffer_rows)
        .min(total_rows);
    let end_row = (scroll_top + viewport_height)
        .div_ceil(row_height)
        .saturating_add(layout.buffer_rows)
        .min(total_rows);

    Window {
        start_row,
        end_row,
        first_card: (start_row * columns).min(total_cards),
        end_card: (end_row * columns).min(total_cards),
        total_rows,
        content_height,
    }
}

/// Adjust `scroll_top` so the given grid row is fully visible, scrolling the
/// minimum distance. Returns the incoming offset when the row already fits.
pub fn scroll_to_row(
    row: usize,
    row_height: usize,
    scroll_top: usize,
    viewport_height: usize,
) -> usize {
    let row_height = row_height.max(1);
    let row_top = row * row_height;
    let row_bottom = row_top + row_height;
    if row_top < scroll_top {
        row_top
    } else if row_bottom > scroll_top + viewport_height {
        row_bottom.saturating_sub(viewport_height)
    } else {
        scroll_top
    }
}
