//! Grid layout for poem cards
//!
//! Provides:
//! - Row-major grid whose column count follows the terminal width
//! - Navigation helpers (up/down/left/right, tab)
//! - Pagination of variable-height card rows

use std::ops::Range;

/// Gap between card columns and rows
pub const CARD_GAP: u16 = 1;

/// Grid layout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of columns
    pub columns: u16,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { columns: 1 }
    }
}

impl GridLayout {
    /// Create a new grid layout
    pub fn new(columns: u16) -> Self {
        Self {
            columns: columns.clamp(1, 10),
        }
    }

    /// As many columns as fit in `width` without going below `min_card_width`
    pub fn fit(width: u16, min_card_width: u16, max_columns: u16) -> Self {
        let slot = min_card_width.max(1) + CARD_GAP;
        let columns = width.saturating_add(CARD_GAP) / slot;
        Self::new(columns.min(max_columns.max(1)))
    }

    /// Width of one column inside `inner_width`
    pub fn column_width(&self, inner_width: u16) -> u16 {
        let gaps = CARD_GAP * (self.columns - 1);
        inner_width.saturating_sub(gaps) / self.columns
    }

    /// Convert flat index to (row, col) position
    /// Uses row-major ordering (reading order):
    /// ```text
    /// Index:  0 1 2
    ///         3 4 5
    /// ```
    pub fn index_to_position(&self, index: usize) -> (usize, u16) {
        let columns = self.columns as usize;
        (index / columns, (index % columns) as u16)
    }

    /// Calculate new selection after moving up (previous row)
    pub fn move_up(&self, current: usize) -> usize {
        let columns = self.columns as usize;
        if current >= columns {
            current - columns
        } else {
            current
        }
    }

    /// Calculate new selection after moving down (next row)
    pub fn move_down(&self, current: usize, total: usize) -> usize {
        let next = current + self.columns as usize;
        if next < total {
            next
        } else {
            current
        }
    }

    /// Calculate new selection after moving left within the row
    pub fn move_left(&self, current: usize) -> usize {
        let (_, col) = self.index_to_position(current);
        if col > 0 {
            current - 1
        } else {
            current
        }
    }

    /// Calculate new selection after moving right within the row
    pub fn move_right(&self, current: usize, total: usize) -> usize {
        let (_, col) = self.index_to_position(current);
        if col + 1 < self.columns && current + 1 < total {
            current + 1
        } else {
            current
        }
    }

    /// Move to last entry
    pub fn move_end(&self, total: usize) -> usize {
        total.saturating_sub(1)
    }

    /// Tab navigation (next with wrap)
    pub fn tab_next(&self, current: usize, total: usize) -> usize {
        if total == 0 {
            0
        } else {
            (current + 1) % total
        }
    }

    /// Shift+Tab navigation (previous with wrap)
    pub fn tab_prev(&self, current: usize, total: usize) -> usize {
        if total == 0 {
            0
        } else if current == 0 {
            total - 1
        } else {
            current - 1
        }
    }
}

/// Split card rows into pages that fit in `available` lines and return the
/// page holding `selected_row`.
///
/// Rows are separated by [`CARD_GAP`]. A row taller than the viewport gets a
/// page of its own and is clipped when drawn.
pub fn page_of_rows(row_heights: &[u16], selected_row: usize, available: u16) -> Range<usize> {
    if row_heights.is_empty() {
        return 0..0;
    }
    let selected_row = selected_row.min(row_heights.len() - 1);

    let mut start = 0;
    let mut used: u16 = 0;
    for (i, &height) in row_heights.iter().enumerate() {
        let needed = if i == start { height } else { height.saturating_add(CARD_GAP) };
        if i > start && used.saturating_add(needed) > available {
            if selected_row < i {
                return start..i;
            }
            start = i;
            used = height;
        } else {
            used = used.saturating_add(needed);
        }
    }
    start..row_heights.len()
}
