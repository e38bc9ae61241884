use serde::Serialize;

use crate::ir::Entry;

/// An entry with its slot in the grid. `row` is a row number, not a pixel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedEntry {
    pub entry: Entry,
    pub row: u32,
    pub x: u32,
    pub width: u32,
}

impl PlacedEntry {
    /// First pixel past the right edge of the slot.
    pub fn end(&self) -> u32 {
        self.x + self.width
    }

    /// Pixel baseline of the row. Saturates; `pack` already rejects grids whose
    /// height does not fit in `u32`.
    pub fn baseline_y(&self, row_pixel_height: u32) -> u32 {
        self.row.saturating_mul(row_pixel_height)
    }

    /// Where the label starts once the badge (if any) is drawn in front of it.
    pub fn text_x(&self, badge_width: u32) -> u32 {
        if self.entry.has_decoration() {
            self.x + badge_width
        } else {
            self.x
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PackedLayout {
    /// Placements in the order they were made: row by row, left to right.
    pub entries: Vec<PlacedEntry>,
    pub rows: u32,
    pub height: u32,
    pub canvas_width: u32,
    pub row_pixel_height: u32,
}

impl PackedLayout {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn row(&self, row: u32) -> impl Iterator<Item = &PlacedEntry> {
        self.entries.iter().filter(move |placed| placed.row == row)
    }
}
