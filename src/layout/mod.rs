//! Greedy row packing for the name grid.
//!
//! Rows are filled left to right. Every row scans the whole pending queue in
//! order, so a name too wide for the space left in a row is skipped and a
//! later, shorter name can take that space instead. Skipped names keep their
//! relative order and are retried on the next row.

mod error;
mod types;

pub use error::LayoutError;
pub use types::{PackedLayout, PlacedEntry};

use tracing::{debug, info};

use crate::config::Metrics;
use crate::ir::Entry;

/// Horizontal footprint of an entry: text, fixed padding and badge.
///
/// Returned as `u64` so huge paddings or character widths come out as an
/// oversized width instead of wrapping.
pub fn computed_width(entry: &Entry, metrics: &Metrics) -> u64 {
    let text = (entry.char_count() as f64 * f64::from(metrics.char_pixel_width)).ceil() as u64;
    let badge = if entry.has_decoration() {
        metrics.badge_width
    } else {
        0
    };
    text.saturating_add(u64::from(metrics.label_pixel_padding))
        .saturating_add(u64::from(badge))
}

struct Pending<'a> {
    entry: &'a Entry,
    width: u64,
}

/// Assigns a row and x offset to every entry.
///
/// Fails with [`LayoutError::UnplaceableEntry`] when an entry is wider than the
/// canvas; no partial layout is returned in that case.
pub fn pack(entries: &[Entry], metrics: &Metrics) -> Result<PackedLayout, LayoutError> {
    metrics.validate()?;

    let canvas_width = metrics.canvas_width;
    let mut pending: Vec<Pending<'_>> = entries
        .iter()
        .map(|entry| Pending {
            entry,
            width: computed_width(entry, metrics),
        })
        .collect();
    let mut placed = Vec::with_capacity(entries.len());
    let mut row = 0u32;

    while !pending.is_empty() {
        let mut remaining = canvas_width;
        let mut cursor_x = 0u32;
        let mut taken = vec![false; pending.len()];
        let mut placed_in_row = 0usize;

        for (idx, candidate) in pending.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let Some(width) = u32::try_from(candidate.width)
                .ok()
                .filter(|&width| width <= remaining)
            else {
                continue;
            };
            debug!(text = %candidate.entry.text, row, x = cursor_x, width, "placed entry");
            placed.push(PlacedEntry {
                entry: candidate.entry.clone(),
                row,
                x: cursor_x,
                width,
            });
            cursor_x += width;
            remaining -= width;
            taken[idx] = true;
            placed_in_row += 1;
        }

        // A fresh row fits anything no wider than the canvas, so an empty
        // row means only oversized entries are left.
        if placed_in_row == 0 {
            let offender = &pending[0];
            return Err(LayoutError::UnplaceableEntry {
                text: offender.entry.text.clone(),
                width: offender.width,
                canvas_width,
            });
        }

        pending = pending
            .into_iter()
            .zip(taken)
            .filter_map(|(candidate, taken)| (!taken).then_some(candidate))
            .collect();
        row += 1;
    }

    let height = row
        .checked_mul(metrics.row_pixel_height)
        .ok_or(LayoutError::CanvasTooTall {
            rows: row,
            row_pixel_height: metrics.row_pixel_height,
        })?;
    info!(
        entries = placed.len(),
        rows = row,
        height,
        canvas_width,
        "packed name grid"
    );

    Ok(PackedLayout {
        entries: placed,
        rows: row,
        height,
        canvas_width,
        row_pixel_height: metrics.row_pixel_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Role;

    fn unit_metrics(canvas_width: u32) -> Metrics {
        Metrics {
            canvas_width,
            char_pixel_width: 1.0,
            row_pixel_height: 10,
            badge_width: 12,
            badge_height: 10,
            label_pixel_padding: 0,
        }
    }

    fn entry_of_width(width: usize) -> Entry {
        Entry::new(&"x".repeat(width), "black", Role::None)
    }

    #[test]
    fn empty_input_has_zero_height() {
        let layout = pack(&[], &Metrics::default()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.height, 0);
    }

    #[test]
    fn badge_adds_to_width() {
        let metrics = Metrics {
            char_pixel_width: 2.0,
            ..unit_metrics(100)
        };
        let entry = Entry::new("abcd", "red", Role::Vip);
        assert_eq!(computed_width(&entry, &metrics), 20);
        let plain = Entry::new("abcd", "red", Role::None);
        assert_eq!(computed_width(&plain, &metrics), 8);
    }

    #[test]
    fn text_width_rounds_up() {
        let metrics = Metrics {
            char_pixel_width: 2.75,
            label_pixel_padding: 28,
            ..unit_metrics(100)
        };
        let entry = Entry::new("abc", "red", Role::None);
        assert_eq!(computed_width(&entry, &metrics), 9 + 28);
    }

    #[test]
    fn full_row_stops_scan_early() {
        let entries = vec![entry_of_width(300), entry_of_width(50), entry_of_width(50)];
        let layout = pack(&entries, &unit_metrics(350)).unwrap();
        let slots: Vec<(u32, u32)> = layout.entries.iter().map(|p| (p.row, p.x)).collect();
        assert_eq!(slots, vec![(0, 0), (0, 300), (1, 0)]);
        assert_eq!(layout.height, 20);
    }

    #[test]
    fn short_entries_backfill_row() {
        let entries = vec![
            Entry::new("aaaaaa", "black", Role::None),
            Entry::new("bbbbbbb", "black", Role::None),
            Entry::new("cc", "black", Role::None),
            Entry::new("ddd", "black", Role::None),
        ];
        let layout = pack(&entries, &unit_metrics(10)).unwrap();
        let order: Vec<(&str, u32, u32)> = layout
            .entries
            .iter()
            .map(|p| (p.entry.text.as_str(), p.row, p.x))
            .collect();
        assert_eq!(
            order,
            vec![("AAAAAA", 0, 0), ("CC", 0, 6), ("BBBBBBB", 1, 0), ("DDD", 1, 7)]
        );
    }

    #[test]
    fn decorated_entry_reserves_badge() {
        let metrics = Metrics {
            char_pixel_width: 2.0,
            ..unit_metrics(20)
        };
        let entries = vec![
            Entry::new("abcd", "black", Role::Moderator),
            Entry::new("a", "black", Role::None),
        ];
        let layout = pack(&entries, &metrics).unwrap();
        assert_eq!(layout.entries[0].width, 20);
        assert_eq!(layout.entries[0].text_x(metrics.badge_width), 12);
        assert_eq!((layout.entries[1].row, layout.entries[1].x), (1, 0));
    }

    #[test]
    fn oversized_entry_fails() {
        let entries = vec![entry_of_width(351)];
        let err = pack(&entries, &unit_metrics(350)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnplaceableEntry {
                text: "X".repeat(351),
                width: 351,
                canvas_width: 350,
            }
        );
    }

    #[test]
    fn huge_padding_is_unplaceable() {
        let metrics = Metrics {
            label_pixel_padding: u32::MAX,
            ..unit_metrics(u32::MAX)
        };
        let entry = Entry::new("ab", "black", Role::Vip);
        assert_eq!(computed_width(&entry, &metrics), u64::from(u32::MAX) + 2 + 12);
        let err = pack(&[entry], &metrics).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::UnplaceableEntry { width, canvas_width: u32::MAX, .. }
                if width > u64::from(u32::MAX)
        ));
    }

    #[test]
    fn huge_char_width_is_unplaceable() {
        let metrics = Metrics {
            char_pixel_width: f32::MAX,
            ..unit_metrics(1000)
        };
        let entry = Entry::new("abc", "black", Role::None);
        assert!(computed_width(&entry, &metrics) > 1000);
        assert!(matches!(
            pack(&[entry], &metrics),
            Err(LayoutError::UnplaceableEntry { canvas_width: 1000, .. })
        ));
    }

    #[test]
    fn grid_taller_than_u32_fails() {
        let metrics = Metrics {
            row_pixel_height: u32::MAX / 2 + 1,
            ..unit_metrics(10)
        };
        let entries = vec![entry_of_width(8), entry_of_width(8)];
        let err = pack(&entries, &metrics).unwrap_err();
        assert_eq!(
            err,
            LayoutError::CanvasTooTall {
                rows: 2,
                row_pixel_height: u32::MAX / 2 + 1,
            }
        );
        let one_row = pack(&entries[..1], &metrics).unwrap();
        assert_eq!(one_row.height, u32::MAX / 2 + 1);
    }

    #[test]
    fn oversized_entry_among_others_fails() {
        let entries = vec![entry_of_width(10), entry_of_width(500), entry_of_width(20)];
        let err = pack(&entries, &unit_metrics(100)).unwrap_err();
        assert!(matches!(err, LayoutError::UnplaceableEntry { width: 500, .. }));
    }

    #[test]
    fn invalid_metrics_fail_before_packing() {
        let metrics = Metrics {
            row_pixel_height: 0,
            ..unit_metrics(100)
        };
        let err = pack(&[entry_of_width(5)], &metrics).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidMetrics {
                field: "row_pixel_height",
                ..
            }
        ));
    }

    #[test]
    fn repacking_is_deterministic() {
        let entries: Vec<Entry> = (1..30).map(|n| entry_of_width((n * 7) % 40 + 1)).collect();
        let metrics = unit_metrics(64);
        assert_eq!(pack(&entries, &metrics), pack(&entries, &metrics));
    }
}
