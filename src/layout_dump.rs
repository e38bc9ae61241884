use crate::ir::Role;
use crate::layout::PackedLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub canvas_width: u32,
    pub row_pixel_height: u32,
    pub rows: u32,
    pub height: u32,
    pub entries: Vec<EntryDump>,
}

#[derive(Debug, Serialize)]
pub struct EntryDump {
    pub text: String,
    pub color: String,
    pub role: Role,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

impl LayoutDump {
    pub fn from_layout(layout: &PackedLayout) -> Self {
        let entries = layout
            .entries
            .iter()
            .map(|placed| EntryDump {
                text: placed.entry.text.clone(),
                color: placed.entry.color.clone(),
                role: placed.entry.role,
                row: placed.row,
                x: placed.x,
                y: placed.baseline_y(layout.row_pixel_height),
                width: placed.width,
            })
            .collect();

        LayoutDump {
            canvas_width: layout.canvas_width,
            row_pixel_height: layout.row_pixel_height,
            rows: layout.rows,
            height: layout.height,
            entries,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &PackedLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Metrics;
    use crate::ir::Entry;
    use crate::layout::pack;

    #[test]
    fn dump_carries_pixel_rows() {
        let metrics = Metrics {
            canvas_width: 50,
            ..Metrics::default()
        };
        let entries = vec![
            Entry::new("abc", "red", Role::Vip),
            Entry::new("de", "blue", Role::None),
        ];
        let layout = pack(&entries, &metrics).unwrap();
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.rows, 2);
        assert_eq!(dump.entries[1].y, 17);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["entries"][0]["role"], "vip");
        assert_eq!(json["entries"][0]["width"], 42);
    }
}
