use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("entry {text:?} needs {width}px but rows are only {canvas_width}px wide")]
    UnplaceableEntry {
        text: String,
        width: u64,
        canvas_width: u32,
    },

    #[error("{rows} rows of {row_pixel_height}px do not fit in a u32 canvas height")]
    CanvasTooTall { rows: u32, row_pixel_height: u32 },

    #[error("invalid metrics: {field} must be positive (got {value})")]
    InvalidMetrics { field: &'static str, value: f64 },
}
