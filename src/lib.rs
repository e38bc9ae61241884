#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, Metrics, RenderConfig, load_config};
pub use ir::{Entry, Role};
pub use layout::{LayoutError, PackedLayout, PlacedEntry, computed_width, pack};
pub use parser::parse_viewers;
pub use render::render_svg;
pub use theme::Theme;

/// Parses a viewer CSV and renders it with the given (unscaled) config.
pub fn render_viewers(source: &str, config: &Config) -> anyhow::Result<String> {
    let config = config.resolved()?;
    let entries = parse_viewers(source)?;
    let layout = pack(&entries, &config.metrics)?;
    Ok(render_svg(&layout, &config))
}
