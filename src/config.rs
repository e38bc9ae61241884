use crate::layout::LayoutError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SCALE: u32 = 2;

/// Pixel metrics for one packing run. Widths assume a monospaced font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Width of every row; no slot may end past it.
    pub canvas_width: u32,
    /// Horizontal advance of one character. Fractional values are summed
    /// before rounding up.
    pub char_pixel_width: f32,
    /// Vertical distance between consecutive row baselines.
    pub row_pixel_height: u32,
    /// Width reserved in front of the label when the entry has a badge.
    pub badge_width: u32,
    /// Height of the badge rect; also the default lift above the baseline.
    pub badge_height: u32,
    /// Fixed padding added to every entry's width.
    pub label_pixel_padding: u32,
}

impl Default for Metrics {
    fn default() -> Self {
        let font_size = 16;
        Self {
            canvas_width: 800,
            char_pixel_width: 10.0,
            row_pixel_height: font_size + font_size / 10,
            badge_width: 12,
            badge_height: 10,
            label_pixel_padding: 0,
        }
    }
}

impl Metrics {
    /// Multiplies every pixel dimension, keeping proportions intact.
    /// Returns `None` if any integer dimension overflows `u32`.
    pub fn scaled(&self, factor: u32) -> Option<Self> {
        Some(Self {
            canvas_width: self.canvas_width.checked_mul(factor)?,
            char_pixel_width: self.char_pixel_width * factor as f32,
            row_pixel_height: self.row_pixel_height.checked_mul(factor)?,
            badge_width: self.badge_width.checked_mul(factor)?,
            badge_height: self.badge_height.checked_mul(factor)?,
            label_pixel_padding: self.label_pixel_padding.checked_mul(factor)?,
        })
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.canvas_width == 0 {
            return Err(LayoutError::InvalidMetrics {
                field: "canvas_width",
                value: 0.0,
            });
        }
        if !self.char_pixel_width.is_finite() || self.char_pixel_width <= 0.0 {
            return Err(LayoutError::InvalidMetrics {
                field: "char_pixel_width",
                value: f64::from(self.char_pixel_width),
            });
        }
        if self.row_pixel_height == 0 {
            return Err(LayoutError::InvalidMetrics {
                field: "row_pixel_height",
                value: 0.0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Extra pixels below the last row so descenders are not clipped.
    pub height_buffer: u32,
    /// Distance the badge is lifted above the text baseline. Defaults to the badge height.
    pub decoration_offset_y: Option<u32>,
    /// Pixel density multiplier for PNG output.
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_buffer: 10,
            decoration_offset_y: None,
            png_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub metrics: Metrics,
    pub theme: Theme,
    pub render: RenderConfig,
    pub scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics: Metrics::default(),
            theme: Theme::consolas(),
            render: RenderConfig::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl Config {
    /// Applies the scale factor to metrics and font size. The result has a scale of 1.
    pub fn resolved(&self) -> anyhow::Result<Self> {
        let factor = self.scale.max(1);
        let metrics = self
            .metrics
            .scaled(factor)
            .ok_or_else(|| anyhow::anyhow!("scale {factor} overflows the configured metrics"))?;
        let mut theme = self.theme.clone();
        theme.font_size *= factor as f32;
        Ok(Self {
            metrics,
            theme,
            render: self.render.clone(),
            scale: 1,
        })
    }

    pub fn decoration_offset_y(&self) -> u32 {
        self.render
            .decoration_offset_y
            .unwrap_or(self.metrics.badge_height)
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MetricsFile {
    canvas_width: Option<u32>,
    char_pixel_width: Option<f32>,
    row_pixel_height: Option<u32>,
    badge_width: Option<u32>,
    badge_height: Option<u32>,
    label_pixel_padding: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    vip_badge_color: Option<String>,
    mod_badge_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    height_buffer: Option<u32>,
    decoration_offset_y: Option<u32>,
    png_scale: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    scale: Option<u32>,
    metrics: Option<MetricsFile>,
    theme: Option<ThemeFile>,
    render: Option<RenderFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.scale {
        config.scale = v;
    }

    if let Some(metrics) = parsed.metrics {
        if let Some(v) = metrics.canvas_width {
            config.metrics.canvas_width = v;
        }
        if let Some(v) = metrics.char_pixel_width {
            config.metrics.char_pixel_width = v;
        }
        if let Some(v) = metrics.row_pixel_height {
            config.metrics.row_pixel_height = v;
        }
        if let Some(v) = metrics.badge_width {
            config.metrics.badge_width = v;
        }
        if let Some(v) = metrics.badge_height {
            config.metrics.badge_height = v;
        }
        if let Some(v) = metrics.label_pixel_padding {
            config.metrics.label_pixel_padding = v;
        }
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = theme.vip_badge_color {
            config.theme.vip_badge_color = v;
        }
        if let Some(v) = theme.mod_badge_color {
            config.theme.mod_badge_color = v;
        }
        if theme.background.is_some() {
            config.theme.background = theme.background;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.height_buffer {
            config.render.height_buffer = v;
        }
        if render.decoration_offset_y.is_some() {
            config.render.decoration_offset_y = render.decoration_offset_y;
        }
        if let Some(v) = render.png_scale {
            config.render.png_scale = v;
        }
    }

    Ok(config)
}
