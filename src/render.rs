use crate::config::{Config, RenderConfig};
use crate::ir::Role;
use crate::layout::PackedLayout;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Renders a packed grid. `config` must be the resolved (scaled) config the
/// layout was packed with.
pub fn render_svg(layout: &PackedLayout, config: &Config) -> String {
    let theme = &config.theme;
    let metrics = &config.metrics;
    let width = layout.canvas_width;
    let height = layout.height.saturating_add(config.render.height_buffer);
    let font_size = theme.font_size;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 -{font_size} {width} {height}\">",
    ));

    if let Some(background) = &theme.background {
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"-{font_size}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }

    svg.push_str("<defs>");
    svg.push_str(&badge_pattern(
        Role::Vip,
        &vip_badge_points(metrics.badge_width as f32, metrics.badge_height as f32),
        theme,
    ));
    svg.push_str(&badge_pattern(
        Role::Moderator,
        &mod_badge_points(metrics.badge_width as f32, metrics.badge_height as f32),
        theme,
    ));
    svg.push_str("</defs>");

    let offset_y = i64::from(config.decoration_offset_y());
    let style = format!(
        "font-family:{}; font-size:{}px",
        escape_xml(&theme.font_family),
        font_size
    );

    for placed in &layout.entries {
        let baseline = placed.baseline_y(layout.row_pixel_height);
        if let Some(pattern) = placed.entry.role.badge_pattern_id() {
            svg.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"url(#{pattern})\"/>",
                placed.x,
                i64::from(baseline) - offset_y,
                metrics.badge_width,
                metrics.badge_height,
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{baseline}\" fill=\"{}\" style=\"{style}\">{}</text>",
            placed.text_x(metrics.badge_width),
            escape_xml(&placed.entry.color),
            escape_xml(&placed.entry.text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn badge_pattern(role: Role, points: &str, theme: &Theme) -> String {
    let (Some(id), Some(fill)) = (role.badge_pattern_id(), theme.badge_color(role)) else {
        return String::new();
    };
    format!(
        "<pattern id=\"{id}\" x=\"0\" y=\"0\" width=\"1\" height=\"1\" patternUnits=\"objectBoundingBox\"><polygon fill=\"{}\" points=\"{points}\"/></pattern>",
        escape_xml(fill)
    )
}

fn points_to_string(points: &[(f32, f32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2} {y:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Diamond.
fn vip_badge_points(w: f32, h: f32) -> String {
    points_to_string(&[
        (0.0, h * 0.26),
        (w * 0.1875, 0.0),
        (w * 0.8125, 0.0),
        (w, h * 0.26),
        (w / 2.0, h),
    ])
}

/// Sword, blade pointing up and to the right.
fn mod_badge_points(w: f32, h: f32) -> String {
    points_to_string(&[
        (0.0, h * 0.875),
        (w * 0.125, h * 0.6875),
        (0.0, h * 0.5625),
        (w * 0.125, h * 0.4375),
        (w * 0.275, h * 0.55),
        (w * 0.75, 0.0),
        (w, 0.0),
        (w, h * 0.25),
        (w * 0.4375, h * 0.6875),
        (w * 0.625, h * 0.875),
        (w * 0.5, h),
        (w * 0.275, h * 0.875),
        (w * 0.125, h),
    ])
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = if render_cfg.png_scale > 0.0 { render_cfg.png_scale } else { 1.0 };
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow::anyhow!("Invalid PNG scale {scale}"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::from_scale(scale, scale), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
