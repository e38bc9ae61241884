use crate::config::load_config;
use crate::layout::pack;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_viewers;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "spacey",
    version,
    about = "Creates an SVG name grid from a CSV list of Twitch usernames"
)]
pub struct Args {
    /// CSV file (name,color,nickname,role) or '-' for stdin
    pub input: PathBuf,

    /// Output file, or '-' for stdout (SVG only). Defaults to
    /// spacey-<timestamp>.<ext> in the current directory.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (metrics, theme, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Multiplier applied to every size
    #[arg(short = 's', long = "scale", value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,

    /// Canvas width before scaling
    #[arg(short = 'w', long = "width", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Write the computed placements as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    let mut base_config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        base_config.scale = scale;
    }
    if let Some(width) = args.width {
        base_config.metrics.canvas_width = width;
    }
    let config = base_config.resolved()?;
    let output = resolve_output(args.output.as_deref(), args.output_format, Local::now())?;

    info!("processing {}", args.input.display());
    let input = read_input(&args.input)?;
    let entries = parse_viewers(&input)?;
    info!(count = entries.len(), "read viewers");

    let layout = pack(&entries, &config.metrics)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
        info!("wrote layout dump to {}", path.display());
    }

    let svg = render_svg(&layout, &config);
    match (args.output_format, output.as_deref()) {
        (OutputFormat::Svg, path) => write_output_svg(&svg, path)?,
        (OutputFormat::Png, Some(path)) => {
            write_output_png(&svg, path, &config.render, &config.theme)?
        }
        (OutputFormat::Png, None) => bail!("PNG output cannot be written to stdout"),
    }
    match output {
        Some(path) => info!("wrote {}", path.display()),
        None => info!("wrote svg to stdout"),
    }
    Ok(())
}

/// `None` means stdout.
fn resolve_output(
    output: Option<&Path>,
    format: OutputFormat,
    now: DateTime<Local>,
) -> Result<Option<PathBuf>> {
    match output {
        Some(path) if path == Path::new("-") => {
            if format == OutputFormat::Png {
                bail!("PNG output cannot be written to stdout");
            }
            Ok(None)
        }
        Some(path) => Ok(Some(path.to_path_buf())),
        None => Ok(Some(timestamped_output(now, format))),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    validate_input_path(path)?;
    Ok(std::fs::read_to_string(path)?)
}

fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }
    if !path.is_file() {
        bail!("{} is not a file", path.display());
    }
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        bail!("{} is not a CSV file", path.display());
    }
    Ok(())
}

fn timestamped_output(now: DateTime<Local>, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!(
        "spacey{}.{}",
        now.format("-%Y%m%d-%H%M%S"),
        format.extension()
    ))
}
