//! `otsu-seg` command-line tool.
//!
//! Reads an image, segments it into background (0) and foreground (255) and
//! writes the result as PNG. Settings come from a JSON config, command-line
//! flags, or both; flags win.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::LevelFilter;
use image::DynamicImage;
use otsu_seg::images::{plot_to_rgb, segment_dynamic_image, to_dynamic_image};
use otsu_seg::{SegmentConfig, SegmentError, SegmentIoError, SegmentReport};

#[derive(Parser, Debug)]
#[command(name = "otsu-seg", version, about = "Adaptive single/dual Otsu segmentation")]
struct Cli {
    /// JSON config (`image_path`, `output_path`, `report_path`, `plot_path`, `params`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input image; overrides `image_path` from the config.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Segmented PNG output [default: segmented.png].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of the run.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the histogram plot as PNG. Implies `--debug`.
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Collect debug artifacts (histogram, peaks, dual cuts).
    #[arg(long)]
    debug: bool,

    #[arg(long)]
    border_width: Option<usize>,

    #[arg(long)]
    dark_cutoff: Option<u8>,

    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Emit tracing spans as JSON instead of the plain stderr log.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_logs: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("no input image: pass --input or set image_path in --config")]
    MissingInput,
    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        source: SegmentIoError,
    },
    #[error("failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        source: SegmentIoError,
    },
    #[error("image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("output image cannot be encoded as PNG")]
    OutputTooLarge,
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level `{s}` (off, error, warn, info, debug, trace)"))
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) {
    if cli.json_logs {
        otsu_seg_core::init_tracing(true);
    } else if otsu_seg_core::init_with_level(cli.log_level).is_err() {
        eprintln!("logger already initialized");
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) {
    if otsu_seg_core::init_with_level(cli.log_level).is_err() {
        eprintln!("logger already initialized");
    }
}

/// Merge the optional config file with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<SegmentConfig, CliError> {
    let mut cfg = match &cli.config {
        Some(path) => SegmentConfig::load_json(path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?,
        None => {
            let input = cli.input.as_ref().ok_or(CliError::MissingInput)?;
            SegmentConfig::new(input.to_string_lossy())
        }
    };

    if let Some(input) = &cli.input {
        cfg.image_path = input.to_string_lossy().into_owned();
    }
    if cfg.image_path.is_empty() {
        return Err(CliError::MissingInput);
    }
    if let Some(p) = &cli.output {
        cfg.output_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(p) = &cli.report {
        cfg.report_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(p) = &cli.plot {
        cfg.plot_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(b) = cli.border_width {
        cfg.params.border_width = b;
    }
    if let Some(c) = cli.dark_cutoff {
        cfg.params.dark_cutoff = c;
    }
    if cli.debug || cfg.plot_path.is_some() {
        cfg.params.emit_debug_artifacts = true;
    }
    Ok(cfg)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = resolve_config(&cli)?;
    let t_total = Instant::now();

    let input = PathBuf::from(&cfg.image_path);
    let img = image::open(&input).map_err(|source| CliError::Image {
        path: input.clone(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{}, {:?})",
        input.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let segmenter = cfg.build_segmenter();
    let mut report = SegmentReport::new(cfg.image_path.clone(), cli.config.as_deref());

    let result = match segment_dynamic_image(&img, &segmenter) {
        Ok(res) => res,
        Err(err) => {
            report.set_error(&err);
            write_report(&cfg, &report)?;
            return Err(err.into());
        }
    };
    report.set_result(&result);

    match (&result.plan, &result.passthrough) {
        (Some(plan), _) => log::info!("plan: {plan:?}"),
        (None, Some(reason)) => log::warn!("image passed through: {reason}"),
        (None, None) => {}
    }

    if let (Some(path), Some(debug)) = (cfg.plot_path.as_ref(), result.debug.as_ref()) {
        let plot = plot_to_rgb(&debug.plot).ok_or(CliError::OutputTooLarge)?;
        save(&DynamicImage::ImageRgb8(plot), Path::new(path))?;
    }

    let output_path = cfg.output_path();
    let out = to_dynamic_image(result.image).ok_or(CliError::OutputTooLarge)?;
    save(&out, &output_path)?;

    write_report(&cfg, &report)?;
    log::info!("done in {} ms", t_total.elapsed().as_millis());
    Ok(())
}

fn save(img: &DynamicImage, path: &Path) -> Result<(), CliError> {
    img.save(path).map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    println!("wrote {}", path.display());
    Ok(())
}

fn write_report(cfg: &SegmentConfig, report: &SegmentReport) -> Result<(), CliError> {
    let Some(path) = cfg.report_path.as_ref().map(PathBuf::from) else {
        return Ok(());
    };
    report
        .write_json(&path)
        .map_err(|source| CliError::Report {
            path: path.clone(),
            source,
        })?;
    println!("wrote report JSON to {}", path.display());
    Ok(())
}
