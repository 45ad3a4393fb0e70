//! CLI binary for pagepress.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, drives the batch loop with per-file failure
//! isolation, and writes the artifacts next to each other in the output
//! directory.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagepress::{
    convert, ConversionConfig, ConversionResult, OutputFormat, DPI_RANGE, MAX_DIMENSION_PRESETS,
    QUALITY_RANGE,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one PDF with the defaults (WebP, long side 1920 px, 200 DPI, q85)
  pagepress scan.pdf

  # A whole folder of PDFs as JPEG, into ./out
  pagepress --format jpg -o out invoices/*.pdf

  # Keep full resolution, maximum quality
  pagepress --max-dim unlimited --quality 100 poster.pdf

  # High-density rasterisation for small print
  pagepress --dpi 400 --max-dim 3840 contract.pdf

  # Encrypted document
  pagepress --password hunter2 statement.pdf

  # Machine-readable metrics
  pagepress --json report.pdf > metrics.json

OUTPUT:
  For each INPUT the current (or --out-dir) directory receives
    {name}_bundle.zip        compressed PDF + page_{NNN}.{jpg|webp} per page
    {name}_compressed.pdf    the standalone recompressed PDF
  where {name} is the input filename, sanitized for filesystem safety.

RECOMMENDED --max-dim VALUES:
  1024, 1280, 1920 (full HD, default), 2560, 3840, or "unlimited".
  Any positive pixel count is accepted.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to a pdfium shared library, if not on the loader path
"#;

/// Convert PDFs into per-page images plus a recompressed PDF bundle.
#[derive(Parser, Debug)]
#[command(
    name = "pagepress",
    version,
    about = "Convert PDFs into per-page JPEG/WebP images plus a recompressed PDF bundle",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF files to convert.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the output artifacts.
    #[arg(short, long, env = "PAGEPRESS_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Page image format for the bundle archive.
    #[arg(short, long, env = "PAGEPRESS_FORMAT", value_enum, default_value = "webp")]
    format: FormatArg,

    /// Long-side pixel limit, or "unlimited".
    #[arg(long, env = "PAGEPRESS_MAX_DIM", default_value = "1920",
          value_parser = parse_max_dim)]
    max_dim: MaxDim,

    /// Rasterisation density (100-400).
    #[arg(long, env = "PAGEPRESS_DPI", default_value_t = 200,
          value_parser = clap::value_parser!(u32).range(DPI_RANGE.0 as i64..=DPI_RANGE.1 as i64))]
    dpi: u32,

    /// Re-encoding quality (50-100).
    #[arg(short, long, env = "PAGEPRESS_QUALITY", default_value_t = 85,
          value_parser = clap::value_parser!(u8).range(QUALITY_RANGE.0 as i64..=QUALITY_RANGE.1 as i64))]
    quality: u8,

    /// Password for encrypted source documents.
    #[arg(long, env = "PAGEPRESS_PASSWORD")]
    password: Option<String>,

    /// Print a JSON metrics record per document instead of the summary.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PAGEPRESS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAGEPRESS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(long, env = "PAGEPRESS_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Jpg,
    Webp,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Jpg => OutputFormat::Jpeg,
            FormatArg::Webp => OutputFormat::Webp,
        }
    }
}

/// Newtype so clap can parse "unlimited" alongside pixel counts.
#[derive(Clone, Copy, Debug)]
struct MaxDim(Option<u32>);

fn parse_max_dim(s: &str) -> Result<MaxDim, String> {
    if s.eq_ignore_ascii_case("unlimited") || s.eq_ignore_ascii_case("none") {
        return Ok(MaxDim(None));
    }
    match s.parse::<u32>() {
        Ok(0) => Err("pixel limit must be positive".into()),
        Ok(px) => Ok(MaxDim(Some(px))),
        Err(_) => Err(format!(
            "expected a pixel count (e.g. {}) or \"unlimited\", got '{s}'",
            MAX_DIMENSION_PRESETS.map(|p| p.to_string()).join(", ")
        )),
    }
}

/// One line of `--json` output per document.
#[derive(Serialize)]
struct JsonRecord<'a> {
    input: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a pagepress::ConversionStats>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", cli.out_dir))?;

    // ── Batch loop: every document is attempted, failures are reported ───
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let bar = batch_bar(cli.inputs.len(), show_progress);

    let mut failed = 0usize;
    for input in &cli.inputs {
        let display = input.display().to_string();
        bar.set_message(display.clone());

        match convert_one(input, &cli, &config) {
            Ok(result) => {
                if cli.json {
                    print_json(&display, Ok(&result));
                } else if show_progress {
                    bar.println(format_success(&display, &result));
                } else if !cli.quiet {
                    eprintln!("{}", format_success(&display, &result));
                }
            }
            Err(e) => {
                failed += 1;
                if cli.json {
                    print_json(&display, Err(&e));
                } else {
                    let line =
                        format!("  {} {}  {}", red("✗"), bold(&display), red(&format!("{e:#}")));
                    if show_progress {
                        bar.println(line);
                    } else {
                        eprintln!("{line}");
                    }
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if !cli.quiet && !cli.json {
        let total = cli.inputs.len();
        if failed == 0 {
            eprintln!("{} {} documents converted", green("✔"), bold(&total.to_string()));
        } else {
            eprintln!(
                "{} {}/{} documents converted  ({} failed)",
                red("✘"),
                bold(&(total - failed).to_string()),
                total,
                red(&failed.to_string()),
            );
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Convert one input file and write its artifacts to the output directory.
fn convert_one(input: &Path, cli: &Cli, config: &ConversionConfig) -> Result<ConversionResult> {
    let raw = std::fs::read(input).with_context(|| format!("Failed to read {input:?}"))?;

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let result = convert(&raw, &name, config)?;

    let archive_path = cli.out_dir.join(result.archive_file_name());
    std::fs::write(&archive_path, &result.archive_bytes)
        .with_context(|| format!("Failed to write {archive_path:?}"))?;

    let pdf_path = cli.out_dir.join(result.pdf_file_name());
    std::fs::write(&pdf_path, &result.compressed_pdf_bytes)
        .with_context(|| format!("Failed to write {pdf_path:?}"))?;

    Ok(result)
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .output_format(cli.format.into())
        .max_dimension(cli.max_dim.0)
        .dpi(cli.dpi)
        .quality(cli.quality);
    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    builder.build().context("Invalid configuration")
}

fn batch_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos}/{len}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    bar.set_prefix("Converting");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn format_success(input: &str, result: &ConversionResult) -> String {
    format!(
        "  {} {}  {} pages  {}x{} px  zip {}  pdf {}",
        green("✓"),
        bold(input),
        result.page_count,
        result.first_page_width,
        result.first_page_height,
        dim(&format_mib(result.stats.archive_bytes)),
        dim(&format_mib(result.stats.pdf_bytes)),
    )
}

fn format_mib(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn print_json(input: &str, outcome: Result<&ConversionResult, &anyhow::Error>) {
    let record = match outcome {
        Ok(result) => JsonRecord {
            input,
            ok: true,
            error: None,
            archive: Some(result.archive_file_name()),
            pdf: Some(result.pdf_file_name()),
            stats: Some(&result.stats),
        },
        Err(e) => JsonRecord {
            input,
            ok: false,
            error: Some(format!("{e:#}")),
            archive: None,
            pdf: None,
            stats: None,
        },
    };
    match serde_json::to_string(&record) {
        Ok(line) => println!("{line}"),
        Err(e) => eprintln!("failed to serialise metrics for {input}: {e}"),
    }
}
