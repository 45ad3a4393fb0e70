//! # pagepress
//!
//! Convert PDF documents into per-page raster images (JPEG or WebP)
//! bundled with a recompressed PDF in a single downloadable archive.
//!
//! ## Why this crate?
//!
//! Sharing a scanned or generated PDF often means sharing far more bytes
//! than the content needs — 300-DPI embedded scans, uncompressed streams,
//! pages nobody will zoom into. This crate rasterises each page at a
//! chosen density, constrains it to a sensible pixel budget, re-encodes
//! it at a chosen quality, and hands back both a lightweight multi-page
//! PDF and a ZIP of per-page images ready for upload forms, chat
//! attachments, or AI ingestion pipelines.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Render    rasterise pages via pdfium at the configured DPI
//!  ├─ 2. Resize    constrain the long side (shared by both artifacts)
//!  ├─ 3. Assemble  re-embed pages as JPEG into a compressed PDF
//!  ├─ 4. Encode    re-encode each page as JPEG or WebP
//!  └─ 5. Package   ZIP bundle + size/resolution metrics
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagepress::{convert, ConversionConfig, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raw = std::fs::read("report.pdf")?;
//!     let config = ConversionConfig::builder()
//!         .output_format(OutputFormat::Webp)
//!         .max_dimension(Some(1920))
//!         .quality(85)
//!         .build()?;
//!
//!     let result = convert(&raw, "report", &config)?;
//!     std::fs::write(result.archive_file_name(), &result.archive_bytes)?;
//!     std::fs::write(result.pdf_file_name(), &result.compressed_pdf_bytes)?;
//!     eprintln!(
//!         "{} pages, first page {}x{} px",
//!         result.page_count, result.first_page_width, result.first_page_height
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagepress` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pagepress = { version = "0.1", default-features = false }
//! ```
//!
//! ## Runtime dependency
//!
//! Rasterisation needs a pdfium shared library on the host. If it is not
//! on the loader path, set `PDFIUM_LIB_PATH=/path/to/libpdfium`. A
//! missing backend surfaces as [`DecodeError::BackendUnavailable`], not a
//! panic.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sanitize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ConversionConfig, ConversionConfigBuilder, OutputFormat, DPI_RANGE, MAX_DIMENSION_PRESETS,
    QUALITY_RANGE,
};
pub use convert::{convert, convert_batch};
pub use error::{ConversionError, DecodeError, EncodeError, PipelineError};
pub use output::{ConversionResult, ConversionStats};
pub use sanitize::sanitize_base_name;
