//! Result types produced by a conversion.

use crate::config::OutputFormat;
use serde::Serialize;

/// Everything one successful conversion produces.
///
/// Immutable once returned; the caller owns it for display or download
/// and the pipeline keeps no reference to it.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The bundle archive: compressed PDF plus one image per page.
    pub archive_bytes: Vec<u8>,

    /// The standalone recompressed multi-page PDF.
    pub compressed_pdf_bytes: Vec<u8>,

    /// Sanitized base name every artifact name derives from.
    pub base_name: String,

    /// Image format used for the archive's page entries.
    pub output_format: OutputFormat,

    /// Number of pages converted; always ≥ 1.
    pub page_count: usize,

    /// Width in pixels of the first page after resizing.
    pub first_page_width: u32,

    /// Height in pixels of the first page after resizing.
    pub first_page_height: u32,

    /// Size and timing metrics for display.
    pub stats: ConversionStats,
}

impl ConversionResult {
    /// Download name for the bundle archive.
    pub fn archive_file_name(&self) -> String {
        format!("{}_bundle.zip", self.base_name)
    }

    /// Download name for the standalone compressed PDF.
    pub fn pdf_file_name(&self) -> String {
        format!("{}_compressed.pdf", self.base_name)
    }
}

/// Display metrics for one conversion.
///
/// Purely informational; nothing downstream branches on these values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Number of pages converted.
    pub page_count: usize,

    /// Final bundle archive size in bytes.
    pub archive_bytes: usize,

    /// Standalone compressed-PDF size in bytes.
    pub pdf_bytes: usize,

    /// Wall-clock time spent rasterising.
    pub render_ms: u64,

    /// Wall-clock time spent resizing, re-encoding, and packaging.
    pub encode_ms: u64,

    /// Total conversion time for the document.
    pub total_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_derive_from_base_name() {
        let result = ConversionResult {
            archive_bytes: vec![],
            compressed_pdf_bytes: vec![],
            base_name: "quarterly_report".into(),
            output_format: OutputFormat::Webp,
            page_count: 3,
            first_page_width: 1280,
            first_page_height: 1920,
            stats: ConversionStats::default(),
        };
        assert_eq!(result.archive_file_name(), "quarterly_report_bundle.zip");
        assert_eq!(result.pdf_file_name(), "quarterly_report_compressed.pdf");
    }
}
