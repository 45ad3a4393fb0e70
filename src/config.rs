//! Configuration types for a PDF conversion request.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share one config across a whole batch, serialise it for
//! logging, and diff two runs to understand why their outputs differ.

use crate::error::{ConversionError, PipelineError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive DPI range accepted by [`ConversionConfigBuilder::dpi`].
pub const DPI_RANGE: (u32, u32) = (100, 400);

/// Inclusive quality range accepted by [`ConversionConfigBuilder::quality`].
pub const QUALITY_RANGE: (u8, u8) = (50, 100);

/// The long-side limits offered by the original picker UI.
///
/// [`ConversionConfig::max_dimension`] accepts any positive value; these are
/// only the recommended presets (1920 ≈ full HD is the default).
pub const MAX_DIMENSION_PRESETS: [u32; 5] = [1024, 1280, 1920, 2560, 3840];

/// Output format for the per-page images in the bundle archive.
///
/// The recompressed PDF always embeds JPEG regardless of this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline-compatible, universally readable.
    Jpeg,
    /// Smaller at equal quality; default, matching the original tool.
    #[default]
    Webp,
}

impl OutputFormat {
    /// File extension used for archive entries.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => write!(f, "JPEG"),
            OutputFormat::Webp => write!(f, "WebP"),
        }
    }
}

/// Configuration for one conversion request.
///
/// Applies uniformly to every page of every document converted with it.
///
/// # Example
/// ```rust
/// use pagepress::{ConversionConfig, OutputFormat};
///
/// let config = ConversionConfig::builder()
///     .output_format(OutputFormat::Jpeg)
///     .max_dimension(Some(2560))
///     .dpi(300)
///     .quality(90)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Format for the per-page images in the archive. Default: WebP.
    pub output_format: OutputFormat,

    /// Maximum long-side length in pixels; `None` disables resizing.
    /// Default: 1920.
    ///
    /// Pages whose long side already fits are passed through untouched —
    /// the pipeline never upscales.
    pub max_dimension: Option<u32>,

    /// Rasterisation density in dots per inch. Range: 100–400. Default: 200.
    ///
    /// With resizing enabled, 200 DPI is plenty: the rasteriser only needs
    /// enough pixels for the resize pass to downsample from, and higher
    /// densities just cost render time and memory.
    pub dpi: u32,

    /// Re-encoding quality, 50–100 (higher = larger, more faithful).
    /// Default: 85.
    ///
    /// Applies to the archive images and to the JPEGs embedded in the
    /// recompressed PDF alike.
    pub quality: u8,

    /// Password for encrypted source documents.
    pub password: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            max_dimension: Some(1920),
            dpi: 200,
            quality: 85,
            password: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// `None` means unlimited; `Some(0)` is rejected by [`build`](Self::build).
    pub fn max_dimension(mut self, limit: Option<u32>) -> Self {
        self.config.max_dimension = limit;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(DPI_RANGE.0, DPI_RANGE.1);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.config.quality = quality.clamp(QUALITY_RANGE.0, QUALITY_RANGE.1);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConversionError> {
        let c = &self.config;
        if c.dpi < DPI_RANGE.0 || c.dpi > DPI_RANGE.1 {
            return Err(invalid_config(format!(
                "DPI must be {}-{}, got {}",
                DPI_RANGE.0, DPI_RANGE.1, c.dpi
            )));
        }
        if c.quality < QUALITY_RANGE.0 || c.quality > QUALITY_RANGE.1 {
            return Err(invalid_config(format!(
                "quality must be {}-{}, got {}",
                QUALITY_RANGE.0, QUALITY_RANGE.1, c.quality
            )));
        }
        if c.max_dimension == Some(0) {
            return Err(invalid_config(
                "max_dimension must be positive (use None for unlimited)".into(),
            ));
        }
        Ok(self.config)
    }
}

fn invalid_config(detail: String) -> ConversionError {
    ConversionError {
        name: "<config>".into(),
        source: PipelineError::InvalidConfig(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_tool() {
        let c = ConversionConfig::default();
        assert_eq!(c.output_format, OutputFormat::Webp);
        assert_eq!(c.max_dimension, Some(1920));
        assert_eq!(c.dpi, 200);
        assert_eq!(c.quality, 85);
        assert!(c.password.is_none());
    }

    #[test]
    fn builder_clamps_dpi_and_quality() {
        let c = ConversionConfig::builder()
            .dpi(9999)
            .quality(1)
            .build()
            .unwrap();
        assert_eq!(c.dpi, 400);
        assert_eq!(c.quality, 50);
    }

    #[test]
    fn zero_max_dimension_is_rejected() {
        let err = ConversionConfig::builder()
            .max_dimension(Some(0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_dimension"));
    }

    #[test]
    fn unlimited_is_accepted() {
        let c = ConversionConfig::builder()
            .max_dimension(None)
            .build()
            .unwrap();
        assert_eq!(c.max_dimension, None);
    }

    #[test]
    fn extension_matches_format() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Webp.extension(), "webp");
    }
}
