//! Error types for the pagepress library.
//!
//! The taxonomy mirrors the two halves of the pipeline:
//!
//! * [`DecodeError`] — the input could not be turned into bitmaps at all
//!   (corrupt PDF, missing rendering backend, wrong password).
//!
//! * [`EncodeError`] — bitmaps existed but could not be re-encoded into
//!   one of the output artifacts (page images, compressed PDF, archive).
//!
//! Both are wrapped into [`ConversionError`] at the document boundary,
//! which is the only error kind [`crate::convert`] ever returns. It
//! carries the failing document's name so a batch caller can report
//! which upload broke without tracking indices itself.

use thiserror::Error;

/// The input PDF could not be decoded into page bitmaps.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No pdfium library could be bound on this host.
    #[error(
        "PDF rendering backend unavailable: {0}\n\
         Install a pdfium shared library, or point PDFIUM_LIB_PATH at an existing copy."
    )]
    BackendUnavailable(String),

    /// The buffer is not a PDF, or its structure is corrupt.
    #[error("input is not a valid PDF: {detail}")]
    InvalidPdf { detail: String },

    /// The document is encrypted and no password was supplied.
    #[error("PDF is encrypted and requires a password")]
    PasswordRequired,

    /// A password was supplied but rejected.
    #[error("wrong password for encrypted PDF")]
    WrongPassword,

    /// The backend failed while rendering a specific page.
    #[error("rasterisation failed for page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },
}

/// Page bitmaps could not be re-encoded into an output artifact.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The document produced no pages, so there is nothing to encode.
    ///
    /// A zero-page source PDF surfaces here rather than as a silent
    /// empty archive.
    #[error("document produced no pages to encode")]
    EmptyPageSet,

    /// A page exceeds the JPEG wire-format dimension limit (65 535 px per axis).
    #[error("page {page} is {width}x{height} px, exceeding the 65535 px JPEG limit")]
    PageTooLarge { page: usize, width: u32, height: u32 },

    /// JPEG re-encoding failed for one page.
    #[error("JPEG encoding failed for page {page}: {detail}")]
    Jpeg { page: usize, detail: String },

    /// WebP re-encoding failed for one page.
    #[error("WebP encoding failed for page {page}: {detail}")]
    Webp { page: usize, detail: String },

    /// The reassembled PDF could not be serialised.
    #[error("failed to assemble compressed PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The bundle archive could not be written.
    #[error("failed to write bundle archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Either half of the pipeline, for callers that match on the stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A failed conversion of one document.
///
/// Wraps every [`DecodeError`] and [`EncodeError`] the pipeline can
/// produce; one document failing never aborts the rest of a batch.
#[derive(Debug, Error)]
#[error("conversion of '{name}' failed: {source}")]
pub struct ConversionError {
    /// Sanitized base name of the failing document.
    pub name: String,
    #[source]
    pub source: PipelineError,
}

impl ConversionError {
    pub(crate) fn new(name: impl Into<String>, source: impl Into<PipelineError>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_the_document() {
        let e = ConversionError::new("報告書_2024", DecodeError::PasswordRequired);
        let msg = e.to_string();
        assert!(msg.contains("報告書_2024"), "got: {msg}");
        assert!(msg.contains("password"), "got: {msg}");
    }

    #[test]
    fn page_too_large_display() {
        let e = EncodeError::PageTooLarge {
            page: 2,
            width: 70_000,
            height: 500,
        };
        assert!(e.to_string().contains("70000x500"));
        assert!(e.to_string().contains("page 2"));
    }

    #[test]
    fn render_failed_display() {
        let e = DecodeError::RenderFailed {
            page: 7,
            detail: "bitmap allocation failed".into(),
        };
        assert!(e.to_string().contains("page 7"));
        assert!(e.to_string().contains("bitmap allocation failed"));
    }

    #[test]
    fn empty_page_set_mentions_pages() {
        assert!(EncodeError::EmptyPageSet.to_string().contains("no pages"));
    }

    #[test]
    fn pipeline_error_is_transparent() {
        let e = PipelineError::from(EncodeError::EmptyPageSet);
        assert_eq!(e.to_string(), EncodeError::EmptyPageSet.to_string());
    }
}
