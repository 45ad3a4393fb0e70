//! Document-level conversion entry points.
//!
//! [`convert`] runs the whole pipeline for one document; [`convert_batch`]
//! iterates a batch with per-document failure isolation, the way the
//! original uploader UI looped over files. The pipeline is synchronous
//! and stateless: each document is processed to completion before the
//! next begins, and every intermediate bitmap is dropped when its
//! document's result is returned. Callers that want to re-display results
//! without recomputing hold onto the returned [`ConversionResult`]s
//! themselves.

use crate::config::ConversionConfig;
use crate::error::{ConversionError, EncodeError};
use crate::output::{ConversionResult, ConversionStats};
use crate::pipeline::{archive, assemble, encode, render, resize};
use crate::sanitize::sanitize_base_name;
use std::time::Instant;
use tracing::{info, warn};

/// Convert one PDF document into its bundle artifacts.
///
/// `name` is the caller-supplied document name (typically the upload
/// filename without extension); it is sanitized before use and returned
/// in the result.
///
/// # Errors
/// Any stage failure is wrapped as [`ConversionError`] carrying the
/// sanitized document name. On error no artifact bytes are produced.
///
/// # Example
/// ```rust,no_run
/// use pagepress::{convert, ConversionConfig};
///
/// let raw = std::fs::read("scan.pdf")?;
/// let result = convert(&raw, "scan", &ConversionConfig::default())?;
/// std::fs::write(result.archive_file_name(), &result.archive_bytes)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert(
    raw: &[u8],
    name: &str,
    config: &ConversionConfig,
) -> Result<ConversionResult, ConversionError> {
    let total_start = Instant::now();
    let base_name = sanitize_base_name(name);
    info!("Converting '{}' ({} bytes)", base_name, raw.len());

    let wrap = |e: EncodeError| ConversionError::new(base_name.as_str(), e);

    // ── Rasterise ────────────────────────────────────────────────────────
    let render_start = Instant::now();
    let pages = render::rasterize(raw, config.dpi, config.password.as_deref())
        .map_err(|e| ConversionError::new(base_name.as_str(), e))?;
    let render_ms = render_start.elapsed().as_millis() as u64;

    // ── Resize once; both artifacts consume the same bitmaps ─────────────
    let encode_start = Instant::now();
    let resized: Vec<_> = pages
        .into_iter()
        .map(|page| resize::constrain(page, config.max_dimension))
        .collect();

    // A zero-page document fails here, before any artifact exists.
    let pdf_bytes = assemble::build_pdf(&resized, config.quality).map_err(wrap)?;

    let page_images = resized
        .iter()
        .enumerate()
        .map(|(index, page)| encode::encode_page(page, config.output_format, config.quality, index + 1))
        .collect::<Result<Vec<_>, EncodeError>>()
        .map_err(wrap)?;

    let archive_bytes =
        archive::build_bundle(&base_name, &pdf_bytes, &page_images, config.output_format)
            .map_err(wrap)?;
    let encode_ms = encode_start.elapsed().as_millis() as u64;

    // build_pdf rejected the empty case, so the first page exists.
    let first_page = &resized[0];
    let stats = ConversionStats {
        page_count: resized.len(),
        archive_bytes: archive_bytes.len(),
        pdf_bytes: pdf_bytes.len(),
        render_ms,
        encode_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Converted '{}': {} pages, archive {} bytes, pdf {} bytes in {}ms",
        base_name, stats.page_count, stats.archive_bytes, stats.pdf_bytes, stats.total_ms
    );

    Ok(ConversionResult {
        page_count: resized.len(),
        first_page_width: first_page.width(),
        first_page_height: first_page.height(),
        archive_bytes,
        compressed_pdf_bytes: pdf_bytes,
        base_name,
        output_format: config.output_format,
        stats,
    })
}

/// Convert a batch of documents, isolating failures per document.
///
/// Returns one entry per input, in input order. A failing document yields
/// its [`ConversionError`] (logged as a warning) and never aborts the
/// remaining documents.
pub fn convert_batch<'a, I>(
    documents: I,
    config: &ConversionConfig,
) -> Vec<Result<ConversionResult, ConversionError>>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    documents
        .into_iter()
        .map(|(name, raw)| {
            let result = convert(raw, name, config);
            if let Err(ref e) = result {
                warn!("{e}");
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, PipelineError};

    #[test]
    fn malformed_bytes_fail_with_decode_error_and_no_artifacts() {
        let err = convert(b"not a pdf at all", "junk", &ConversionConfig::default()).unwrap_err();
        assert_eq!(err.name, "junk");
        assert!(matches!(
            err.source,
            PipelineError::Decode(DecodeError::InvalidPdf { .. })
        ));
    }

    #[test]
    fn error_carries_the_sanitized_name() {
        let err = convert(b"", "bad / name", &ConversionConfig::default()).unwrap_err();
        assert_eq!(err.name, "bad___name");
    }

    #[test]
    fn batch_failures_do_not_abort_the_rest() {
        let docs: Vec<(&str, &[u8])> =
            vec![("first", b"garbage".as_slice()), ("second", b"also garbage")];
        let results = convert_batch(docs, &ConversionConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap_err().name, "first");
        assert_eq!(results[1].as_ref().unwrap_err().name, "second");
    }
}
