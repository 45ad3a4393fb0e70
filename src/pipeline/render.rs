//! PDF rasterisation: render every page to a `DynamicImage` via pdfium.
//!
//! ## Why DPI drives the target size
//!
//! PDF pages are sized in points (72 per inch); pdfium wants a pixel
//! target per page. Scaling each page's point size by `dpi / 72` gives
//! every page of the document the same density regardless of its physical
//! size, which is what the downstream resize pass expects to start from.
//!
//! This stage only decodes — no resizing, no format conversion.

use crate::error::DecodeError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Points per inch in PDF user space.
const POINTS_PER_INCH: f32 = 72.0;

/// Rasterise every page of a PDF byte buffer at the given density.
///
/// The output order matches document page order; that ordering drives
/// page numbering in archive entries and PDF reassembly downstream.
///
/// # Errors
/// * [`DecodeError::InvalidPdf`] — buffer is not a parseable PDF
/// * [`DecodeError::BackendUnavailable`] — no pdfium library on the host
/// * [`DecodeError::PasswordRequired`] / [`DecodeError::WrongPassword`]
/// * [`DecodeError::RenderFailed`] — a page failed to render
pub fn rasterize(
    raw: &[u8],
    dpi: u32,
    password: Option<&str>,
) -> Result<Vec<DynamicImage>, DecodeError> {
    // Cheap magic-byte check before paying for a backend bind, so callers
    // get a meaningful error rather than a pdfium parse failure.
    if raw.len() < 4 || &raw[..4] != b"%PDF" {
        return Err(DecodeError::InvalidPdf {
            detail: format!("missing %PDF header, first bytes: {:?}", &raw[..raw.len().min(4)]),
        });
    }

    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(raw, password)
        .map_err(|e| classify_load_error(e, password))?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    info!("PDF loaded: {} pages", page_count);

    let scale = dpi as f32 / POINTS_PER_INCH;
    let mut images = Vec::with_capacity(page_count);

    for index in 0..page_count {
        let page = pages
            .get(index as u16)
            .map_err(|e| DecodeError::RenderFailed {
                page: index + 1,
                detail: format!("{e:?}"),
            })?;

        let width = (page.width().value * scale).round() as i32;
        let height = (page.height().value * scale).round() as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| DecodeError::RenderFailed {
                page: index + 1,
                detail: format!("{e:?}"),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} -> {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );
        images.push(image);
    }

    Ok(images)
}

/// Bind to a pdfium library, honouring the `PDFIUM_LIB_PATH` override.
fn bind_pdfium() -> Result<Pdfium, DecodeError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path),
        _ => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| DecodeError::BackendUnavailable(e.to_string()))?;
    Ok(Pdfium::new(bindings))
}

/// Map a pdfium load failure onto the decode taxonomy.
fn classify_load_error(err: PdfiumError, password: Option<&str>) -> DecodeError {
    let detail = format!("{err:?}");
    if detail.to_ascii_lowercase().contains("password") {
        if password.is_some() {
            DecodeError::WrongPassword
        } else {
            DecodeError::PasswordRequired
        }
    } else {
        DecodeError::InvalidPdf { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes_before_binding() {
        // Runs everywhere: the magic check fires before any backend bind.
        let err = rasterize(b"GIF89a not a pdf", 200, None).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPdf { .. }), "got: {err:?}");
    }

    #[test]
    fn rejects_truncated_buffers() {
        let err = rasterize(b"%P", 200, None).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPdf { .. }));
    }
}
