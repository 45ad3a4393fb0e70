//! Page re-encoding: `DynamicImage` → JPEG or WebP bytes.
//!
//! Both paths flatten to 8-bit RGB first — pdfium renders with an alpha
//! channel, but every page in this pipeline is opaque, and neither the
//! archive images nor the embedded PDF images carry transparency.
//!
//! JPEG output is progressive with optimized Huffman tables and 4:2:0
//! subsampling; WebP is lossy at the same 50–100 quality scale.

use crate::config::OutputFormat;
use crate::error::EncodeError;
use image::DynamicImage;
use tracing::debug;

/// Re-encode one page in the requested archive format.
///
/// `page` is the 1-based page number, used only for error reporting.
pub fn encode_page(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
    page: usize,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality, page)?,
        OutputFormat::Webp => encode_webp(image, quality, page)?,
    };
    debug!(
        "Encoded page {} as {} -> {} bytes",
        page,
        format.extension(),
        bytes.len()
    );
    Ok(bytes)
}

/// Progressive JPEG at the given quality.
fn encode_jpeg(image: &DynamicImage, quality: u8, page: usize) -> Result<Vec<u8>, EncodeError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    check_jpeg_limits(width, height, page)?;

    let mut bytes = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut bytes, quality);
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder.set_sampling_factor(jpeg_encoder::SamplingFactor::R_4_2_0);
    encoder
        .encode(
            rgb.as_raw(),
            width as u16,
            height as u16,
            jpeg_encoder::ColorType::Rgb,
        )
        .map_err(|e| EncodeError::Jpeg {
            page,
            detail: e.to_string(),
        })?;

    Ok(bytes)
}

/// Lossy WebP at the given quality.
fn encode_webp(image: &DynamicImage, quality: u8, page: usize) -> Result<Vec<u8>, EncodeError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
    let memory = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| EncodeError::Webp {
            page,
            detail: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}

/// The JPEG wire format stores dimensions as u16.
pub(crate) fn check_jpeg_limits(width: u32, height: u32, page: usize) -> Result<(), EncodeError> {
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(EncodeError::PageTooLarge {
            page,
            width,
            height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// A small gradient so encoders have real content to compress.
    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn jpeg_output_has_jpeg_magic() {
        let bytes = encode_page(&gradient(64, 48), OutputFormat::Jpeg, 85, 1).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn jpeg_output_is_progressive() {
        // Progressive DCT uses the SOF2 marker.
        let bytes = encode_page(&gradient(64, 48), OutputFormat::Jpeg, 85, 1).unwrap();
        assert!(
            bytes.windows(2).any(|w| w == [0xFF, 0xC2]),
            "no SOF2 marker found"
        );
    }

    #[test]
    fn webp_output_has_riff_magic() {
        let bytes = encode_page(&gradient(64, 48), OutputFormat::Webp, 85, 1).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn decoded_dimensions_match_the_source() {
        for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
            let bytes = encode_page(&gradient(100, 70), format, 85, 1).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (100, 70), "{format}");
        }
    }

    #[test]
    fn alpha_is_flattened_not_rejected() {
        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            20,
            20,
            image::Rgba([255, 0, 0, 128]),
        ));
        for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
            let bytes = encode_page(&rgba, format, 85, 1).unwrap();
            assert!(!bytes.is_empty(), "{format}");
        }
    }

    #[test]
    fn oversized_page_is_reported_with_its_number() {
        let err = check_jpeg_limits(66_000, 100, 4).unwrap_err();
        assert!(matches!(err, EncodeError::PageTooLarge { page: 4, .. }));
    }

    #[test]
    fn lower_quality_does_not_grow_output() {
        let img = gradient(256, 256);
        let low = encode_page(&img, OutputFormat::Webp, 50, 1).unwrap();
        let high = encode_page(&img, OutputFormat::Webp, 100, 1).unwrap();
        assert!(low.len() <= high.len());
    }
}
