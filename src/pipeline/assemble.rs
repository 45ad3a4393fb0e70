//! Compressed-PDF reassembly: resized page bitmaps → one multi-page PDF.
//!
//! Each page image is embedded as a JPEG `XObject` (`DCTDecode`) drawn
//! over the full page, with the `MediaBox` sized 1 pt per pixel so the
//! reader-visible page proportions match the bitmap exactly. JPEG is used
//! regardless of the archive's output format — PDF viewers decode it
//! universally, and it is what keeps the reassembled file small.

use crate::error::EncodeError;
use crate::pipeline::encode::check_jpeg_limits;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

/// Build a multi-page PDF where page *i* is exactly the *i*-th bitmap.
///
/// # Errors
/// [`EncodeError::EmptyPageSet`] for an empty sequence — a zero-page
/// source document must fail here, not produce an empty artifact.
pub fn build_pdf(pages: &[DynamicImage], quality: u8) -> Result<Vec<u8>, EncodeError> {
    if pages.is_empty() {
        return Err(EncodeError::EmptyPageSet);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());

    for (index, image) in pages.iter().enumerate() {
        let (width, height) = (image.width() as i64, image.height() as i64);
        let jpeg = embed_jpeg(image, quality, index + 1)?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        // Scale the unit image square up to the full page.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(EncodeError::Pdf)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(Object::Reference(page_id));
        debug!("Embedded page {} ({}x{} px)", index + 1, width, height);
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| EncodeError::Pdf(e.into()))?;
    Ok(bytes)
}

/// Baseline JPEG for embedding.
///
/// Unlike the archive images this is deliberately not progressive:
/// `DCTDecode` consumers only reliably handle sequential scans.
fn embed_jpeg(image: &DynamicImage, quality: u8, page: usize) -> Result<Vec<u8>, EncodeError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    check_jpeg_limits(width, height, page)?;

    let mut bytes = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut bytes, quality);
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

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, 40])
        }))
    }

    #[test]
    fn empty_page_set_is_an_error() {
        let err = build_pdf(&[], 85).unwrap_err();
        assert!(matches!(err, EncodeError::EmptyPageSet));
    }

    #[test]
    fn output_starts_with_pdf_magic() {
        let bytes = build_pdf(&[gradient(40, 60)], 85).unwrap();
        assert_eq!(&bytes[..4], b"%PDF");
    }

    #[test]
    fn page_count_survives_a_round_trip() {
        let pages: Vec<_> = (0..3).map(|_| gradient(40, 60)).collect();
        let bytes = build_pdf(&pages, 85).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn media_box_matches_pixel_dimensions() {
        let bytes = build_pdf(&[gradient(123, 456)], 85).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let dims: Vec<i64> = media_box.iter().map(|o| o.as_i64().unwrap()).collect();
        assert_eq!(dims, vec![0, 0, 123, 456]);
    }

    #[test]
    fn pages_preserve_input_order() {
        // Distinguish pages by their dimensions.
        let pages = vec![gradient(10, 20), gradient(30, 40), gradient(50, 60)];
        let bytes = build_pdf(&pages, 85).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let mut widths = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            widths.push(media_box[2].as_i64().unwrap());
        }
        assert_eq!(widths, vec![10, 30, 50]);
    }
}
