//! Long-side resize policy.
//!
//! Pure and infallible: given a valid bitmap it always produces a valid
//! bitmap. The same resized sequence feeds both the PDF reassembler and
//! the page re-encoder, so the two artifacts cannot disagree on page
//! dimensions.

use image::{imageops::FilterType, DynamicImage};
use tracing::debug;

/// Constrain an image's long side to `max_dimension`.
///
/// * `None` — no-limit policy, image returned unchanged.
/// * Long side already within the limit — returned unchanged (never
///   upscales).
/// * Otherwise both axes scale by `max_dimension / long_side` with
///   Lanczos3 resampling. Each axis truncates toward zero independently,
///   so aspect ratio is preserved up to one pixel per axis.
pub fn constrain(image: DynamicImage, max_dimension: Option<u32>) -> DynamicImage {
    let Some(limit) = max_dimension else {
        return image;
    };

    let (width, height) = (image.width(), image.height());
    let long_side = width.max(height);
    if long_side <= limit {
        return image;
    }

    let ratio = limit as f64 / long_side as f64;
    let new_width = ((width as f64 * ratio) as u32).max(1);
    let new_height = ((height as f64 * ratio) as u32).max(1);

    debug!(
        "Resizing {}x{} -> {}x{} (limit {})",
        width, height, new_width, new_height, limit
    );
    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}
