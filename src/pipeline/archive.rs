//! Bundle archive: compressed PDF + per-page images in one ZIP.
//!
//! Entry order matches the original download layout: the compressed PDF
//! first, then the pages as `page_{NNN}.{ext}` in document order. All
//! entries are deflate-compressed (the page images are already dense, but
//! deflate is harmless and keeps the archive uniform).

use crate::config::OutputFormat;
use crate::error::EncodeError;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Width of the zero-padded page index in entry names.
const PAGE_INDEX_WIDTH: usize = 3;

/// Assemble the bundle archive for one document.
///
/// `page_images` must be in document order; entry numbering is 1-based.
pub fn build_bundle(
    base_name: &str,
    pdf_bytes: &[u8],
    page_images: &[Vec<u8>],
    format: OutputFormat,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
    let options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file(format!("{base_name}_compressed.pdf"), options)?;
    writer.write_all(pdf_bytes).map_err(zip::result::ZipError::Io)?;

    let ext = format.extension();
    for (index, image_bytes) in page_images.iter().enumerate() {
        writer.start_file(
            format!("page_{:0width$}.{ext}", index + 1, width = PAGE_INDEX_WIDTH),
            options,
        )?;
        writer
            .write_all(image_bytes)
            .map_err(zip::result::ZipError::Io)?;
    }

    writer.finish()?;
    debug!(
        "Bundle archive: {} entries, {} bytes",
        page_images.len() + 1,
        buffer.len()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn archive_holds_pdf_plus_one_entry_per_page() {
        let pages = vec![vec![1u8; 10], vec![2u8; 20], vec![3u8; 30]];
        let bytes = build_bundle("doc", b"%PDF-fake", &pages, OutputFormat::Webp).unwrap();
        assert_eq!(
            entry_names(&bytes),
            vec![
                "doc_compressed.pdf",
                "page_001.webp",
                "page_002.webp",
                "page_003.webp",
            ]
        );
    }

    #[test]
    fn jpeg_entries_use_the_jpg_extension() {
        let bytes =
            build_bundle("scan", b"%PDF-fake", &[vec![0u8; 5]], OutputFormat::Jpeg).unwrap();
        assert_eq!(entry_names(&bytes), vec!["scan_compressed.pdf", "page_001.jpg"]);
    }

    #[test]
    fn page_numbering_is_zero_padded_past_ninety_nine() {
        let pages: Vec<Vec<u8>> = (0..101).map(|i| vec![i as u8]).collect();
        let bytes = build_bundle("big", b"%PDF-fake", &pages, OutputFormat::Webp).unwrap();
        let names = entry_names(&bytes);
        assert_eq!(names[1], "page_001.webp");
        assert_eq!(names[100], "page_100.webp");
        assert_eq!(names[101], "page_101.webp");
    }

    #[test]
    fn entry_contents_round_trip() {
        let pdf = b"%PDF-1.5 payload".to_vec();
        let page = vec![9u8; 64];
        let bytes =
            build_bundle("x", &pdf, std::slice::from_ref(&page), OutputFormat::Webp).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut pdf_out = Vec::new();
        std::io::Read::read_to_end(&mut archive.by_name("x_compressed.pdf").unwrap(), &mut pdf_out)
            .unwrap();
        assert_eq!(pdf_out, pdf);

        let mut page_out = Vec::new();
        std::io::Read::read_to_end(&mut archive.by_name("page_001.webp").unwrap(), &mut page_out)
            .unwrap();
        assert_eq!(page_out, page);
    }
}
