//! PNG encoding for colorized layers.
//!
//! Layers are classified into a handful of scale colors, so they are
//! written as **indexed PNG (color type 3)**: one byte per pixel, a PLTE
//! chunk holding the scale colors, and a tRNS chunk for the transparent
//! nodata slot.

use std::io::Write;
use tracing::debug;
use viewer_common::{ViewerError, ViewerResult};

use crate::colorize::IndexedImage;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// IHDR color type for palette images
const COLOR_TYPE_INDEXED: u8 = 3;

fn encode_err(e: impl std::fmt::Display) -> ViewerError {
    ViewerError::RenderError(format!("PNG encoding failed: {}", e))
}

/// Encode a colorized layer as an indexed PNG.
pub fn encode_indexed_image(image: &IndexedImage) -> ViewerResult<Vec<u8>> {
    create_png_indexed(image.width, image.height, &image.palette, &image.indices)
}

fn check_len(actual: usize, expected: usize, what: &str) -> ViewerResult<()> {
    if actual != expected {
        return Err(encode_err(format!(
            "{} has {} bytes, expected {}",
            what, actual, expected
        )));
    }
    Ok(())
}

/// Create an indexed PNG (color type 3) from palette and indices.
///
/// 1 byte per pixel instead of 4; a tRNS chunk is written when any
/// palette entry is not fully opaque.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> ViewerResult<Vec<u8>> {
    check_len(indices.len(), width * height, "index buffer")?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(encode_err(format!(
            "palette size {} outside 1..={}",
            palette.len(),
            MAX_PALETTE_SIZE
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
        return Err(encode_err(format!(
            "index {} outside a palette of {} colors",
            bad,
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height));

    // PLTE chunk (palette)
    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte_data.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    debug!(width, height, colors = palette.len(), bytes = png.len(), "Encoded indexed PNG");
    Ok(png)
}

/// IHDR payload: 8-bit indexed, no interlace.
fn ihdr(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(COLOR_TYPE_INDEXED);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Write a PNG chunk: length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each `row_bytes`-wide scanline with filter type 0 and deflate.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> ViewerResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed).map_err(encode_err)?;
    encoder.finish().map_err(encode_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_indexed_header_and_trns() {
        let palette = [(255, 255, 255, 255), (0, 0, 0, 0)];
        let png = create_png_indexed(2, 1, &palette, &[0, 1]).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(png[25], 3); // color type
        assert!(png.windows(4).any(|w| w == b"tRNS"));
    }

    #[test]
    fn test_opaque_palette_has_no_trns() {
        let palette = [(255, 255, 255, 255), (1, 46, 1, 255)];
        let png = create_png_indexed(2, 1, &palette, &[0, 1]).unwrap();
        assert!(!png.windows(4).any(|w| w == b"tRNS"));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        assert!(create_png_indexed(2, 2, &[(0, 0, 0, 255)], &[0]).is_err());
        assert!(create_png_indexed(1, 1, &[], &[0]).is_err());
    }

    #[test]
    fn test_index_outside_palette_rejected() {
        let palette = [(0, 0, 0, 255), (255, 255, 255, 255)];
        assert!(create_png_indexed(2, 1, &palette, &[0, 2]).is_err());
    }

    #[test]
    fn test_scanlines_carry_filter_byte() {
        let compressed = deflate_scanlines(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        let mut raw = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, vec![0, 1, 2, 3, 0, 4, 5, 6]);
    }

    #[test]
    fn test_chunk_crc() {
        let mut png = Vec::new();
        write_chunk(&mut png, b"IEND", &[]);
        // Well-known CRC of an empty IEND chunk
        assert_eq!(&png[8..12], &[0xAE, 0x42, 0x60, 0x82]);
    }
}
