//! PNG export format
//!
//! Encodes golden images as 8-bit RGBA PNGs using the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use golden_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::GoldenImage,
};

/// Encode a golden image to PNG bytes.
///
/// Compression and filter settings are pinned so that the same pixels
/// always produce the same file.
pub fn encode_png(image: &GoldenImage) -> Result<Vec<u8>> {
    let expected_size = image.width as usize * image.height as usize * 4;
    if image.data.len() != expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{} RGBA, got {}",
            expected_size,
            image.width,
            image.height,
            image.data.len()
        ))
        .into());
    }

    let img: RgbaImage = ImageBuffer::from_raw(image.width, image.height, image.data.clone())
        .ok_or_else(|| {
            ExportError::EncodingFailed("Failed to create image buffer from RGBA data".into())
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), image.width, image.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for golden images
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, image: &GoldenImage) -> Result<Vec<u8>> {
        encode_png(image)
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
