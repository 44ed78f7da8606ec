//! Pure Rust text shaping backend using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz. Goldens rely on it for the
//! parts of layout a reference rasterizer is trusted with: cmap lookup,
//! default OpenType features and pair kerning. No custom layout happens
//! on top of what it returns.

use std::sync::Arc;

use harfrust::{Direction as HrDirection, FontRef as HrFontRef, GlyphBuffer, ShaperData, UnicodeBuffer};

use golden_core::{
    error::{RenderError, Result},
    traits::{FontRef, Shaper},
    types::{PositionedGlyph, ShapingResult},
    ShapingParams,
};

/// Left-to-right shaping powered by harfrust
#[derive(Debug, Default)]
pub struct HarfrustShaper;

impl HarfrustShaper {
    pub fn new() -> Self {
        Self
    }

    /// Scale harfrust's font-unit positions into pixels
    fn extract_glyphs(buffer: &GlyphBuffer, ppem: f32, upem: u16) -> (Vec<PositionedGlyph>, f32) {
        let mut glyphs = Vec::with_capacity(buffer.len());
        let mut pen_x = 0.0;
        let scale = ppem / upem as f32;

        for (info, pos) in buffer.glyph_infos().iter().zip(buffer.glyph_positions()) {
            glyphs.push(PositionedGlyph {
                id: info.glyph_id,
                x: pen_x + pos.x_offset as f32 * scale,
                y: pos.y_offset as f32 * scale,
                advance: pos.x_advance as f32 * scale,
                cluster: info.cluster,
            });

            pen_x += pos.x_advance as f32 * scale;
        }

        (glyphs, pen_x)
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "harfrust"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult> {
        if text.is_empty() {
            return Ok(ShapingResult {
                glyphs: Vec::new(),
                advance_width: 0.0,
                size: params.size,
            });
        }

        let hr_font = HrFontRef::from_index(font.data(), font.face_index())
            .map_err(|_| RenderError::InvalidFont)?;

        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data
            .shaper(&hr_font)
            .point_size(Some(params.size))
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(HrDirection::LeftToRight);

        // Default features only: kern, liga and friends stay on
        let output = shaper.shape(buffer, &[]);
        let (glyphs, advance_width) =
            Self::extract_glyphs(&output, params.size, font.units_per_em());

        log::debug!(
            "Shaped {:?} into {} glyphs, advance {:.2}px",
            text,
            glyphs.len(),
            advance_width
        );

        Ok(ShapingResult {
            glyphs,
            advance_width,
            size: params.size,
        })
    }
}
