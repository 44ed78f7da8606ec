//! Skia Renderer - the reference rasterizer behind every golden
//!
//! Glyph outlines come from skrifa, hinted at the exact pixel size, and are
//! filled by tiny-skia with antialiasing onto a canvas whose size is fixed by
//! the golden. Whatever this produces for a given font, size and string is the
//! ground truth a golden captures, so the renderer does as little as it can:
//!
//! - the canvas is cleared to the background and never resized
//! - `(left, top)` anchors the text at its left edge and ascender line
//! - unhinted, glyphs land exactly where the shaper put them
//! - hinted, the pen walks whole pixels by each glyph's hinted advance, with
//!   the shaper's kerning rounded on top, so a monospace run keeps one pitch
//! - ink outside the canvas is clipped

use std::sync::Arc;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{
    DrawSettings, Engine as HintEngine, HintingInstance, HintingOptions, OutlinePen,
    SmoothMode as HintSmoothMode, Target as HintTarget,
};
use skrifa::{GlyphId, MetadataProvider};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use golden_core::{
    error::{RenderError, Result},
    traits::{FontRef, Renderer},
    types::{GoldenImage, PositionedGlyph, ShapingResult},
    Color, RenderParams,
};

// Grayscale hinting close to FreeType's default load flags: native
// instructions where present, the autohinter otherwise
const HINTING_OPTIONS: HintingOptions = HintingOptions {
    engine: HintEngine::AutoFallback,
    target: HintTarget::Smooth {
        mode: HintSmoothMode::Normal,
        symmetric_rendering: true,
        preserve_linear_metrics: false,
    },
};

/// tiny-skia powered renderer for golden canvases
pub struct SkiaRenderer {
    /// Largest canvas edge accepted, to keep a typo from allocating gigabytes
    max_size: u32,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { max_size: 16384 }
    }

    fn check_params(&self, params: &RenderParams) -> Result<()> {
        let RenderParams { width, height, .. } = *params;
        if width == 0 || height == 0 || width > self.max_size || height > self.max_size {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }
        if !params.size.is_finite() || params.size <= 0.0 {
            return Err(RenderError::InvalidFontSize(params.size).into());
        }
        Ok(())
    }

    /// Baseline row for a left/ascender anchor at `top`
    ///
    /// The ascender is rounded up to a whole pixel, as FreeType does for
    /// scaled size metrics.
    fn baseline(top: i32, ascent: f32) -> f32 {
        top as f32 + ascent.ceil()
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SkiaRenderer {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn render(
        &self,
        shaped: &ShapingResult,
        font: Arc<dyn FontRef>,
        params: &RenderParams,
    ) -> Result<GoldenImage> {
        self.check_params(params)?;

        let (width, height) = (params.width, params.height);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::PixmapCreationFailed { width, height })?;
        pixmap.fill(skia_color(params.background));

        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| RenderError::InvalidFont)?;
        let size = Size::new(params.size);
        let location = LocationRef::default();
        let outlines = font_ref.outline_glyphs();

        let hinting = if params.hinting {
            let instance = HintingInstance::new(&outlines, size, location, HINTING_OPTIONS)
                .map_err(|e| RenderError::HintingFailed(format!("{e:?}")))?;
            Some(instance)
        } else {
            None
        };

        let ascent = font_ref.metrics(size, location).ascent;
        let baseline_y = Self::baseline(params.top, ascent);

        let mut paint = Paint::default();
        let fg = params.foreground;
        paint.set_color_rgba8(fg.r, fg.g, fg.b, fg.a);
        paint.anti_alias = true;

        log::debug!(
            "Skia: {} glyphs at {}px on {}x{}, origin=({}, {}), baseline={}",
            shaped.glyphs.len(),
            params.size,
            width,
            height,
            params.left,
            params.top,
            baseline_y
        );

        let glyph_metrics = font_ref.glyph_metrics(size, location);
        let mut grid = GridLayout::default();

        for glyph in &shaped.glyphs {
            let gid = GlyphId::new(glyph.id);
            let linear_advance = glyph_metrics.advance_width(gid).unwrap_or(glyph.advance);

            // Font outlines are y-up, the canvas is y-down
            let (origin_x, origin_y) = if hinting.is_some() {
                (
                    params.left as f32 + grid.origin(glyph),
                    baseline_y - glyph.y.round(),
                )
            } else {
                (params.left as f32 + glyph.x, baseline_y - glyph.y)
            };

            let mut hinted_advance = linear_advance;
            match outlines.get(gid) {
                Some(outline) => {
                    let settings = match &hinting {
                        Some(instance) => DrawSettings::hinted(instance, false),
                        None => DrawSettings::unhinted(size, location),
                    };

                    let mut pen = TinySkiaPathPen::new();
                    let adjusted = outline
                        .draw(settings, &mut pen)
                        .map_err(|_| RenderError::OutlineExtractionFailed(glyph.id))?;
                    if let Some(advance) = adjusted.advance_width {
                        hinted_advance = advance;
                    }

                    // Blank glyphs (space) have no contours
                    if let Some(path) = pen.finish() {
                        let transform =
                            Transform::from_scale(1.0, -1.0).post_translate(origin_x, origin_y);
                        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                    }
                },
                None => log::warn!("Skia: glyph {} has no outline, skipping", glyph.id),
            }

            grid.advance(glyph, linear_advance, hinted_advance);
        }

        GoldenImage::from_rgba(width, height, demultiply(&pixmap))
    }
}

/// Horizontal pen on the pixel grid, the way FreeType lays out hinted text
///
/// Each step is the hinted advance rounded to whole pixels plus the shaper's
/// kerning (its advance minus the font's linear advance), also rounded.
/// Per-glyph offsets from the shaper ride on top of the whole-pixel pen.
#[derive(Debug, Default)]
struct GridLayout {
    pen: f32,
    /// Where the shaper's own pen stands
    shaped_pen: f32,
}

impl GridLayout {
    fn origin(&self, glyph: &PositionedGlyph) -> f32 {
        self.pen + (glyph.x - self.shaped_pen).round()
    }

    fn advance(&mut self, glyph: &PositionedGlyph, linear_advance: f32, hinted_advance: f32) {
        let kerning = glyph.advance - linear_advance;
        self.pen += hinted_advance.round() + kerning.round();
        self.shaped_pen += glyph.advance;
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Straight-alpha RGBA8 bytes from tiny-skia's premultiplied pixels
fn demultiply(pixmap: &Pixmap) -> Vec<u8> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    data
}

/// Feeds skrifa outline commands straight into a tiny-skia path
struct TinySkiaPathPen {
    builder: PathBuilder,
}

impl TinySkiaPathPen {
    fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlinePen for TinySkiaPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.builder.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
