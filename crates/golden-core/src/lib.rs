//! Golden Core: the shared vocabulary of the golden image generator
//!
//! A golden image is a trusted reference raster of a short string, drawn by a
//! reference rasterizer, that an independent renderer is compared against.
//! This crate holds the data model and the traits every stage implements:
//!
//! 1. **Font resolution** - a family name becomes a [`types::FontReference`]
//! 2. **Shaping** - text becomes positioned glyphs
//! 3. **Rendering** - glyphs become a fixed-size [`types::GoldenImage`]
//! 4. **Export** - the image becomes PNG bytes on disk
//!
//! The stages live in sibling crates; this one only fixes the contracts.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{GoldenError, Result};
pub use traits::{Exporter, FontRef, FontResolver, Renderer, Shaper};
pub use types::{Color, FontReference, GoldenImage, GoldenSpec};

/// How text gets shaped
#[derive(Debug, Clone, PartialEq)]
pub struct ShapingParams {
    /// Pixels per em
    pub size: f32,
}

impl Default for ShapingParams {
    fn default() -> Self {
        Self {
            size: 16.0,
        }
    }
}

/// How shaped glyphs land on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    /// Pixels per em
    pub size: f32,
    pub width: u32,
    pub height: u32,
    /// Left edge of the text origin
    pub left: i32,
    /// Ascender line of the text origin
    pub top: i32,
    pub foreground: Color,
    pub background: Color,
    /// Grid-fit outlines and advances to whole pixels
    pub hinting: bool,
}

impl RenderParams {
    /// Parameters fixed by the golden contract for `spec`
    pub fn for_spec(spec: &GoldenSpec) -> Self {
        Self {
            size: spec.font_size as f32,
            width: spec.width,
            height: spec.height,
            left: spec.left,
            top: spec.top,
            ..Self::default()
        }
    }
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: 16.0,
            width: 100,
            height: 50,
            left: types::DEFAULT_LEFT,
            top: types::DEFAULT_TOP,
            foreground: Color::white(),
            background: Color::black(),
            hinting: true,
        }
    }
}
