//! The seams between the generator and the outside world
//!
//! - [`FontResolver`] - logical family name to font file
//! - [`FontRef`] - raw font data once loaded
//! - [`Shaper`] - text to positioned glyphs
//! - [`Renderer`] - positioned glyphs to a fixed-size raster
//! - [`Exporter`] - raster to file bytes

use std::sync::Arc;

use crate::{
    error::Result,
    types::{FontReference, GoldenImage, ShapingResult},
    RenderParams, ShapingParams,
};

/// Maps a logical family ("monospace", "serif") to a font file
///
/// The host implementation shells out to the font-matching utility; tests
/// substitute a resolver returning fixed paths.
pub trait FontResolver {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// Resolve `family` to a font file
    ///
    /// A query that cannot run or fails is an error. A query that succeeds
    /// with a path that does not exist is not: the reference is returned and
    /// loading it fails later.
    fn resolve(&self, family: &str) -> Result<FontReference>;
}

/// Loaded font bytes plus the little metadata shaping needs
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// Face index inside a collection, 0 for single fonts
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's design grid size
    fn units_per_em(&self) -> u16;
}

/// Turns a string into glyphs positioned in pixels
pub trait Shaper: Send + Sync {
    fn name(&self) -> &'static str;

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult>;
}

/// Rasterizes shaped glyphs onto a canvas of fixed size
pub trait Renderer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Always returns an image of exactly `params.width` x `params.height`
    fn render(
        &self,
        shaped: &ShapingResult,
        font: Arc<dyn FontRef>,
        params: &RenderParams,
    ) -> Result<GoldenImage>;
}

/// Encodes a raster into file bytes
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    fn export(&self, image: &GoldenImage) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;
}
