//! The data that flows from the spec table to the PNG on disk

use std::path::{Path, PathBuf};

use crate::error::{GoldenError, Result};

/// Unique identifier for a glyph within a font
pub type GlyphId = u32;

/// Default horizontal text origin in pixels
pub const DEFAULT_LEFT: i32 = 10;

/// Default vertical text origin in pixels
pub const DEFAULT_TOP: i32 = 10;

/// A font file resolved from a logical family name
///
/// The path is whatever the resolver reported. It is not guaranteed to
/// exist: a missing file only fails later, when the font is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontReference {
    pub family: String,
    pub path: PathBuf,
}

impl FontReference {
    pub fn new(family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            path: path.into(),
        }
    }

    /// Whether the resolved path points at a regular file
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Declarative description of one golden image
///
/// `name`, `text`, `font_size`, `width` and `height` are shared with the
/// downstream comparison harness and must not drift from its test table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenSpec {
    pub name: String,
    pub text: String,
    /// Pixel size of the em square
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
    pub font_path: PathBuf,
    pub left: i32,
    pub top: i32,
}

impl GoldenSpec {
    /// Creates a spec drawn at the default origin `(10, 10)`
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        font_size: u32,
        width: u32,
        height: u32,
        font: &FontReference,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            font_size,
            width,
            height,
            font_path: font.path.clone(),
            left: DEFAULT_LEFT,
            top: DEFAULT_TOP,
        }
    }

    /// Moves the text origin
    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Output file name, `{name}.png`
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Checks the per-spec invariants: non-empty name, positive sizes
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(GoldenError::InvalidSpec("spec name is empty".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GoldenError::InvalidSpec(format!(
                "{}: canvas must be non-empty, got {}x{}",
                self.name, self.width, self.height
            )));
        }
        if self.font_size == 0 {
            return Err(GoldenError::InvalidSpec(format!(
                "{}: font size must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black, the canvas background of every golden
    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    /// Opaque white, the text color of every golden
    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A fixed-size straight-alpha RGBA8 raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenImage {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels, four bytes each
    pub data: Vec<u8>,
}

impl GoldenImage {
    /// A canvas of `width` x `height` filled with `color`
    pub fn new_filled(width: u32, height: u32, color: Color) -> Self {
        let pixels = width as usize * height as usize;
        let data = color.to_array().repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw RGBA8 bytes, checking the buffer matches the dimensions
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GoldenError::InvalidSpec(format!(
                "RGBA buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at `(x, y)`, or None outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Color::rgba(px[0], px[1], px[2], px[3]))
    }
}

/// A glyph placed in pixel space, relative to the text origin
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedGlyph {
    pub id: GlyphId,
    /// Pen position plus offset, in pixels from the origin
    pub x: f32,
    /// Vertical offset from the baseline in pixels, y-up
    pub y: f32,
    pub advance: f32,
    pub cluster: u32,
}

/// What the shaper hands to the renderer
#[derive(Debug, Clone, Default)]
pub struct ShapingResult {
    pub glyphs: Vec<PositionedGlyph>,
    pub advance_width: f32,
    /// Pixel size the glyphs were positioned for
    pub size: f32,
}
