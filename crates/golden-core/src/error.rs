//! Error types for golden image generation

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GoldenError>;

/// Main error type for golden generation
///
/// Every variant is fatal for the run. The one advisory condition, a
/// resolved font path that does not exist, is logged rather than returned.
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("Font resolution failed: {0}")]
    FontResolution(#[from] ResolutionError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid golden spec: {0}")]
    InvalidSpec(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoldenError {
    /// Exit status reported by a failed font-matching query, if any
    pub fn query_exit_code(&self) -> Option<i32> {
        match self {
            GoldenError::FontResolution(ResolutionError::QueryFailed { code, .. }) => *code,
            _ => None,
        }
    }
}

/// The external font-matching query could not produce a path
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("could not run font matcher `{program}` for {family:?}: {source}")]
    Spawn {
        program: String,
        family: String,
        #[source]
        source: std::io::Error,
    },

    #[error("font matcher `{program}` failed for {family:?} (status {}): {stderr}", status_label(.code))]
    QueryFailed {
        program: String,
        family: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("font matcher returned no path for {0:?}")]
    EmptyMatch(String),

    #[error("no fixed font registered for {0:?}")]
    UnknownFamily(String),
}

fn status_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "killed by signal".to_string(),
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid font data in {}", .0.display())]
    InvalidData(PathBuf),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),

    #[error("Pixmap creation failed for {width}x{height}")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Invalid font data")]
    InvalidFont,

    #[error("Hinting setup failed: {0}")]
    HintingFailed(String),

    #[error("Outline extraction failed for glyph {0}")]
    OutlineExtractionFailed(u32),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write to {} failed: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
