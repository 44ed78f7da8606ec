//! Where golden fonts come from: resolution and loading
//!
//! Two jobs live here. [`resolver`] turns a logical family into a file path
//! through the host's font matcher, once per run. [`Font`] and
//! [`FontDatabase`] read that file into memory when a spec is rendered.
//!
//! A resolved path that does not exist is tolerated at resolution time and
//! only fails here, as a [`FontLoadError::FileNotFound`].

pub mod resolver;

pub use resolver::{FcMatchResolver, FixedResolver, ResolvedFonts, MONOSPACE, SERIF};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use golden_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
};

/// A font file held in memory
///
/// Stores the raw bytes and parses on demand, so the same data can back
/// shaping and outline extraction without leaking borrowed tables.
pub struct Font {
    path: PathBuf,
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl Font {
    /// Reads and validates the first face of a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Reads and validates one face of a font file or collection
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            log::debug!("Reading {} failed: {}", path.display(), e);
            FontLoadError::FileNotFound(path.to_path_buf())
        })?;

        Self::from_data_index(path, data, face_index)
    }

    /// Validates bytes that were read from `path`
    pub fn from_data_index(path: impl Into<PathBuf>, data: Vec<u8>, face_index: u32) -> Result<Self> {
        let path = path.into();
        let font_ref = ReadFontRef::from_index(&data, face_index)
            .map_err(|_| FontLoadError::InvalidData(path.clone()))?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(Font {
            path,
            data,
            face_index,
            units_per_em,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}

/// Fonts loaded during one run, keyed by path
///
/// Most specs share the monospace font, so each file is read once.
#[derive(Default)]
pub struct FontDatabase {
    path_cache: HashMap<PathBuf, Arc<Font>>,
}

impl FontDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a font file, or returns the copy loaded earlier
    pub fn load_font(&mut self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();

        // Canonical paths dedupe symlinked aliases; missing files keep their name
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(font) = self.path_cache.get(&cache_key) {
            return Ok(font.clone());
        }

        let font = Arc::new(Font::from_file(path)?);
        log::debug!(
            "Loaded {} ({} bytes, upem {})",
            path.display(),
            font.data.len(),
            font.units_per_em
        );
        self.path_cache.insert(cache_key, font.clone());
        Ok(font)
    }

    pub fn font_count(&self) -> usize {
        self.path_cache.len()
    }
}
