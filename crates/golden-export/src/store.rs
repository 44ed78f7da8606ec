//! Where goldens live on disk
//!
//! One PNG per spec at `<golden_dir>/<name>.png`. That path is the whole
//! contract with the comparison harness, which looks references up by name.
//! Files are always replaced wholesale: encode in memory, write a sibling
//! temporary file, rename it over the target.

use std::fs;
use std::path::{Path, PathBuf};

use golden_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::GoldenImage,
};

use crate::png::PngExporter;

/// Suffix of preview copies, naming the rasterizer family they came from
pub const PREVIEW_SUFFIX: &str = "_freetype";

/// The golden directory plus the scratch preview directory
pub struct GoldenStore {
    golden_dir: PathBuf,
    preview_dir: PathBuf,
    exporter: PngExporter,
}

impl GoldenStore {
    pub fn new(golden_dir: impl Into<PathBuf>, preview_dir: impl Into<PathBuf>) -> Self {
        Self {
            golden_dir: golden_dir.into(),
            preview_dir: preview_dir.into(),
            exporter: PngExporter::new(),
        }
    }

    pub fn golden_dir(&self) -> &Path {
        &self.golden_dir
    }

    /// Canonical path of the golden called `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.golden_dir
            .join(format!("{}.{}", name, self.exporter.extension()))
    }

    /// Scratch path of the preview copy of `name`
    pub fn preview_path_for(&self, name: &str) -> PathBuf {
        self.preview_dir.join(format!(
            "{}{}.{}",
            name,
            PREVIEW_SUFFIX,
            self.exporter.extension()
        ))
    }

    /// Whether a golden called `name` is currently on disk
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Writes `image` as the golden called `name`, replacing any previous file
    pub fn persist(&self, name: &str, image: &GoldenImage) -> Result<PathBuf> {
        let path = self.path_for(name);
        self.write(&self.golden_dir, &path, image)?;
        log::debug!("Persisted {} ({}x{})", path.display(), image.width, image.height);
        Ok(path)
    }

    /// Writes a throwaway copy of `image` for manual inspection
    pub fn preview(&self, name: &str, image: &GoldenImage) -> Result<PathBuf> {
        let path = self.preview_path_for(name);
        self.write(&self.preview_dir, &path, image)?;
        Ok(path)
    }

    fn write(&self, dir: &Path, path: &Path, image: &GoldenImage) -> Result<()> {
        fs::create_dir_all(dir)?;
        let bytes = self.exporter.export(image)?;
        write_atomic(path, &bytes)
    }
}

/// Replace `path` with `bytes` so readers see the old file or the new one
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let write_failed = |source| ExportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, bytes).map_err(write_failed)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_failed(source).into());
    }
    Ok(())
}
