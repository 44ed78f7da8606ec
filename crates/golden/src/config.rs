//! Run configuration, built once at the entry point and passed down

use std::path::PathBuf;

use golden_core::{error::Result, traits::FontResolver};
use golden_export::GoldenStore;
use golden_fontdb::{resolver::FC_MATCH, FcMatchResolver, ResolvedFonts, MONOSPACE, SERIF};

/// Where goldens go when nothing else is asked for, relative to the project root
pub const DEFAULT_GOLDEN_DIR: &str = "assets/test/golden";

/// Directory under the system temp dir that receives preview copies
pub const PREVIEW_DIR_NAME: &str = "msdf_tests";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenConfig {
    /// Directory holding `<name>.png`, created on first write
    pub golden_dir: PathBuf,
    /// Scratch directory for `--preview` copies
    pub preview_dir: PathBuf,
    pub mono_family: String,
    pub serif_family: String,
    /// Program answering `<program> <family> --format=%{file}`
    pub font_matcher: String,
}

impl GoldenConfig {
    /// The host font matcher this configuration names
    pub fn resolver(&self) -> FcMatchResolver {
        FcMatchResolver::with_program(&self.font_matcher)
    }

    /// Resolves the configured mono and serif families, mono first
    ///
    /// Touches nothing on disk, so a failure here leaves the golden
    /// directory exactly as it was.
    pub fn resolve_fonts(&self, resolver: &dyn FontResolver) -> Result<ResolvedFonts> {
        ResolvedFonts::resolve_families(resolver, &self.mono_family, &self.serif_family)
    }

    pub fn store(&self) -> GoldenStore {
        GoldenStore::new(&self.golden_dir, &self.preview_dir)
    }
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            golden_dir: PathBuf::from(DEFAULT_GOLDEN_DIR),
            preview_dir: std::env::temp_dir().join(PREVIEW_DIR_NAME),
            mono_family: MONOSPACE.to_string(),
            serif_family: SERIF.to_string(),
            font_matcher: FC_MATCH.to_string(),
        }
    }
}
