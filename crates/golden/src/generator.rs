//! Turning specs into goldens on disk
//!
//! Each spec is handled on its own: load its font, shape its text, rasterize
//! onto its fixed canvas, write the PNG. The first failure ends the run, and
//! goldens finished before it stay as written.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use golden_core::{
    error::Result,
    traits::{FontRef, Renderer, Shaper},
    types::{GoldenImage, GoldenSpec},
    RenderParams, ShapingParams,
};
use golden_export::GoldenStore;
use golden_fontdb::FontDatabase;
use golden_render_skia::SkiaRenderer;
use golden_shape_hr::HarfrustShaper;

use crate::config::GoldenConfig;

/// One golden written by [`GoldenGenerator::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGolden {
    pub name: String,
    pub text: String,
    pub font_size: u32,
    pub path: PathBuf,
    /// Scratch copy, when previews were requested
    pub preview: Option<PathBuf>,
}

/// One row of [`GoldenGenerator::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedGolden {
    pub name: String,
    pub text: String,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
    /// Whether `<golden_dir>/<name>.png` is on disk right now
    pub exists: bool,
}

/// Renders and persists goldens
///
/// Shaping and rasterization go through the core traits, so tests can swap
/// either backend. Fonts are read once per path for the generator's lifetime;
/// runs are sequential, so the cache lives in a plain `RefCell`.
pub struct GoldenGenerator {
    shaper: Arc<dyn Shaper>,
    renderer: Arc<dyn Renderer>,
    fonts: RefCell<FontDatabase>,
    store: GoldenStore,
}

impl GoldenGenerator {
    /// A generator with the reference backends, writing into `store`
    pub fn new(store: GoldenStore) -> Self {
        Self {
            shaper: Arc::new(HarfrustShaper::new()),
            renderer: Arc::new(SkiaRenderer::new()),
            fonts: RefCell::new(FontDatabase::new()),
            store,
        }
    }

    pub fn from_config(config: &GoldenConfig) -> Self {
        Self::new(config.store())
    }

    /// Replace the shaping backend
    pub fn with_shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = shaper;
        self
    }

    /// Replace the rasterizer
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn store(&self) -> &GoldenStore {
        &self.store
    }

    /// Rasterizes `spec` onto a fresh canvas of exactly its size
    pub fn render(&self, spec: &GoldenSpec) -> Result<GoldenImage> {
        spec.validate()?;

        let font: Arc<dyn FontRef> = self.fonts.borrow_mut().load_font(spec.font_path())?;

        let shaping = ShapingParams {
            size: spec.font_size as f32,
        };
        let shaped = self.shaper.shape(&spec.text, font.clone(), &shaping)?;

        log::debug!(
            "{}: shaped {:?} into {} glyphs with {}",
            spec.name,
            spec.text,
            shaped.glyphs.len(),
            self.shaper.name()
        );

        self.renderer
            .render(&shaped, font, &RenderParams::for_spec(spec))
    }

    /// Writes `image` as the golden called `name`, overwriting unconditionally
    pub fn persist(&self, name: &str, image: &GoldenImage) -> Result<PathBuf> {
        self.store.persist(name, image)
    }

    /// Renders and persists every spec in order, stopping at the first error
    pub fn generate<'a>(
        &self,
        specs: impl IntoIterator<Item = &'a GoldenSpec>,
        preview: bool,
    ) -> Result<Vec<GeneratedGolden>> {
        let mut generated = Vec::new();

        for spec in specs {
            let image = self.render(spec)?;
            let path = self.persist(&spec.name, &image)?;
            let preview = if preview {
                Some(self.store.preview(&spec.name, &image)?)
            } else {
                None
            };

            log::info!("Generated {}", path.display());
            generated.push(GeneratedGolden {
                name: spec.name.clone(),
                text: spec.text.clone(),
                font_size: spec.font_size,
                path,
                preview,
            });
        }

        Ok(generated)
    }

    /// Describes `specs` and whether each golden exists, without rendering
    pub fn list<'a>(&self, specs: impl IntoIterator<Item = &'a GoldenSpec>) -> Vec<ListedGolden> {
        specs
            .into_iter()
            .map(|spec| ListedGolden {
                name: spec.name.clone(),
                text: spec.text.clone(),
                font_size: spec.font_size,
                width: spec.width,
                height: spec.height,
                exists: self.store.exists(&spec.name),
            })
            .collect()
    }

    /// Number of distinct font files read so far
    pub fn loaded_fonts(&self) -> usize {
        self.fonts.borrow().font_count()
    }
}
