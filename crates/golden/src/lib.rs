//! Golden: reference rasters of short strings for visual-regression tests
//!
//! A run has three steps, each owned by one type:
//!
//! 1. [`GoldenConfig::resolve_fonts`] asks the host font matcher for the
//!    monospace and serif files, once
//! 2. [`SpecTable::standard`] pins those fonts into the versioned table and
//!    [`SpecTable::select`] narrows it by name
//! 3. [`GoldenGenerator`] renders each selected spec and writes
//!    `<golden_dir>/<name>.png`
//!
//! ```ignore
//! use golden::{GoldenConfig, GoldenGenerator, SpecTable};
//!
//! let config = GoldenConfig::default();
//! let fonts = config.resolve_fonts(&config.resolver())?;
//! let table = SpecTable::standard(&fonts);
//! let generator = GoldenGenerator::from_config(&config);
//! generator.generate(table.select(&["mono"]), false)?;
//! ```
//!
//! The comparison harness downstream looks goldens up strictly by name, so
//! the table is the contract and everything else is replaceable.

pub mod config;
pub mod generator;
pub mod table;

pub use config::GoldenConfig;
pub use generator::{GeneratedGolden, GoldenGenerator, ListedGolden};
pub use table::{select_specs, SpecTable};

pub use golden_core::{error, traits, Color, GoldenError, GoldenImage, GoldenSpec, Result};
pub use golden_export::GoldenStore;
pub use golden_fontdb::{FcMatchResolver, FixedResolver, ResolvedFonts};

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{select_specs, GoldenConfig, GoldenGenerator, SpecTable};
    pub use golden_core::{
        error::{GoldenError, Result},
        traits::{FontResolver, Renderer, Shaper},
        types::{FontReference, GoldenImage, GoldenSpec},
    };
    pub use golden_fontdb::ResolvedFonts;
}
