//! Export module for golden images
//!
//! [`png`] turns a raster into PNG bytes; [`store`] decides where those
//! bytes go and makes sure they land whole.

pub mod png;
pub mod store;

pub use png::{encode_png, PngExporter};
pub use store::{GoldenStore, PREVIEW_SUFFIX};
