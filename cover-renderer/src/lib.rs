//! # Coverdeck Renderer
//!
//! Deterministic export of cover scenes to raster and vector formats.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │   Scene ──► SVG document (svg module)       │
//! │               │                             │
//! │               ├──► SVG bytes (vector out)   │
//! │               └──► usvg/resvg/tiny-skia     │
//! │                      │                      │
//! │                      ├──► PNG (transparent) │
//! │                      └──► JPEG (composited) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The renderer is a pure function of scene state: it never mutates
//! elements, and an identical scene yields byte-identical output.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image_ref;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{CoverExporter, ExportConfig, ExportFormat};
pub use svg::scene_to_svg;

/// Renderer crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
