//! # Coverdeck Core
//!
//! The document model and edit-history engine for the cover editor: a
//! scene of primitive visual elements (text, rectangles, circles, images)
//! on a fixed-size canvas, with selection, transform gestures, linear
//! undo/redo, and the persisted/clipboard interchange formats.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                cover-core                   │
//! ├──────────────────────┬──────────────────────┤
//! │  Editor store        │  Interaction         │
//! │  - Scene (elements,  │  - Pointer gestures  │
//! │    selection, zoom)  │  - Resize handles    │
//! │  - History snapshots │  - Text editing      │
//! ├──────────────────────┴──────────────────────┤
//! │  Interchange: ProjectDocument, Clipboard    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All mutation goes through the [`Editor`] operation set; every settled
//! operation passes through the history commit path, so the live element
//! collection always equals the snapshot at the history cursor.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clipboard;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod interaction;
pub mod scene;
pub mod schema;

pub use clipboard::Clipboard;
pub use editor::{Editor, DUPLICATE_OFFSET};
pub use element::{
    Element, ElementId, ElementKind, FontStyle, Gradient, GradientKind, Paint, Shadow, TextAlign,
    MIN_ELEMENT_SIZE,
};
pub use error::{CoreError, CoreResult};
pub use event::{Key, KeyModifiers, PointerEvent};
pub use history::History;
pub use interaction::{Controller, ResizeHandle, TextEditSession, Tool};
pub use scene::{Scene, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, ZOOM_MAX, ZOOM_MIN};
pub use schema::ProjectDocument;

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
