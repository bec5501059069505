//! The scene document: ordered elements, selection, canvas dimensions, zoom.

use serde::{Deserialize, Serialize};

use crate::{Element, ElementId};

/// Default canvas width (YouTube thumbnail preset).
pub const DEFAULT_CANVAS_WIDTH: u32 = 1280;

/// Default canvas height.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;

/// Default view zoom at editor start.
pub const DEFAULT_ZOOM: f32 = 0.5;

/// Lower zoom clamp.
pub const ZOOM_MIN: f32 = 0.1;

/// Upper zoom clamp.
pub const ZOOM_MAX: f32 = 4.0;

/// A scene holding the ordered element collection and view state.
///
/// Element order is paint order: index 0 is the bottom of the stack.
/// `selected` keeps insertion order; its first entry is the primary
/// selection used for single-element property editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Canvas width in canvas units.
    pub canvas_width: u32,
    /// Canvas height in canvas units.
    pub canvas_height: u32,
    /// Elements in paint order, bottom first.
    pub elements: Vec<Element>,
    /// Selected element ids in selection order.
    selected: Vec<ElementId>,
    /// View scale factor, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    zoom: f32,
}

impl Scene {
    /// Create an empty scene with the given canvas size.
    #[must_use]
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            elements: Vec::new(),
            selected: Vec::new(),
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Get an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Get a mutable reference to an element by id.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Position of an element in the paint order.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Iterate elements in paint order, bottom first.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Iterate visible elements in paint order.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.visible)
    }

    /// Number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost visible, unlocked element containing the canvas-space point.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|el| el.visible && !el.locked && el.contains_point(x, y))
            .map(|el| el.id)
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    /// The primary selected element, conventionally the first selected.
    #[must_use]
    pub fn primary_selected(&self) -> Option<&Element> {
        self.selected.first().and_then(|&id| self.element(id))
    }

    /// Check whether an element is selected.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the selection wholesale.
    pub(crate) fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.selected = ids;
    }

    /// Append an id to the selection; re-adding is a no-op, not a toggle.
    pub(crate) fn add_to_selection(&mut self, id: ElementId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Drop the given ids from the selection, keeping order.
    pub(crate) fn remove_from_selection(&mut self, ids: &[ElementId]) {
        self.selected.retain(|id| !ids.contains(id));
    }

    /// Drop selected ids that no longer resolve to an element.
    ///
    /// Called after a history restore, where the snapshot may predate
    /// elements that were selected at the time of the undo.
    pub(crate) fn prune_selection(&mut self) {
        let elements = &self.elements;
        self.selected
            .retain(|id| elements.iter().any(|el| el.id == *id));
    }

    /// Current view zoom.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the view zoom, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
