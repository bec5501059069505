//! The editor store: a [`Scene`] with its [`History`], mutated only through
//! the operation set here.
//!
//! Every operation is atomic. Constraint violations (unknown ids, zero
//! dimensions, out-of-range indices) are silent no-ops with a debug-level
//! diagnostic; the editor never panics on malformed interaction.

use crate::element::{Element, ElementId};
use crate::history::History;
use crate::scene::Scene;

/// Offset applied to duplicated and pasted elements, in canvas units.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Scene plus history, the single source of truth for the document.
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    history: History,
}

impl Editor {
    /// Create an editor with the default empty scene.
    #[must_use]
    pub fn new() -> Self {
        let scene = Scene::default();
        let history = History::new(&scene.elements);
        Self { scene, history }
    }

    /// Create an editor around an existing scene, seeding history with it.
    #[must_use]
    pub fn with_scene(scene: Scene) -> Self {
        let history = History::new(&scene.elements);
        Self { scene, history }
    }

    /// Read access to the scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Read access to the history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.scene.element(id)
    }

    // -----------------------------------------------------------------------
    // Document operations
    // -----------------------------------------------------------------------

    /// Replace the canvas dimensions. Elements are not repositioned or
    /// rescaled. Zero dimensions are rejected. Not undoable.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!("rejected canvas size {width}x{height}");
            return;
        }
        self.scene.canvas_width = width;
        self.scene.canvas_height = height;
    }

    /// Add a single element on top of the stack.
    ///
    /// The element is always given a fresh id (incoming ids are never
    /// trusted), becomes the sole selection, and the change is committed.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        element.id = ElementId::new();
        element.clamp_constraints();
        let id = element.id;
        self.scene.elements.push(element);
        self.scene.set_selection(vec![id]);
        self.commit();
        id
    }

    /// Add a batch of elements in input order, as one history entry.
    ///
    /// All elements get fresh ids and together become the new selection.
    pub fn add_elements(&mut self, elements: Vec<Element>) -> Vec<ElementId> {
        if elements.is_empty() {
            return Vec::new();
        }
        let mut ids = Vec::with_capacity(elements.len());
        for mut element in elements {
            element.id = ElementId::new();
            element.clamp_constraints();
            ids.push(element.id);
            self.scene.elements.push(element);
        }
        self.scene.set_selection(ids.clone());
        self.commit();
        ids
    }

    /// Merge a property update into one element and commit.
    ///
    /// Unknown ids are a no-op. Extents and opacity are re-clamped after the
    /// closure runs. Locked elements accept direct updates; only pointer
    /// gestures are rejected for them.
    pub fn update_element<F>(&mut self, id: ElementId, f: F)
    where
        F: FnOnce(&mut Element),
    {
        if !self.apply_update(id, f) {
            return;
        }
        self.commit();
    }

    /// Merge a property update without committing history.
    ///
    /// Used by in-progress drag gestures; callers settle the gesture with
    /// [`Editor::commit`] on release.
    pub fn update_element_transient<F>(&mut self, id: ElementId, f: F)
    where
        F: FnOnce(&mut Element),
    {
        self.apply_update(id, f);
    }

    fn apply_update<F>(&mut self, id: ElementId, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        let Some(element) = self.scene.element_mut(id) else {
            tracing::debug!("update on unknown element {id}");
            return false;
        };
        f(element);
        element.clamp_constraints();
        true
    }

    /// Remove all elements whose id is in `ids`, as one history entry.
    ///
    /// Removed ids also leave the selection. When nothing matches, no
    /// history entry is recorded.
    pub fn delete_elements(&mut self, ids: &[ElementId]) {
        let before = self.scene.elements.len();
        self.scene.elements.retain(|el| !ids.contains(&el.id));
        if self.scene.elements.len() == before {
            tracing::debug!("delete matched no elements");
            return;
        }
        self.scene.remove_from_selection(ids);
        self.commit();
    }

    /// Duplicate the given elements with fresh ids and a fixed offset.
    ///
    /// Duplicates are appended on top in id-list order and become the new
    /// selection. One history entry for the whole batch.
    pub fn duplicate_elements(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut copies = Vec::new();
        for &id in ids {
            if let Some(original) = self.scene.element(id) {
                let mut copy = original.clone();
                copy.id = ElementId::new();
                copy.x += DUPLICATE_OFFSET;
                copy.y += DUPLICATE_OFFSET;
                copies.push(copy);
            }
        }
        if copies.is_empty() {
            return Vec::new();
        }
        let new_ids: Vec<ElementId> = copies.iter().map(|el| el.id).collect();
        self.scene.elements.extend(copies);
        self.scene.set_selection(new_ids.clone());
        self.commit();
        new_ids
    }

    /// Select an element, replacing or extending the current selection.
    ///
    /// Locked and unknown elements are rejected with the selection
    /// unchanged. Additive re-selection of an already-selected id is a
    /// no-op, never a toggle-off.
    pub fn select(&mut self, id: ElementId, additive: bool) {
        match self.scene.element(id) {
            Some(el) if el.locked => {
                tracing::debug!("rejected selection of locked element {id}");
            }
            Some(_) => {
                if additive {
                    self.scene.add_to_selection(id);
                } else {
                    self.scene.set_selection(vec![id]);
                }
            }
            None => tracing::debug!("rejected selection of unknown element {id}"),
        }
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.scene.set_selection(Vec::new());
    }

    /// Flip an element's visibility. Commits like any attribute update;
    /// selection is unaffected.
    pub fn toggle_visibility(&mut self, id: ElementId) {
        self.update_element(id, |el| el.visible = !el.visible);
    }

    /// Flip an element's lock flag. Commits like any attribute update;
    /// selection is unaffected.
    pub fn toggle_lock(&mut self, id: ElementId) {
        self.update_element(id, |el| el.locked = !el.locked);
    }

    /// Move the element at `from` to position `to` in the paint order,
    /// shifting the elements in between. Out-of-range indices are rejected.
    pub fn reorder_elements(&mut self, from: usize, to: usize) {
        let len = self.scene.elements.len();
        if from >= len || to >= len {
            tracing::debug!("rejected reorder {from} -> {to} with {len} elements");
            return;
        }
        if from == to {
            return;
        }
        let element = self.scene.elements.remove(from);
        self.scene.elements.insert(to, element);
        self.commit();
    }

    /// Set the view zoom, clamped to the scene's range. Not undoable.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.scene.set_zoom(zoom);
    }

    /// Remove every element and clear the selection, as one history entry.
    /// Skipped entirely when the scene is already empty.
    pub fn clear_canvas(&mut self) {
        if self.scene.elements.is_empty() {
            return;
        }
        self.scene.elements.clear();
        self.scene.set_selection(Vec::new());
        self.commit();
    }

    /// Replace the entire element collection, as one history entry.
    ///
    /// Every incoming element gets a fresh id, even on a reload of the same
    /// logical document. Selection is cleared. Canvas dimensions are the
    /// caller's responsibility ([`Editor::set_canvas_size`]).
    pub fn load_template(&mut self, elements: Vec<Element>) {
        self.scene.elements = elements
            .into_iter()
            .map(|mut el| {
                el.id = ElementId::new();
                el.clamp_constraints();
                el
            })
            .collect();
        self.scene.set_selection(Vec::new());
        self.commit();
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Record the current element collection as a history entry.
    ///
    /// Called implicitly by every committing operation; called directly by
    /// the interaction controller to settle a drag gesture.
    pub fn commit(&mut self) {
        self.history.commit(&self.scene.elements);
    }

    /// Step the element collection back one history entry.
    ///
    /// Selection is transient view state and is not restored; ids that no
    /// longer resolve are pruned instead.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.scene.elements = snapshot.to_vec();
            self.scene.prune_selection();
        }
    }

    /// Step the element collection forward one history entry.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.scene.elements = snapshot.to_vec();
            self.scene.prune_selection();
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, MIN_ELEMENT_SIZE};

    fn rect() -> Element {
        Element::new(ElementKind::rectangle("#3B82F6")).sized(200.0, 150.0)
    }

    #[test]
    fn test_add_element_selects_it() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect());
        assert_eq!(editor.scene().selected_ids(), &[id]);
        assert_eq!(editor.scene().element_count(), 1);
    }

    #[test]
    fn test_add_element_assigns_fresh_id() {
        let mut editor = Editor::new();
        let element = rect();
        let incoming = element.id;
        let assigned = editor.add_element(element);
        assert_ne!(assigned, incoming, "incoming ids are never trusted");
    }

    #[test]
    fn test_add_elements_batch_selects_all() {
        let mut editor = Editor::new();
        let ids = editor.add_elements(vec![rect(), rect(), rect()]);
        assert_eq!(ids.len(), 3);
        assert_eq!(editor.scene().selected_ids(), ids.as_slice());
        // One commit for the whole batch: initial + 1.
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_update_element_clamps_floor() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect());
        editor.update_element(id, |el| {
            el.width = 3.0;
            el.height = -10.0;
        });
        let el = editor.element(id).expect("element");
        assert_eq!(el.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.height, MIN_ELEMENT_SIZE);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut editor = Editor::new();
        editor.add_element(rect());
        let entries = editor.history().len();
        editor.update_element(ElementId::new(), |el| el.x = 99.0);
        assert_eq!(editor.history().len(), entries, "no commit for unknown id");
    }

    #[test]
    fn test_delete_removes_from_selection() {
        let mut editor = Editor::new();
        let a = editor.add_element(rect());
        let b = editor.add_element(rect());
        editor.select(a, true);
        editor.delete_elements(&[a]);
        assert_eq!(editor.scene().element_count(), 1);
        assert!(!editor.scene().is_selected(a));
        assert!(editor.element(b).is_some());
    }

    #[test]
    fn test_delete_nothing_skips_commit() {
        let mut editor = Editor::new();
        editor.add_element(rect());
        let entries = editor.history().len();
        editor.delete_elements(&[ElementId::new()]);
        assert_eq!(editor.history().len(), entries);
    }

    #[test]
    fn test_duplicate_offsets_and_selects_copies() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect().at(10.0, 30.0));
        let copies = editor.duplicate_elements(&[id]);
        assert_eq!(copies.len(), 1);
        let copy = editor.element(copies[0]).expect("copy");
        assert_eq!(copy.x, 10.0 + DUPLICATE_OFFSET);
        assert_eq!(copy.y, 30.0 + DUPLICATE_OFFSET);
        assert_eq!(editor.scene().selected_ids(), copies.as_slice());
    }

    #[test]
    fn test_select_locked_is_rejected() {
        let mut editor = Editor::new();
        let a = editor.add_element(rect());
        let b = editor.add_element(rect());
        editor.toggle_lock(a);
        editor.select(b, false);
        editor.select(a, true);
        assert_eq!(editor.scene().selected_ids(), &[b]);
    }

    #[test]
    fn test_locked_element_still_updatable() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect());
        editor.toggle_lock(id);
        editor.update_element(id, |el| el.x = 77.0);
        assert_eq!(editor.element(id).expect("element").x, 77.0);
    }

    #[test]
    fn test_reorder_shifts_intervening() {
        let mut editor = Editor::new();
        let a = editor.add_element(rect());
        let b = editor.add_element(rect());
        let c = editor.add_element(rect());
        editor.reorder_elements(0, 2);
        let order: Vec<ElementId> = editor.scene().elements().map(|el| el.id).collect();
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut editor = Editor::new();
        let a = editor.add_element(rect());
        editor.reorder_elements(0, 5);
        editor.reorder_elements(7, 0);
        let order: Vec<ElementId> = editor.scene().elements().map(|el| el.id).collect();
        assert_eq!(order, vec![a]);
    }

    #[test]
    fn test_set_canvas_size_rejects_zero() {
        let mut editor = Editor::new();
        editor.set_canvas_size(0, 500);
        assert_eq!(editor.scene().canvas_width, 1280);
        editor.set_canvas_size(1080, 1080);
        assert_eq!(editor.scene().canvas_width, 1080);
        assert_eq!(editor.scene().canvas_height, 1080);
    }

    #[test]
    fn test_canvas_resize_leaves_elements_alone() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect().at(100.0, 100.0));
        editor.set_canvas_size(64, 64);
        let el = editor.element(id).expect("element");
        assert_eq!((el.x, el.y), (100.0, 100.0));
        assert_eq!(el.width, 200.0);
    }

    #[test]
    fn test_clear_canvas_commits_once() {
        let mut editor = Editor::new();
        editor.add_elements(vec![rect(), rect()]);
        let entries = editor.history().len();
        editor.clear_canvas();
        assert!(editor.scene().is_empty());
        assert_eq!(editor.history().len(), entries + 1);
        // Clearing an empty canvas records nothing.
        editor.clear_canvas();
        assert_eq!(editor.history().len(), entries + 1);
    }

    #[test]
    fn test_load_template_regenerates_ids() {
        let mut editor = Editor::new();
        editor.add_element(rect());
        let incoming = vec![rect(), rect()];
        let old_ids: Vec<ElementId> = incoming.iter().map(|el| el.id).collect();
        editor.load_template(incoming);
        assert_eq!(editor.scene().element_count(), 2);
        assert!(editor.scene().selected_ids().is_empty());
        for el in editor.scene().elements() {
            assert!(!old_ids.contains(&el.id));
        }
    }

    #[test]
    fn test_undo_redo_concrete_scenario() {
        let mut editor = Editor::new();
        editor.add_element(
            Element::new(ElementKind::rectangle("#1a1a2e")).sized(1280.0, 720.0),
        );
        editor.add_element(
            Element::new(ElementKind::Text {
                text: "TITLE".to_string(),
                font_family: "DM Sans".to_string(),
                font_size: 56.0,
                font_weight: 400,
                font_style: crate::element::FontStyle::Normal,
                color: "#ffffff".to_string(),
                align: crate::element::TextAlign::Left,
            })
            .at(640.0, 340.0)
            .sized(600.0, 80.0),
        );

        editor.undo();
        assert_eq!(editor.scene().element_count(), 1);

        editor.redo();
        assert_eq!(editor.scene().element_count(), 2);
        let second = editor.scene().elements().nth(1).expect("text element");
        match &second.kind {
            ElementKind::Text { text, .. } => assert_eq!(text, "TITLE"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_undo_prunes_dangling_selection() {
        let mut editor = Editor::new();
        editor.add_element(rect());
        let b = editor.add_element(rect());
        editor.undo();
        assert!(!editor.scene().is_selected(b));
        assert_eq!(editor.scene().element_count(), 1);
    }

    #[test]
    fn test_transient_update_defers_commit() {
        let mut editor = Editor::new();
        let id = editor.add_element(rect());
        let entries = editor.history().len();

        editor.update_element_transient(id, |el| el.x = 5.0);
        editor.update_element_transient(id, |el| el.x = 10.0);
        assert_eq!(editor.history().len(), entries);

        editor.commit();
        assert_eq!(editor.history().len(), entries + 1);
        editor.undo();
        assert_eq!(editor.element(id).expect("element").x, 0.0);
    }
}
