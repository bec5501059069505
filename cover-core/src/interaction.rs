//! Pointer and keyboard gesture handling.
//!
//! Translates view-level input into editor operations, given the
//! screen-to-canvas transform `(screen - canvas_origin) / zoom`. Drag
//! gestures (move, resize, rotate) apply transient updates while the
//! pointer moves and settle into a single history commit on release.

use crate::clipboard::Clipboard;
use crate::editor::Editor;
use crate::element::{Element, ElementId, ElementKind, MIN_ELEMENT_SIZE};
use crate::event::{Key, KeyModifiers, PointerEvent};

/// The active tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    /// Select and manipulate elements.
    #[default]
    Select,
    /// Click to place a text element.
    Text,
    /// Click to place a rectangle.
    Rect,
    /// Click to place a circle.
    Circle,
}

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top-left corner.
    Nw,
    /// Top edge.
    N,
    /// Top-right corner.
    Ne,
    /// Right edge.
    E,
    /// Bottom-right corner.
    Se,
    /// Bottom edge.
    S,
    /// Bottom-left corner.
    Sw,
    /// Left edge.
    W,
}

impl ResizeHandle {
    fn affects_x(self) -> bool {
        matches!(self, Self::E | Self::W | Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    fn affects_y(self) -> bool {
        matches!(self, Self::N | Self::S | Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    fn grows_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    fn grows_up(self) -> bool {
        matches!(self, Self::N | Self::Nw | Self::Ne)
    }
}

/// Recorded start geometry of one element in a move gesture.
#[derive(Debug, Clone, Copy)]
struct MoveStart {
    id: ElementId,
    x: f32,
    y: f32,
}

/// In-progress drag gesture state.
#[derive(Debug, Clone)]
enum Gesture {
    Move {
        anchor: (f32, f32),
        starts: Vec<MoveStart>,
    },
    Resize {
        id: ElementId,
        handle: ResizeHandle,
        anchor: (f32, f32),
        start_x: f32,
        start_y: f32,
        start_w: f32,
        start_h: f32,
    },
    Rotate {
        id: ElementId,
        center: (f32, f32),
        start_angle: f32,
        start_rotation: f32,
    },
}

/// Inline text editing session.
#[derive(Debug, Clone)]
pub struct TextEditSession {
    /// The text element being edited.
    pub id: ElementId,
    /// Local buffer, committed on Enter or blur, discarded on Escape.
    pub buffer: String,
}

/// Translates pointer/keyboard gestures into editor operations.
#[derive(Debug, Default)]
pub struct Controller {
    /// Active tool.
    pub tool: Tool,
    /// Screen position of the canvas origin, for coordinate transforms.
    pub canvas_origin: (f32, f32),
    gesture: Option<Gesture>,
    gesture_moved: bool,
    text_edit: Option<TextEditSession>,
    clipboard: Clipboard,
}

impl Controller {
    /// Create a controller with the select tool and origin at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to canvas space.
    #[must_use]
    pub fn to_canvas(&self, editor: &Editor, x: f32, y: f32) -> (f32, f32) {
        let zoom = editor.scene().zoom();
        (
            (x - self.canvas_origin.0) / zoom,
            (y - self.canvas_origin.1) / zoom,
        )
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// The active text editing session, if any.
    #[must_use]
    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    // -----------------------------------------------------------------------
    // Pointer gestures
    // -----------------------------------------------------------------------

    /// Handle a pointer press on the canvas.
    ///
    /// With a creation tool, a press on empty canvas places a default-sized
    /// element at the point. With the select tool, a press on an element
    /// selects it and starts a move gesture over the whole selection; a
    /// press on empty canvas clears the selection.
    pub fn pointer_down(&mut self, editor: &mut Editor, event: PointerEvent) {
        // An open text editor commits on any outside press.
        self.finish_text_edit(editor);

        let (cx, cy) = self.to_canvas(editor, event.x, event.y);
        let hit = editor.scene().element_at(cx, cy);

        match (self.tool, hit) {
            (Tool::Select, Some(id)) => {
                editor.select(id, event.shift);
                self.begin_move(editor, cx, cy);
            }
            (Tool::Select, None) => editor.clear_selection(),
            (tool, None) => {
                editor.add_element(Self::tool_element(tool, cx, cy));
            }
            // A creation tool pressed over an element selects it instead.
            (_, Some(id)) => editor.select(id, event.shift),
        }
    }

    /// Default-sized element for a creation tool, anchored at the point.
    ///
    /// Sizes and colors follow the source editor's tool defaults.
    fn tool_element(tool: Tool, x: f32, y: f32) -> Element {
        match tool {
            Tool::Text => Element::new(ElementKind::text("Double click to edit"))
                .at(x, y)
                .sized(200.0, 40.0),
            Tool::Rect => Element::new(ElementKind::rectangle("#3B82F6"))
                .at(x, y)
                .sized(200.0, 150.0),
            Tool::Circle | Tool::Select => Element::new(ElementKind::circle("#EF4444"))
                .at(x, y)
                .sized(150.0, 150.0),
        }
    }

    fn begin_move(&mut self, editor: &Editor, cx: f32, cy: f32) {
        let starts: Vec<MoveStart> = editor
            .scene()
            .selected_ids()
            .iter()
            .filter_map(|&id| editor.element(id))
            .filter(|el| !el.locked)
            .map(|el| MoveStart {
                id: el.id,
                x: el.x,
                y: el.y,
            })
            .collect();
        if !starts.is_empty() {
            self.gesture = Some(Gesture::Move {
                anchor: (cx, cy),
                starts,
            });
            self.gesture_moved = false;
        }
    }

    /// Start a resize gesture on one of the eight handles.
    ///
    /// Handle hit-testing belongs to the view layer; it reports the grabbed
    /// handle here. Locked and hidden elements are rejected.
    pub fn begin_resize(
        &mut self,
        editor: &mut Editor,
        id: ElementId,
        handle: ResizeHandle,
        event: PointerEvent,
    ) {
        self.finish_text_edit(editor);
        let Some(el) = editor.element(id) else {
            return;
        };
        if el.locked || !el.visible {
            return;
        }
        let (cx, cy) = self.to_canvas(editor, event.x, event.y);
        self.gesture_moved = false;
        self.gesture = Some(Gesture::Resize {
            id,
            handle,
            anchor: (cx, cy),
            start_x: el.x,
            start_y: el.y,
            start_w: el.width,
            start_h: el.height,
        });
    }

    /// Start a rotate gesture from the rotate handle.
    pub fn begin_rotate(&mut self, editor: &mut Editor, id: ElementId, event: PointerEvent) {
        self.finish_text_edit(editor);
        let Some(el) = editor.element(id) else {
            return;
        };
        if el.locked || !el.visible {
            return;
        }
        let center = el.center();
        let (cx, cy) = self.to_canvas(editor, event.x, event.y);
        self.gesture_moved = false;
        self.gesture = Some(Gesture::Rotate {
            id,
            center,
            start_angle: angle_to(center, (cx, cy)),
            start_rotation: el.rotation,
        });
    }

    /// Handle pointer movement, advancing any in-progress gesture with
    /// transient (uncommitted) updates.
    pub fn pointer_move(&mut self, editor: &mut Editor, event: PointerEvent) {
        let Some(gesture) = self.gesture.clone() else {
            return;
        };
        self.gesture_moved = true;
        let (cx, cy) = self.to_canvas(editor, event.x, event.y);
        match gesture {
            Gesture::Move { anchor, starts } => {
                let dx = cx - anchor.0;
                let dy = cy - anchor.1;
                for start in starts {
                    editor.update_element_transient(start.id, |el| {
                        el.x = start.x + dx;
                        el.y = start.y + dy;
                    });
                }
            }
            Gesture::Resize {
                id,
                handle,
                anchor,
                start_x,
                start_y,
                start_w,
                start_h,
            } => {
                let (x, y, w, h) = resize_geometry(
                    handle,
                    (cx - anchor.0, cy - anchor.1),
                    (start_x, start_y, start_w, start_h),
                );
                editor.update_element_transient(id, |el| {
                    el.x = x;
                    el.y = y;
                    el.width = w;
                    el.height = h;
                });
            }
            Gesture::Rotate {
                id,
                center,
                start_angle,
                start_rotation,
            } => {
                let angle = angle_to(center, (cx, cy));
                editor.update_element_transient(id, |el| {
                    el.rotation = start_rotation + (angle - start_angle);
                });
            }
        }
    }

    /// Handle pointer release: settle the gesture into one history commit.
    ///
    /// A press-and-release without movement (a plain click-select) settles
    /// nothing and records no history entry.
    pub fn pointer_up(&mut self, editor: &mut Editor) {
        let had_gesture = self.gesture.take().is_some();
        if had_gesture && self.gesture_moved {
            editor.commit();
        }
        self.gesture_moved = false;
    }

    // -----------------------------------------------------------------------
    // Text editing
    // -----------------------------------------------------------------------

    /// Handle a double click: on a text element with the select tool, open
    /// an inline edit session seeded with the element's current text.
    pub fn double_click(&mut self, editor: &mut Editor, event: PointerEvent) {
        if self.tool != Tool::Select {
            return;
        }
        let (cx, cy) = self.to_canvas(editor, event.x, event.y);
        let Some(id) = editor.scene().element_at(cx, cy) else {
            return;
        };
        if let Some(ElementKind::Text { text, .. }) = editor.element(id).map(|el| &el.kind) {
            self.text_edit = Some(TextEditSession {
                id,
                buffer: text.clone(),
            });
        }
    }

    /// Replace the edit buffer with the typed text.
    pub fn text_input(&mut self, text: impl Into<String>) {
        if let Some(session) = &mut self.text_edit {
            session.buffer = text.into();
        }
    }

    /// Commit the edit buffer into the element and close the session.
    pub fn finish_text_edit(&mut self, editor: &mut Editor) {
        if let Some(session) = self.text_edit.take() {
            editor.update_element(session.id, |el| {
                if let ElementKind::Text { text, .. } = &mut el.kind {
                    *text = session.buffer;
                }
            });
        }
    }

    /// Discard the edit buffer and close the session without mutating.
    pub fn cancel_text_edit(&mut self) {
        self.text_edit = None;
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Handle a key press with modifiers.
    pub fn handle_key(&mut self, editor: &mut Editor, key: Key, mods: KeyModifiers) {
        // Keys route to the text session while one is open.
        if self.text_edit.is_some() {
            match key {
                Key::Enter if !mods.shift => self.finish_text_edit(editor),
                Key::Escape => self.cancel_text_edit(),
                _ => {}
            }
            return;
        }

        match key {
            Key::Delete | Key::Backspace => {
                let selected = editor.scene().selected_ids().to_vec();
                if !selected.is_empty() {
                    editor.delete_elements(&selected);
                }
            }
            Key::Char('z') if mods.command() && mods.shift => editor.redo(),
            Key::Char('z') if mods.command() => editor.undo(),
            Key::Char('d') if mods.command() => {
                let selected = editor.scene().selected_ids().to_vec();
                if !selected.is_empty() {
                    editor.duplicate_elements(&selected);
                }
            }
            Key::Char('c') if mods.command() => self.clipboard.copy(editor.scene()),
            Key::Char('v') if mods.command() => {
                self.clipboard.paste(editor);
            }
            _ => {}
        }
    }
}

/// Angle in degrees from `center` to `point`.
fn angle_to(center: (f32, f32), point: (f32, f32)) -> f32 {
    (point.1 - center.1).atan2(point.0 - center.0).to_degrees()
}

/// New `(x, y, width, height)` for a resize drag.
///
/// The handle's opposite edge stays fixed, including when the extent hits
/// the minimum-size floor.
fn resize_geometry(
    handle: ResizeHandle,
    (dx, dy): (f32, f32),
    (start_x, start_y, start_w, start_h): (f32, f32, f32, f32),
) -> (f32, f32, f32, f32) {
    let mut x = start_x;
    let mut y = start_y;
    let mut w = start_w;
    let mut h = start_h;

    if handle.affects_x() {
        if handle.grows_left() {
            w = (start_w - dx).max(MIN_ELEMENT_SIZE);
            x = start_x + start_w - w;
        } else {
            w = (start_w + dx).max(MIN_ELEMENT_SIZE);
        }
    }
    if handle.affects_y() {
        if handle.grows_up() {
            h = (start_h - dy).max(MIN_ELEMENT_SIZE);
            y = start_y + start_h - h;
        } else {
            h = (start_h + dy).max(MIN_ELEMENT_SIZE);
        }
    }

    (x, y, w, h)
}
