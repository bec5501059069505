//! Canvas elements - the building blocks of a cover document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum element extent in canvas units, enforced on resize and update.
pub const MIN_ELEMENT_SIZE: f32 = 20.0;

/// Unique identifier for an element.
///
/// Identity is by id only: two elements with identical attributes but
/// different ids are distinct entities. Ids are never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge of the bounding box.
    #[default]
    Left,
    /// Center within the bounding box.
    Center,
    /// Align to the right edge of the bounding box.
    Right,
}

/// Font slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Slanted glyphs.
    Italic,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Straight-line color ramp, optionally angled.
    Linear,
    /// Color ramp radiating from the center.
    Radial,
}

/// A multi-stop gradient paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Linear or radial.
    pub kind: GradientKind,
    /// Ordered stop colors, at least two. The string `"transparent"` is
    /// honored as a fully transparent stop.
    pub colors: Vec<String>,
    /// Direction in degrees for linear gradients; ignored for radial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

/// Paint source for shape elements.
///
/// Exactly one of solid fill or gradient is in effect at a time; replacing
/// one with the other is a plain assignment, so the exclusivity holds
/// structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    /// Flat hex color, e.g. `"#3B82F6"`.
    Solid(String),
    /// Multi-stop gradient.
    Gradient(Gradient),
}

impl Paint {
    /// Convenience constructor for a flat fill.
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid(color.into())
    }
}

/// Drop shadow attached to any element variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color as hex.
    pub color: String,
    /// Blur radius in canvas units.
    pub blur: f32,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
}

/// The variant payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A run of text.
    Text {
        /// Text content.
        text: String,
        /// Font family name.
        font_family: String,
        /// Font size in pixels.
        font_size: f32,
        /// Numeric weight token (400 regular, 700 bold, ...).
        font_weight: u16,
        /// Upright or italic.
        font_style: FontStyle,
        /// Text color as hex.
        color: String,
        /// Horizontal alignment within the bounding box.
        align: TextAlign,
    },

    /// An axis-aligned rectangle.
    Rectangle {
        /// Fill or gradient.
        paint: Paint,
        /// Stroke color as hex, if stroked.
        stroke: Option<String>,
        /// Stroke width; zero disables the stroke.
        stroke_width: f32,
    },

    /// An ellipse inscribed in the bounding box.
    Circle {
        /// Fill or gradient.
        paint: Paint,
        /// Stroke color as hex, if stroked.
        stroke: Option<String>,
        /// Stroke width; zero disables the stroke.
        stroke_width: f32,
    },

    /// A raster image scaled to the bounding box.
    Image {
        /// Opaque pixel-data reference, typically a base64 data URI.
        src: String,
    },
}

impl ElementKind {
    /// Text element with the source's defaults for the unstated attributes.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            text: content.into(),
            font_family: "DM Sans".to_string(),
            font_size: 24.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            color: "#000000".to_string(),
            align: TextAlign::Left,
        }
    }

    /// Rectangle with a flat fill and no stroke.
    #[must_use]
    pub fn rectangle(fill: impl Into<String>) -> Self {
        Self::Rectangle {
            paint: Paint::solid(fill),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Circle with a flat fill and no stroke.
    #[must_use]
    pub fn circle(fill: impl Into<String>) -> Self {
        Self::Circle {
            paint: Paint::solid(fill),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Image element referencing the given source.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }
}

/// One visual object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, immutable once created.
    pub id: ElementId,
    /// Top-left X in canvas units.
    pub x: f32,
    /// Top-left Y in canvas units.
    pub y: f32,
    /// Bounding-box width, at least [`MIN_ELEMENT_SIZE`].
    pub width: f32,
    /// Bounding-box height, at least [`MIN_ELEMENT_SIZE`].
    pub height: f32,
    /// Rotation in degrees about the bounding-box center, unbounded.
    pub rotation: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Hidden elements are excluded from rendering but stay in the
    /// collection and in history.
    pub visible: bool,
    /// Locked elements reject selection and pointer gestures but remain
    /// mutable through direct property updates.
    pub locked: bool,
    /// Optional drop shadow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element of the given kind with default geometry.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            shadow: None,
            kind,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the bounding-box extents.
    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attach a drop shadow.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Center of the bounding box, the rotation pivot.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check whether a canvas-space point lies within the bounding box.
    ///
    /// Hit testing ignores rotation, matching pointer behavior in the
    /// editor view.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Clamp extents to the minimum size and opacity to `[0, 1]`.
    ///
    /// Called by the editor after every property merge so the geometry
    /// invariants survive arbitrary updates.
    pub fn clamp_constraints(&mut self) {
        self.width = self.width.max(MIN_ELEMENT_SIZE);
        self.height = self.height.max(MIN_ELEMENT_SIZE);
        self.opacity = self.opacity.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Element::new(ElementKind::text("a"));
        let b = Element::new(ElementKind::text("a"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_contains_point() {
        let el = Element::new(ElementKind::rectangle("#000000"))
            .at(10.0, 10.0)
            .sized(100.0, 50.0);
        assert!(el.contains_point(10.0, 10.0));
        assert!(el.contains_point(110.0, 60.0));
        assert!(!el.contains_point(111.0, 30.0));
        assert!(!el.contains_point(50.0, 61.0));
    }

    #[test]
    fn test_center_is_rotation_pivot() {
        let el = Element::new(ElementKind::circle("#ffffff"))
            .at(100.0, 200.0)
            .sized(40.0, 60.0);
        assert_eq!(el.center(), (120.0, 230.0));
    }

    #[test]
    fn test_clamp_constraints() {
        let mut el = Element::new(ElementKind::text("t")).sized(5.0, -3.0);
        el.opacity = 1.7;
        el.clamp_constraints();
        assert_eq!(el.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.height, MIN_ELEMENT_SIZE);
        assert_eq!(el.opacity, 1.0);
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let el = Element::new(ElementKind::rectangle("#1a1a2e"));
        let json = serde_json::to_value(&el).expect("serialize");
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["paint"], "#1a1a2e");
    }

    #[test]
    fn test_paint_gradient_round_trip() {
        let paint = Paint::Gradient(Gradient {
            kind: GradientKind::Linear,
            colors: vec!["#0f0c29".to_string(), "#302b63".to_string()],
            angle: Some(135.0),
        });
        let json = serde_json::to_string(&paint).expect("serialize");
        let back: Paint = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, paint);
    }
}
