//! Wire types for the generation contract.
//!
//! The collaborator returns element proposals without ids; conversion always
//! mints fresh core elements, so any id-like field a remote model invents
//! is never honored.

use cover_core::element::{
    Element, ElementKind, FontStyle, Gradient, GradientKind, Paint, Shadow, TextAlign,
};
use serde::{Deserialize, Serialize};

/// Gradient description in the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedGradient {
    /// `"linear"` or `"radial"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered stop colors.
    pub colors: Vec<String>,
    /// Direction in degrees for linear gradients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

/// One proposed element from the generator.
///
/// Mirrors the prompt contract given to the remote model: camelCase keys,
/// a `type` discriminator, and per-type optional attributes. Unknown keys
/// (including any `id`) are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedElement {
    /// `"text"`, `"rectangle"`, `"circle"`, or `"image"`.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Top-left X.
    pub x: f32,
    /// Top-left Y.
    pub y: f32,
    /// Bounding-box width.
    pub width: f32,
    /// Bounding-box height.
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Opacity; the wire default is fully opaque.
    pub opacity: Option<f32>,
    /// Flat fill for shapes.
    pub fill: Option<String>,
    /// Stroke color for shapes.
    pub stroke: Option<String>,
    /// Stroke width for shapes.
    pub stroke_width: Option<f32>,
    /// Text content.
    pub text: Option<String>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Font family name.
    pub font_family: Option<String>,
    /// Numeric font weight.
    pub font_weight: Option<u16>,
    /// `"normal"` or `"italic"`.
    pub font_style: Option<String>,
    /// Text color.
    pub color: Option<String>,
    /// `"left"`, `"center"`, or `"right"`.
    pub text_align: Option<String>,
    /// Gradient paint; takes precedence over `fill` when both appear.
    pub gradient: Option<GeneratedGradient>,
    /// Shadow color.
    pub shadow_color: Option<String>,
    /// Shadow blur radius.
    pub shadow_blur: Option<f32>,
    /// Shadow X offset.
    pub shadow_offset_x: Option<f32>,
    /// Shadow Y offset.
    pub shadow_offset_y: Option<f32>,
    /// Image source reference.
    pub src: Option<String>,
}

/// A full generation reply: proposed elements plus a description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Proposed elements, bottom to top.
    pub elements: Vec<GeneratedElement>,
    /// Short human-readable description of the design.
    pub description: String,
}

impl GenerationResult {
    /// Convert the proposal into core elements, ready for the editor's
    /// batch-add path.
    ///
    /// Proposals with an unknown `type` are skipped with a diagnostic.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
            .iter()
            .filter_map(convert_element)
            .collect()
    }
}

fn convert_element(proposal: &GeneratedElement) -> Option<Element> {
    let kind = match proposal.element_type.as_str() {
        "text" => ElementKind::Text {
            text: proposal.text.clone().unwrap_or_default(),
            font_family: proposal.font_family.clone().unwrap_or_else(|| "DM Sans".to_string()),
            font_size: proposal.font_size.unwrap_or(24.0),
            font_weight: proposal.font_weight.unwrap_or(400),
            font_style: match proposal.font_style.as_deref() {
                Some("italic") => FontStyle::Italic,
                _ => FontStyle::Normal,
            },
            color: proposal.color.clone().unwrap_or_else(|| "#000000".to_string()),
            align: match proposal.text_align.as_deref() {
                Some("center") => TextAlign::Center,
                Some("right") => TextAlign::Right,
                _ => TextAlign::Left,
            },
        },
        "rectangle" => ElementKind::Rectangle {
            paint: convert_paint(proposal),
            stroke: proposal.stroke.clone(),
            stroke_width: proposal.stroke_width.unwrap_or(0.0),
        },
        "circle" => ElementKind::Circle {
            paint: convert_paint(proposal),
            stroke: proposal.stroke.clone(),
            stroke_width: proposal.stroke_width.unwrap_or(0.0),
        },
        "image" => ElementKind::Image {
            src: proposal.src.clone()?,
        },
        other => {
            tracing::warn!("skipping generated element of unknown type {other:?}");
            return None;
        }
    };

    let mut element = Element::new(kind)
        .at(proposal.x, proposal.y)
        .sized(proposal.width, proposal.height)
        .rotated(proposal.rotation)
        .with_opacity(proposal.opacity.unwrap_or(1.0));

    if let Some(color) = proposal.shadow_color.clone() {
        element = element.with_shadow(Shadow {
            color,
            blur: proposal.shadow_blur.unwrap_or(0.0),
            offset_x: proposal.shadow_offset_x.unwrap_or(0.0),
            offset_y: proposal.shadow_offset_y.unwrap_or(0.0),
        });
    }

    element.clamp_constraints();
    Some(element)
}

/// Gradient wins over flat fill when a proposal carries both, matching the
/// paint precedence of the editor's render path.
fn convert_paint(proposal: &GeneratedElement) -> Paint {
    if let Some(gradient) = &proposal.gradient {
        let kind = if gradient.kind == "radial" {
            GradientKind::Radial
        } else {
            GradientKind::Linear
        };
        if gradient.colors.len() >= 2 {
            return Paint::Gradient(Gradient {
                kind,
                colors: gradient.colors.clone(),
                angle: gradient.angle,
            });
        }
    }
    Paint::Solid(proposal.fill.clone().unwrap_or_else(|| "#000000".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_skipped() {
        let result = GenerationResult {
            elements: vec![
                GeneratedElement {
                    element_type: "hologram".to_string(),
                    ..GeneratedElement::default()
                },
                GeneratedElement {
                    element_type: "rectangle".to_string(),
                    width: 100.0,
                    height: 100.0,
                    fill: Some("#123456".to_string()),
                    ..GeneratedElement::default()
                },
            ],
            description: String::new(),
        };
        let elements = result.into_elements();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_id_like_fields_ignored() {
        let json = r#"{
            "elements": [
                {"type": "text", "id": "evil-id", "x": 10, "y": 20,
                 "width": 100, "height": 40, "rotation": 0, "text": "hi"}
            ],
            "description": "d"
        }"#;
        let result: GenerationResult = serde_json::from_str(json).expect("parse");
        let elements = result.into_elements();
        assert_eq!(elements.len(), 1);
        assert_ne!(elements[0].id.to_string(), "evil-id");
    }

    #[test]
    fn test_gradient_precedence_over_fill() {
        let proposal = GeneratedElement {
            element_type: "rectangle".to_string(),
            width: 100.0,
            height: 100.0,
            fill: Some("#ffffff".to_string()),
            gradient: Some(GeneratedGradient {
                kind: "linear".to_string(),
                colors: vec!["#000000".to_string(), "#111111".to_string()],
                angle: Some(90.0),
            }),
            ..GeneratedElement::default()
        };
        let element = convert_element(&proposal).expect("element");
        match &element.kind {
            ElementKind::Rectangle { paint: Paint::Gradient(g), .. } => {
                assert_eq!(g.kind, GradientKind::Linear);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_undersized_spec_is_clamped() {
        let proposal = GeneratedElement {
            element_type: "circle".to_string(),
            width: 4.0,
            height: 4.0,
            fill: Some("#ff0000".to_string()),
            ..GeneratedElement::default()
        };
        let element = convert_element(&proposal).expect("element");
        assert_eq!(element.width, cover_core::MIN_ELEMENT_SIZE);
    }

    #[test]
    fn test_image_without_src_skipped() {
        let proposal = GeneratedElement {
            element_type: "image".to_string(),
            width: 100.0,
            height: 100.0,
            ..GeneratedElement::default()
        };
        assert!(convert_element(&proposal).is_none());
    }
}
