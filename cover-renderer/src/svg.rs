//! Scene to SVG document builder.
//!
//! The vector form of an export and the intermediate representation for
//! rasterization. Output is deterministic: gradient and filter definitions
//! get index-based ids in element encounter order, and no timestamps or
//! random values are emitted.

use std::fmt::Write;

use cover_core::element::{
    Element, ElementKind, FontStyle, Gradient, GradientKind, Paint, Shadow, TextAlign,
};
use cover_core::Scene;

use crate::image_ref;

/// Build the SVG document for a scene over the given background.
///
/// `background` is RGBA; an alpha of zero keeps the canvas transparent
/// while still emitting the background rect the document contract asks
/// for. Output dimensions are the canvas dimensions scaled by `scale`,
/// with the view box fixed to canvas units.
#[must_use]
pub fn scene_to_svg(scene: &Scene, background: [u8; 4], scale: f32) -> String {
    let view_w = scene.canvas_width;
    let view_h = scene.canvas_height;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out_w = ((view_w as f32) * scale).max(1.0) as u32;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out_h = ((view_h as f32) * scale).max(1.0) as u32;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
    );

    write_defs(&mut svg, scene);

    let bg_alpha = f32::from(background[3]) / 255.0;
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{bg_alpha})\"/>",
        background[0], background[1], background[2],
    );

    for (index, element) in scene.visible_elements().enumerate() {
        write_element(&mut svg, element, index);
    }

    svg.push_str("</svg>");
    svg
}

/// Emit gradient and shadow-filter definitions for every visible element,
/// keyed by visible-order index so references are stable across renders.
fn write_defs(svg: &mut String, scene: &Scene) {
    let mut defs = String::new();
    for (index, element) in scene.visible_elements().enumerate() {
        if let Some(gradient) = element_gradient(element) {
            write_gradient_def(&mut defs, gradient, index);
        }
        if let Some(shadow) = &element.shadow {
            write_shadow_def(&mut defs, shadow, index);
        }
    }
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }
}

fn element_gradient(element: &Element) -> Option<&Gradient> {
    match &element.kind {
        ElementKind::Rectangle { paint, .. } | ElementKind::Circle { paint, .. } => match paint {
            Paint::Gradient(gradient) => Some(gradient),
            Paint::Solid(_) => None,
        },
        _ => None,
    }
}

fn write_gradient_def(defs: &mut String, gradient: &Gradient, index: usize) {
    match gradient.kind {
        GradientKind::Linear => {
            // Map the angle to unit-box endpoints through the box center;
            // zero degrees runs left to right.
            let radians = gradient.angle.unwrap_or(0.0).to_radians();
            let dx = radians.cos() / 2.0;
            let dy = radians.sin() / 2.0;
            let (x1, y1) = (0.5 - dx, 0.5 - dy);
            let (x2, y2) = (0.5 + dx, 0.5 + dy);
            let _ = write!(
                defs,
                "<linearGradient id=\"grad{index}\" x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\">",
            );
            write_stops(defs, &gradient.colors);
            defs.push_str("</linearGradient>");
        }
        GradientKind::Radial => {
            let _ = write!(
                defs,
                "<radialGradient id=\"grad{index}\" cx=\"0.5\" cy=\"0.5\" r=\"0.5\">",
            );
            write_stops(defs, &gradient.colors);
            defs.push_str("</radialGradient>");
        }
    }
}

fn write_stops(defs: &mut String, colors: &[String]) {
    let last = colors.len().saturating_sub(1).max(1);
    for (i, color) in colors.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f32 / last as f32;
        if color == "transparent" {
            let _ = write!(
                defs,
                "<stop offset=\"{offset}\" stop-color=\"#000000\" stop-opacity=\"0\"/>",
            );
        } else {
            let _ = write!(
                defs,
                "<stop offset=\"{offset}\" stop-color=\"{}\"/>",
                escape_xml(color),
            );
        }
    }
}

fn write_shadow_def(defs: &mut String, shadow: &Shadow, index: usize) {
    // Canvas-style blur maps to a gaussian with half the radius.
    let deviation = shadow.blur / 2.0;
    let _ = write!(
        defs,
        "<filter id=\"shadow{index}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
         <feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{deviation}\" flood-color=\"{}\"/>\
         </filter>",
        shadow.offset_x,
        shadow.offset_y,
        escape_xml(&shadow.color),
    );
}

/// Shared presentation attributes: rotation about the element center,
/// opacity when not fully opaque, shadow filter when defined.
fn write_common_attrs(svg: &mut String, element: &Element, index: usize) {
    if element.rotation.abs() > f32::EPSILON {
        let (cx, cy) = element.center();
        let _ = write!(
            svg,
            " transform=\"rotate({} {cx} {cy})\"",
            element.rotation,
        );
    }
    if element.opacity < 1.0 {
        let _ = write!(svg, " opacity=\"{}\"", element.opacity);
    }
    if element.shadow.is_some() {
        let _ = write!(svg, " filter=\"url(#shadow{index})\"");
    }
}

fn paint_attr(paint: &Paint, index: usize) -> String {
    match paint {
        Paint::Solid(color) => escape_xml(color),
        Paint::Gradient(_) => format!("url(#grad{index})"),
    }
}

fn write_stroke_attrs(svg: &mut String, stroke: Option<&String>, stroke_width: f32) {
    if stroke_width > 0.0 {
        if let Some(stroke) = stroke {
            let _ = write!(
                svg,
                " stroke=\"{}\" stroke-width=\"{stroke_width}\"",
                escape_xml(stroke),
            );
        }
    }
}

fn write_element(svg: &mut String, element: &Element, index: usize) {
    match &element.kind {
        ElementKind::Text {
            text,
            font_family,
            font_size,
            font_weight,
            font_style,
            color,
            align,
        } => {
            // Baseline sits one em below the top of the bounding box.
            let text_y = element.y + font_size;
            let (anchor, text_x) = match align {
                TextAlign::Left => ("start", element.x),
                TextAlign::Center => ("middle", element.x + element.width / 2.0),
                TextAlign::Right => ("end", element.x + element.width),
            };
            let style = match font_style {
                FontStyle::Normal => "normal",
                FontStyle::Italic => "italic",
            };
            let _ = write!(
                svg,
                "<text x=\"{text_x}\" y=\"{text_y}\" font-family=\"{}\" font-size=\"{font_size}\" \
                 font-weight=\"{font_weight}\" font-style=\"{style}\" fill=\"{}\" text-anchor=\"{anchor}\"",
                escape_xml(font_family),
                escape_xml(color),
            );
            write_common_attrs(svg, element, index);
            let _ = write!(svg, ">{}</text>", escape_xml(text));
        }

        ElementKind::Rectangle {
            paint,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
                element.x,
                element.y,
                element.width,
                element.height,
                paint_attr(paint, index),
            );
            write_stroke_attrs(svg, stroke.as_ref(), *stroke_width);
            write_common_attrs(svg, element, index);
            svg.push_str("/>");
        }

        ElementKind::Circle {
            paint,
            stroke,
            stroke_width,
        } => {
            let (cx, cy) = element.center();
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            let _ = write!(
                svg,
                "<ellipse cx=\"{cx}\" cy=\"{cy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"{}\"",
                paint_attr(paint, index),
            );
            write_stroke_attrs(svg, stroke.as_ref(), *stroke_width);
            write_common_attrs(svg, element, index);
            svg.push_str("/>");
        }

        ElementKind::Image { src } => {
            if image_ref::is_embeddable(src) {
                let _ = write!(
                    svg,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     preserveAspectRatio=\"xMidYMid meet\" href=\"{}\"",
                    element.x,
                    element.y,
                    element.width,
                    element.height,
                    escape_xml(src),
                );
                write_common_attrs(svg, element, index);
                svg.push_str("/>");
            } else {
                // Unusable source degrades to a placeholder box.
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     fill=\"#e0e0e0\" stroke=\"#999\" stroke-width=\"1\"",
                    element.x, element.y, element.width, element.height,
                );
                write_common_attrs(svg, element, index);
                svg.push_str("/>");
            }
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_core::Editor;
    use cover_core::{Element, ElementKind, Gradient, GradientKind, Paint, Shadow};

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn scene_with(elements: Vec<Element>) -> Scene {
        let mut editor = Editor::new();
        editor.add_elements(elements);
        editor.scene().clone()
    }

    #[test]
    fn test_empty_scene_document() {
        let scene = Scene::default();
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1280\""));
        assert!(svg.contains("height=\"720\""));
        assert!(svg.contains("rgba(255,255,255,1)"));
    }

    #[test]
    fn test_elements_render_bottom_to_top() {
        let scene = scene_with(vec![
            Element::new(ElementKind::rectangle("#111111")).sized(100.0, 100.0),
            Element::new(ElementKind::rectangle("#222222")).sized(100.0, 100.0),
        ]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        let first = svg.find("#111111").expect("bottom element");
        let second = svg.find("#222222").expect("top element");
        assert!(first < second, "bottom element is written first");
    }

    #[test]
    fn test_hidden_elements_excluded() {
        let mut editor = Editor::new();
        let id = editor.add_element(Element::new(ElementKind::rectangle("#ff00ff")));
        editor.toggle_visibility(id);
        let svg = scene_to_svg(editor.scene(), WHITE, 1.0);
        assert!(!svg.contains("#ff00ff"));
    }

    #[test]
    fn test_rotation_pivots_on_center() {
        let scene = scene_with(vec![Element::new(ElementKind::rectangle("#123456"))
            .at(100.0, 100.0)
            .sized(200.0, 100.0)
            .rotated(45.0)]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("rotate(45 200 150)"));
    }

    #[test]
    fn test_gradient_defs_are_index_stable() {
        let gradient = Paint::Gradient(Gradient {
            kind: GradientKind::Linear,
            colors: vec!["#0f0c29".to_string(), "#302b63".to_string()],
            angle: Some(135.0),
        });
        let scene = scene_with(vec![
            Element::new(ElementKind::Rectangle {
                paint: gradient,
                stroke: None,
                stroke_width: 0.0,
            })
            .sized(400.0, 300.0),
        ]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("<linearGradient id=\"grad0\""));
        assert!(svg.contains("fill=\"url(#grad0)\""));
        assert!(svg.contains("stop-color=\"#0f0c29\""));
    }

    #[test]
    fn test_transparent_gradient_stop() {
        let paint = Paint::Gradient(Gradient {
            kind: GradientKind::Radial,
            colors: vec!["#e94560".to_string(), "transparent".to_string()],
            angle: None,
        });
        let scene = scene_with(vec![Element::new(ElementKind::Circle {
            paint,
            stroke: None,
            stroke_width: 0.0,
        })
        .sized(100.0, 100.0)]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("<radialGradient id=\"grad0\""));
        assert!(svg.contains("stop-opacity=\"0\""));
    }

    #[test]
    fn test_text_alignment_anchors() {
        let mut centered = Element::new(ElementKind::text("Centered"))
            .at(100.0, 0.0)
            .sized(200.0, 40.0);
        if let ElementKind::Text { align, .. } = &mut centered.kind {
            *align = cover_core::TextAlign::Center;
        }
        let scene = scene_with(vec![centered]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("x=\"200\""), "anchor x is the box center");
    }

    #[test]
    fn test_text_is_escaped() {
        let scene = scene_with(vec![Element::new(ElementKind::text("A < B & C > D"))]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("A &lt; B &amp; C &gt; D"));
    }

    #[test]
    fn test_shadow_filter_emitted() {
        let scene = scene_with(vec![Element::new(ElementKind::text("Shadowed"))
            .with_shadow(Shadow {
                color: "#000000".to_string(),
                blur: 20.0,
                offset_x: 0.0,
                offset_y: 4.0,
            })]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(svg.contains("<filter id=\"shadow0\""));
        assert!(svg.contains("feDropShadow"));
        assert!(svg.contains("filter=\"url(#shadow0)\""));
    }

    #[test]
    fn test_unusable_image_source_degrades() {
        let scene = scene_with(vec![Element::new(ElementKind::image("")).sized(100.0, 100.0)]);
        let svg = scene_to_svg(&scene, WHITE, 1.0);
        assert!(!svg.contains("<image"));
        assert!(svg.contains("#e0e0e0"));
    }

    #[test]
    fn test_repeated_render_is_identical() {
        let scene = scene_with(vec![
            Element::new(ElementKind::rectangle("#1a1a2e")).sized(1280.0, 720.0),
            Element::new(ElementKind::text("TITLE")).at(640.0, 340.0).sized(600.0, 80.0),
        ]);
        let a = scene_to_svg(&scene, WHITE, 1.0);
        let b = scene_to_svg(&scene, WHITE, 1.0);
        assert_eq!(a, b);
    }
}
