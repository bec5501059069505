//! Deterministic keyword-template generation.
//!
//! The fallback path when no API key is configured: a color scheme is
//! picked from prompt keywords, a gradient background and two decorative
//! circles are laid down, and a layout branch (thumbnail, post, quote,
//! sale, story, default) fills in the text. The same prompt and canvas
//! size always produce the same proposal.

use crate::proposal::{GeneratedElement, GeneratedGradient, GenerationResult};

/// A keyword-selected palette.
struct ColorScheme {
    name: &'static str,
    bg: [&'static str; 3],
    primary: &'static str,
    accent: &'static str,
    text: &'static str,
}

static SCHEMES: [(&[&str], ColorScheme); 9] = [
    (
        &["tech", "technology"],
        ColorScheme {
            name: "tech",
            bg: ["#0f0c29", "#302b63", "#24243e"],
            primary: "#00d4ff",
            accent: "#ff0080",
            text: "#ffffff",
        },
    ),
    (
        &["neon", "cyberpunk"],
        ColorScheme {
            name: "neon",
            bg: ["#1a1a2e", "#16213e", "#0f3460"],
            primary: "#e94560",
            accent: "#00fff5",
            text: "#ffffff",
        },
    ),
    (
        &["minimal", "clean"],
        ColorScheme {
            name: "minimal",
            bg: ["#f5f5f5", "#ffffff", "#eeeeee"],
            primary: "#333333",
            accent: "#666666",
            text: "#111111",
        },
    ),
    (
        &["game", "gaming"],
        ColorScheme {
            name: "gaming",
            bg: ["#1a0000", "#330000", "#1a1a00"],
            primary: "#ff0000",
            accent: "#ffff00",
            text: "#ffffff",
        },
    ),
    (
        &["nature", "green"],
        ColorScheme {
            name: "nature",
            bg: ["#134e5e", "#71b280", "#2d5016"],
            primary: "#2d5016",
            accent: "#f4d03f",
            text: "#ffffff",
        },
    ),
    (
        &["warm", "sunset", "sale"],
        ColorScheme {
            name: "warm",
            bg: ["#ff416c", "#ff4b2b", "#f12711"],
            primary: "#ffffff",
            accent: "#ffc300",
            text: "#ffffff",
        },
    ),
    (
        &["cool", "ice", "water"],
        ColorScheme {
            name: "cool",
            bg: ["#2193b0", "#6dd5ed", "#0099c6"],
            primary: "#ffffff",
            accent: "#ffeb3b",
            text: "#ffffff",
        },
    ),
    (
        &["purple", "pink"],
        ColorScheme {
            name: "purple",
            bg: ["#4a00e0", "#8e2de2", "#2d0a4e"],
            primary: "#ffffff",
            accent: "#ff00ff",
            text: "#ffffff",
        },
    ),
    (
        &["gold", "premium", "luxury"],
        ColorScheme {
            name: "gold",
            bg: ["#1a1a2e", "#162447", "#1f4068"],
            primary: "#ffd700",
            accent: "#c9a227",
            text: "#ffffff",
        },
    ),
];

static DEFAULT_SCHEME: ColorScheme = ColorScheme {
    name: "dark",
    bg: ["#0d0d0d", "#1a1a1a", "#262626"],
    primary: "#ffffff",
    accent: "#888888",
    text: "#ffffff",
};

fn scheme_for(prompt: &str) -> &'static ColorScheme {
    SCHEMES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| prompt.contains(k)))
        .map_or(&DEFAULT_SCHEME, |(_, scheme)| scheme)
}

fn contains_any(prompt: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| prompt.contains(k))
}

/// Generate a proposal for the prompt and canvas size.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate(prompt: &str, canvas_width: u32, canvas_height: u32) -> GenerationResult {
    let width = canvas_width as f32;
    let height = canvas_height as f32;
    let lower = prompt.to_lowercase();
    let scheme = scheme_for(&lower);

    let mut elements = Vec::new();

    // Gradient background covering the whole canvas.
    elements.push(GeneratedElement {
        element_type: "rectangle".to_string(),
        width,
        height,
        opacity: Some(1.0),
        gradient: Some(GeneratedGradient {
            kind: "linear".to_string(),
            colors: scheme.bg.iter().map(ToString::to_string).collect(),
            angle: Some(135.0),
        }),
        ..GeneratedElement::default()
    });

    // Two decorative gradient circles.
    let small = width.min(height);
    elements.push(decorative_circle(
        width * 0.8,
        height * 0.15,
        small * 0.3,
        0.3,
        scheme.accent,
    ));
    elements.push(decorative_circle(
        -width * 0.1,
        height * 0.7,
        small * 0.4,
        0.2,
        scheme.primary,
    ));

    let main = extract_main_text(prompt);
    let sub = sub_text(prompt);

    if contains_any(&lower, &["youtube", "thumbnail", "video"]) {
        elements.push(
            title(main.as_deref().unwrap_or("YOUR TITLE"), width, height * 0.4)
                .with_font("Outfit", 700, (width / 15.0).min(64.0), scheme.text)
                .with_shadow_preset(),
        );
        elements.push(
            caption(sub.as_deref().unwrap_or("Subscribe for more"), width, height * 0.6)
                .with_font("DM Sans", 500, (width / 40.0).min(24.0), scheme.accent),
        );
        // A play-button circle below the title.
        elements.push(GeneratedElement {
            element_type: "circle".to_string(),
            x: width / 2.0,
            y: height * 0.75,
            width: 60.0,
            height: 60.0,
            opacity: Some(0.9),
            fill: Some(scheme.accent.to_string()),
            ..GeneratedElement::default()
        });
    } else if contains_any(&lower, &["instagram", "post", "square"]) {
        elements.push(
            title(main.as_deref().unwrap_or("YOUR TEXT"), width, height * 0.35)
                .with_font("Poppins", 600, (width / 18.0).min(48.0), scheme.text),
        );
        elements.push(
            caption(sub.as_deref().unwrap_or("#hashtag"), width, height * 0.55)
                .with_font("DM Sans", 400, (width / 45.0).min(18.0), scheme.accent),
        );
    } else if lower.contains("quote") {
        elements.push(
            title("\u{201c}", width, height * 0.3)
                .with_font("Playfair Display", 400, 80.0, scheme.accent),
        );
        let mut body = title(
            main.as_deref().unwrap_or("Your inspiring quote here"),
            width,
            height * 0.45,
        )
        .with_font("Merriweather", 400, (width / 30.0).min(32.0), scheme.text);
        body.font_style = Some("italic".to_string());
        elements.push(body);
        elements.push(
            caption(
                sub.as_deref().unwrap_or("\u{2014} Author"),
                width,
                height * 0.7,
            )
            .with_font("DM Sans", 500, (width / 50.0).min(16.0), scheme.primary),
        );
    } else if contains_any(&lower, &["sale", "discount", "offer"]) {
        elements.push(
            title("FLASH SALE", width, height * 0.25)
                .with_font("Outfit", 700, (width / 25.0).min(36.0), scheme.accent),
        );
        let mut headline = title(main.as_deref().unwrap_or("UP TO 50% OFF"), width, height * 0.42)
            .with_font("Montserrat", 900, (width / 14.0).min(56.0), scheme.text);
        headline.shadow_color = Some(scheme.accent.to_string());
        headline.shadow_blur = Some(30.0);
        elements.push(headline);
        elements.push(
            caption(sub.as_deref().unwrap_or("Limited time only!"), width, height * 0.65)
                .with_font("DM Sans", 500, (width / 40.0).min(20.0), scheme.text),
        );
    } else if contains_any(&lower, &["tiktok", "story"]) {
        elements.push(
            title(main.as_deref().unwrap_or("@username"), width, height * 0.3)
                .with_font("Outfit", 700, (width / 20.0).min(36.0), scheme.text),
        );
        elements.push(
            caption(sub.as_deref().unwrap_or("Your caption here"), width, height * 0.5)
                .with_font("DM Sans", 400, (width / 35.0).min(20.0), scheme.text),
        );
    } else {
        elements.push(
            title(main.as_deref().unwrap_or("Untitled Cover"), width, height * 0.35)
                .with_font("Outfit", 600, (width / 18.0).min(48.0), scheme.text),
        );
        elements.push(
            caption(sub.as_deref().unwrap_or("Design with AI"), width, height * 0.55)
                .with_font("DM Sans", 400, (width / 45.0).min(18.0), scheme.primary),
        );
    }

    GenerationResult {
        elements,
        description: format!("Generated {} style cover based on: {prompt}", scheme.name),
    }
}

fn decorative_circle(x: f32, y: f32, size: f32, opacity: f32, color: &str) -> GeneratedElement {
    GeneratedElement {
        element_type: "circle".to_string(),
        x,
        y,
        width: size,
        height: size,
        opacity: Some(opacity),
        gradient: Some(GeneratedGradient {
            kind: "radial".to_string(),
            colors: vec![color.to_string(), "transparent".to_string()],
            angle: None,
        }),
        ..GeneratedElement::default()
    }
}

fn title(text: &str, canvas_width: f32, y: f32) -> GeneratedElement {
    GeneratedElement {
        element_type: "text".to_string(),
        x: canvas_width * 0.125,
        y,
        width: canvas_width * 0.75,
        height: 80.0,
        opacity: Some(1.0),
        text: Some(text.to_string()),
        text_align: Some("center".to_string()),
        ..GeneratedElement::default()
    }
}

fn caption(text: &str, canvas_width: f32, y: f32) -> GeneratedElement {
    GeneratedElement {
        element_type: "text".to_string(),
        x: canvas_width * 0.2,
        y,
        width: canvas_width * 0.6,
        height: 30.0,
        opacity: Some(0.85),
        text: Some(text.to_string()),
        text_align: Some("center".to_string()),
        ..GeneratedElement::default()
    }
}

impl GeneratedElement {
    fn with_font(mut self, family: &str, weight: u16, size: f32, color: &str) -> Self {
        self.font_family = Some(family.to_string());
        self.font_weight = Some(weight);
        self.font_size = Some(size);
        self.color = Some(color.to_string());
        self
    }

    fn with_shadow_preset(mut self) -> Self {
        self.shadow_color = Some("#000000".to_string());
        self.shadow_blur = Some(20.0);
        self.shadow_offset_x = Some(0.0);
        self.shadow_offset_y = Some(4.0);
        self
    }
}

/// Extract the quoted display text from a prompt.
///
/// Handles `... with "Title"` style phrasing (after a cue word) and a
/// prompt that is nothing but a quoted string.
fn extract_main_text(prompt: &str) -> Option<String> {
    const CUES: &[&str] = &["with", "text", "saying", "says", "say", "displaying"];

    let trimmed = prompt.trim();
    for quote in ['"', '\''] {
        // Whole prompt wrapped in quotes.
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return Some(trimmed[1..trimmed.len() - 1].to_string());
        }
    }

    // Case-insensitive search shares byte offsets with the original text
    // only when lowercasing is length-preserving; fall back to the raw
    // prompt otherwise.
    let lower = prompt.to_lowercase();
    let haystack = if lower.len() == prompt.len() {
        lower.as_str()
    } else {
        prompt
    };
    for cue in CUES {
        let mut search_from = 0;
        while let Some(pos) = haystack[search_from..].find(cue) {
            let at = search_from + pos;
            let after = at + cue.len();
            let rest = prompt[after..].trim_start();
            if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
                let inner = &rest[1..];
                if let Some(end) = inner.find(quote) {
                    return Some(inner[..end].to_string());
                }
            }
            search_from = after;
        }
    }
    None
}

/// The clause after a trailing `and`, used as secondary text.
fn sub_text(prompt: &str) -> Option<String> {
    let lower = prompt.to_lowercase();
    let haystack = if lower.len() == prompt.len() {
        lower.as_str()
    } else {
        prompt
    };
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find("and ") {
        let at = search_from + pos;
        // Require a word boundary before the cue.
        let boundary = at == 0
            || haystack[..at]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        if boundary {
            let clause = prompt[at + 4..].trim();
            if !clause.is_empty() {
                return Some(clause.to_string());
            }
        }
        search_from = at + 4;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_fixed_input() {
        let a = generate("neon gaming thumbnail", 1280, 720);
        let b = generate("neon gaming thumbnail", 1280, 720);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_scheme_keyword_selection() {
        let result = generate("a tech product launch", 1280, 720);
        assert!(result.description.contains("tech"));
        let bg = &result.elements[0];
        let gradient = bg.gradient.as_ref().expect("background gradient");
        assert_eq!(gradient.colors[0], "#0f0c29");
    }

    #[test]
    fn test_unknown_keywords_fall_back_to_dark() {
        let result = generate("something else entirely", 1280, 720);
        assert!(result.description.contains("dark"));
    }

    #[test]
    fn test_background_covers_canvas() {
        let result = generate("minimal post", 1080, 1080);
        let bg = &result.elements[0];
        assert_eq!(bg.element_type, "rectangle");
        assert_eq!((bg.width, bg.height), (1080.0, 1080.0));
    }

    #[test]
    fn test_thumbnail_layout_has_play_button() {
        let result = generate("youtube thumbnail about rust", 1280, 720);
        let circles: Vec<_> = result
            .elements
            .iter()
            .filter(|el| el.element_type == "circle" && el.fill.is_some())
            .collect();
        assert_eq!(circles.len(), 1, "one solid play-button circle");
        assert_eq!((circles[0].width, circles[0].height), (60.0, 60.0));
    }

    #[test]
    fn test_extract_main_text_after_cue() {
        assert_eq!(
            extract_main_text("a cover with \"Hello World\" on it"),
            Some("Hello World".to_string()),
        );
        assert_eq!(
            extract_main_text("banner saying 'Big News'"),
            Some("Big News".to_string()),
        );
        assert_eq!(extract_main_text("no quotes here"), None);
    }

    #[test]
    fn test_extract_main_text_whole_quoted() {
        assert_eq!(
            extract_main_text("\"Just This\""),
            Some("Just This".to_string()),
        );
    }

    #[test]
    fn test_sub_text_clause() {
        assert_eq!(
            sub_text("gaming cover and subscribe now"),
            Some("subscribe now".to_string()),
        );
        assert_eq!(sub_text("standalone prompt"), None);
        // "brand" must not match the "and" cue.
        assert_eq!(sub_text("brand"), None);
    }

    #[test]
    fn test_quote_layout_is_italic() {
        let result = generate("quote about life", 1280, 720);
        let italic = result
            .elements
            .iter()
            .any(|el| el.font_style.as_deref() == Some("italic"));
        assert!(italic);
    }

    #[test]
    fn test_main_text_lands_in_title() {
        let result = generate("youtube video with \"RUST IN 10 MINUTES\"", 1280, 720);
        let title_el = result
            .elements
            .iter()
            .find(|el| el.text.as_deref() == Some("RUST IN 10 MINUTES"))
            .expect("title text");
        assert_eq!(title_el.font_weight, Some(700));
    }
}
