//! Image source decoding for image elements.
//!
//! Sources are opaque references, typically base64 data URIs. Decoding is
//! used to validate a source before an export embeds it, so a malformed
//! reference degrades to a placeholder instead of aborting the render.

use base64::Engine;

use crate::error::{RenderError, RenderResult};

/// Decoded image data with its probed dimensions.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel.
    pub pixels: Vec<u8>,
}

/// Image container format, detected from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG, no alpha.
    Jpeg,
    /// WebP.
    WebP,
    /// Unrecognized container.
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }
        Self::Unknown
    }
}

/// Extract the raw bytes of a base64 data URI.
///
/// Supports the form `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns [`RenderError::Resource`] when the URI is not a base64 data URI
/// or the payload does not decode.
pub fn decode_data_uri(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("not a data URI".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Resource("data URI has no payload".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(RenderError::Resource(
            "only base64 data URIs are supported".to_string(),
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| RenderError::Resource(format!("base64 decode failed: {e}")))
}

/// Decode an image source into pixels.
///
/// # Errors
///
/// Returns [`RenderError::Resource`] when the source is not a decodable
/// data URI.
pub fn load_image(src: &str) -> RenderResult<ImageData> {
    let bytes = decode_data_uri(src)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| RenderError::Resource(format!("failed to decode image: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Check whether a source can be embedded in an export.
///
/// Non-data URIs (plain URLs) are passed through untouched; data URIs must
/// decode to a recognized raster container.
#[must_use]
pub fn is_embeddable(src: &str) -> bool {
    if !src.starts_with("data:") {
        return !src.is_empty();
    }
    match decode_data_uri(src) {
        Ok(bytes) => ImageFormat::from_magic_bytes(&bytes) != ImageFormat::Unknown,
        Err(e) => {
            tracing::warn!("image source rejected: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x1 transparent PNG.
    const PNG_1X1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_data_uri() {
        let bytes = decode_data_uri(PNG_1X1).expect("decode");
        assert_eq!(ImageFormat::from_magic_bytes(&bytes), ImageFormat::Png);
    }

    #[test]
    fn test_load_image_probes_dimensions() {
        let data = load_image(PNG_1X1).expect("load");
        assert_eq!((data.width, data.height), (1, 1));
        assert_eq!(data.pixels.len(), 4);
    }

    #[test]
    fn test_rejects_non_data_uri() {
        assert!(decode_data_uri("https://example.com/a.png").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_embeddable() {
        assert!(is_embeddable(PNG_1X1));
        assert!(is_embeddable("https://example.com/a.png"));
        assert!(!is_embeddable(""));
        assert!(!is_embeddable("data:image/png;base64,%%%"));
    }
}
