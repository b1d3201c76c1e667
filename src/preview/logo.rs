//! Logo decoding for the preview renderer.
//!
//! The invoice stores its logo as a self-contained `data:` URL (the form
//! uploads a file, the server re-encodes it). This module decodes that
//! URL back into grayscale pixels and bounds the result so an oversized
//! upload cannot dominate the page.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::FilterType;

/// A decoded logo ready to blit: L8 pixels, 255 = white.
#[derive(Debug, Clone)]
pub struct DecodedLogo {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode a `data:<mime>;base64,<payload>` URL into a grayscale image
/// bounded to `max_width` x `max_height` (aspect preserved).
pub fn decode_data_url(
    source: &str,
    max_width: u32,
    max_height: u32,
) -> Result<DecodedLogo, String> {
    let payload = source
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| "logo is not a base64 data URL".to_string())?;

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {e}"))?;

    let img = image::load_from_memory(&bytes).map_err(|e| format!("undecodable image: {e}"))?;

    let img = if img.width() > max_width || img.height() > max_height {
        img.resize(max_width, max_height, FilterType::Triangle)
    } else {
        img
    };

    let gray = img.to_luma8();
    Ok(DecodedLogo {
        width: gray.width(),
        height: gray.height(),
        pixels: gray.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a tiny generated image as a data URL for round-trip tests.
    fn sample_data_url(width: u32, height: u32) -> String {
        let img = image::GrayImage::from_fn(width, height, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 0 } else { 255 }])
        });
        let mut png = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&png)
        )
    }

    #[test]
    fn test_round_trip_small_image() {
        let url = sample_data_url(10, 6);
        let logo = decode_data_url(&url, 100, 100).unwrap();
        assert_eq!((logo.width, logo.height), (10, 6));
        assert_eq!(logo.pixels.len(), 60);
    }

    #[test]
    fn test_oversized_logo_bounded() {
        let url = sample_data_url(400, 200);
        let logo = decode_data_url(&url, 100, 100).unwrap();
        assert!(logo.width <= 100 && logo.height <= 100);
        // Aspect preserved: 2:1
        assert_eq!(logo.width, 100);
        assert_eq!(logo.height, 50);
    }

    #[test]
    fn test_rejects_non_data_url() {
        assert!(decode_data_url("https://example.com/logo.png", 100, 100).is_err());
        assert!(decode_data_url("", 100, 100).is_err());
    }

    #[test]
    fn test_rejects_bad_payload() {
        assert!(decode_data_url("data:image/png;base64,!!!", 100, 100).is_err());
        assert!(decode_data_url("data:image/png;base64,AAAA", 100, 100).is_err());
    }
}
