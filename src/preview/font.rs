//! Font metrics and glyph generation for preview rendering.
//!
//! Uses the Spleen bitmap font family. Each [`FontSize`] of the layout
//! maps to one Spleen face; the title size reuses the largest face at a
//! 2x nearest-neighbor scale.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::layout::FontSize;

/// Pixel dimensions of one glyph cell at render scale 1.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub char_width: usize,
    pub char_height: usize,
    /// Vertical advance per text line (char height plus leading).
    pub line_height: usize,
}

impl FontMetrics {
    pub const SMALL: FontMetrics = FontMetrics {
        char_width: 6,
        char_height: 12,
        line_height: 15,
    };

    pub const BODY: FontMetrics = FontMetrics {
        char_width: 8,
        char_height: 16,
        line_height: 21,
    };

    pub const HEADING: FontMetrics = FontMetrics {
        char_width: 12,
        char_height: 24,
        line_height: 30,
    };

    pub const TITLE: FontMetrics = FontMetrics {
        char_width: 24,
        char_height: 48,
        line_height: 56,
    };

    pub fn for_size(size: FontSize) -> FontMetrics {
        match size {
            FontSize::Small => Self::SMALL,
            FontSize::Body => Self::BODY,
            FontSize::Heading => Self::HEADING,
            FontSize::Title => Self::TITLE,
        }
    }
}

/// Generate a glyph bitmap for a character.
/// Returns a `Vec<u8>` of `char_width * char_height` where each byte is
/// 0 (background) or 1 (ink).
pub fn generate_glyph(size: FontSize, ch: char) -> Vec<u8> {
    let metrics = FontMetrics::for_size(size);
    let mut glyph = vec![0u8; metrics.char_width * metrics.char_height];

    let (face_w, face_h) = match size {
        FontSize::Small => (6, 12),
        FontSize::Body => (8, 16),
        // Title renders the 12x24 face at 2x
        FontSize::Heading | FontSize::Title => (12, 24),
    };
    let mut spleen = match size {
        FontSize::Small => PSF2Font::new(FONT_6X12),
        FontSize::Body => PSF2Font::new(FONT_8X16),
        FontSize::Heading | FontSize::Title => PSF2Font::new(FONT_12X24),
    }
    .unwrap();

    let utf8 = ch.to_string();
    if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
        let mut src = vec![0u8; face_w * face_h];
        for (row_y, row) in spleen_glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < face_h && col_x < face_w {
                    src[row_y * face_w + col_x] = if on { 1 } else { 0 };
                }
            }
        }
        if face_w == metrics.char_width && face_h == metrics.char_height {
            glyph = src;
        } else {
            scale_bitmap(
                &src,
                face_w,
                face_h,
                &mut glyph,
                metrics.char_width,
                metrics.char_height,
            );
        }
    } else {
        // Unknown character: draw a box
        draw_box(&mut glyph, metrics.char_width, metrics.char_height);
    }

    glyph
}

/// Spleen has no glyph for the rupee sign; substitute its ASCII ligature
/// so formatted PKR amounts stay readable.
pub fn displayable_chars(text: &str) -> Vec<char> {
    let mut chars = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{20A8}' => chars.extend(['R', 's']),
            other => chars.push(other),
        }
    }
    chars
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst: &mut [u8],
    dst_w: usize,
    dst_h: usize,
) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
