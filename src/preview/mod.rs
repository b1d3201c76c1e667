//! # Layout Ops to Bitmap Preview Renderer
//!
//! Renders the op list produced by [`crate::layout::project`] into a
//! grayscale page bitmap showing what the exported invoice will look
//! like.
//!
//! ## Architecture
//!
//! ```text
//! Invoice → project() → [Op] → PreviewRenderer → Bitmap → PNG / PDF
//!                                    ↓
//!                              Process each Op:
//!                              - Render text with Spleen bitmap fonts
//!                              - Lay out multi-column rows
//!                              - Blit the decoded logo
//!                              - Draw rules and gaps
//! ```
//!
//! The renderer is deterministic: the same ops at the same scale always
//! produce the same bitmap. The `scale` parameter supersamples every
//! glyph, gap, and image for crisp export output (the export pipeline
//! renders at 2x).

pub mod font;
pub mod logo;
mod text;

pub use font::{FontMetrics, generate_glyph};

use std::collections::HashMap;

use image::codecs::png::PngEncoder;
use thiserror::Error;

use crate::invoice::Invoice;
use crate::layout::{self, FontSize, LOGO_MAX_HEIGHT, Op, PAGE_MARGIN, PAGE_WIDTH};

/// Errors that can occur while producing preview output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

/// A rendered grayscale page: L8 pixels, 255 = white.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        use image::ImageEncoder;

        let mut png = Vec::new();
        let encoder = PngEncoder::new(&mut png);
        encoder
            .write_image(
                &self.pixels,
                self.width,
                self.height,
                image::ExtendedColorType::L8,
            )
            .map_err(|e: image::ImageError| RenderError::ImageEncode(e.to_string()))?;
        Ok(png)
    }
}

/// Preview renderer for layout op lists.
pub struct PreviewRenderer {
    /// Full page width in pixels (including margins), at the render scale.
    page_width: usize,
    /// Printable content width in pixels.
    content_width: usize,
    /// Left/right/top/bottom page margin in pixels.
    margin: usize,
    /// Supersampling factor applied to every dimension.
    scale: usize,
    buffer: Vec<u8>,
    height: usize,
    y: usize,
    glyph_cache: HashMap<(FontSize, char), Vec<u8>>,
}

impl PreviewRenderer {
    /// Create a renderer at the given supersampling scale (clamped to 1+).
    pub fn new(scale: usize) -> Self {
        let scale = scale.max(1);
        let page_width = PAGE_WIDTH as usize * scale;
        let margin = PAGE_MARGIN as usize * scale;

        let initial_height = 100 * scale;
        Self {
            page_width,
            content_width: page_width - margin * 2,
            margin,
            scale,
            buffer: vec![255u8; page_width * initial_height],
            height: initial_height,
            y: margin,
            glyph_cache: HashMap::new(),
        }
    }

    /// Render an op list to a page bitmap.
    pub fn render(&mut self, ops: &[Op]) -> Bitmap {
        for op in ops {
            self.process_op(op);
        }
        self.finish()
    }

    fn process_op(&mut self, op: &Op) {
        match op {
            Op::Text { content, style } => self.draw_text(content, *style),
            Op::Row { cells, style } => self.draw_row(cells, *style),
            Op::Rule { weight } => self.draw_rule(*weight),
            Op::Gap { px } => self.gap(*px),
            Op::Logo { source } => self.draw_logo(source),
        }
    }

    /// Ensure the buffer has room for the given y position.
    fn ensure_height(&mut self, y: usize) {
        let needed = y + 1;
        if needed > self.height {
            let new_height = needed.max(self.height + 100 * self.scale);
            self.buffer.resize(self.page_width * new_height, 255);
            self.height = new_height;
        }
    }

    /// Darken a pixel (darkest value wins, so overlaps compose).
    fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.page_width {
            return;
        }
        self.ensure_height(y);
        let idx = y * self.page_width + x;
        if value < self.buffer[idx] {
            self.buffer[idx] = value;
        }
    }

    /// Set a pixel in content coordinates (0 = left edge of content area).
    fn set_content_pixel(&mut self, x: usize, y: usize, value: u8) {
        if x < self.content_width {
            self.set_pixel(x + self.margin, y, value);
        }
    }

    fn draw_rule(&mut self, weight: u32) {
        let thickness = (weight as usize * self.scale).max(1);
        self.ensure_height(self.y + thickness);
        for dy in 0..thickness {
            for x in 0..self.content_width {
                self.set_content_pixel(x, self.y + dy, 0);
            }
        }
        self.y += thickness;
    }

    fn gap(&mut self, px: u32) {
        self.y += px as usize * self.scale;
        self.ensure_height(self.y);
    }

    /// Blit the logo at the left content edge. An undecodable logo gets a
    /// crossed placeholder box instead of failing the whole render.
    fn draw_logo(&mut self, source: &str) {
        let max_w = (self.content_width / 2) as u32;
        let max_h = LOGO_MAX_HEIGHT * self.scale as u32;

        match logo::decode_data_url(source, max_w, max_h) {
            Ok(decoded) => {
                self.ensure_height(self.y + decoded.height as usize);
                for row in 0..decoded.height as usize {
                    for col in 0..decoded.width as usize {
                        let value = decoded.pixels[row * decoded.width as usize + col];
                        self.set_content_pixel(col, self.y + row, value);
                    }
                }
                self.y += decoded.height as usize;
            }
            Err(e) => {
                tracing::warn!(error = %e, "logo not renderable, drawing placeholder");
                self.draw_placeholder(160 * self.scale, 80 * self.scale);
            }
        }
    }

    /// Crossed box for content that could not be rendered.
    fn draw_placeholder(&mut self, width: usize, height: usize) {
        self.ensure_height(self.y + height);
        for x in 0..width {
            self.set_content_pixel(x, self.y, 0);
            self.set_content_pixel(x, self.y + height - 1, 0);
            // Diagonals
            let dy = x * (height - 1) / (width - 1).max(1);
            self.set_content_pixel(x, self.y + dy, 0);
            self.set_content_pixel(x, self.y + height - 1 - dy, 0);
        }
        for y in 0..height {
            self.set_content_pixel(0, self.y + y, 0);
            self.set_content_pixel(width - 1, self.y + y, 0);
        }
        self.y += height;
    }

    /// Compute the content height after trimming trailing blank rows.
    fn trimmed_height(&self) -> usize {
        let mut h = self.height.min(self.y.max(1));
        while h > self.margin {
            let row_start = (h - 1) * self.page_width;
            let row_blank = self.buffer[row_start..row_start + self.page_width]
                .iter()
                .all(|&p| p == 255);
            if row_blank {
                h -= 1;
            } else {
                break;
            }
        }
        h
    }

    /// Finalize into a bitmap: trim trailing whitespace, then pad with the
    /// bottom page margin.
    fn finish(&self) -> Bitmap {
        let content_bottom = self.trimmed_height();
        let final_height = content_bottom + self.margin;

        let mut pixels = vec![255u8; self.page_width * final_height];
        let copy_rows = content_bottom.min(self.height);
        pixels[..self.page_width * copy_rows]
            .copy_from_slice(&self.buffer[..self.page_width * copy_rows]);

        Bitmap {
            width: self.page_width as u32,
            height: final_height as u32,
            pixels,
        }
    }
}

/// Project and render an invoice at the given supersampling scale.
pub fn render_preview(invoice: &Invoice, scale: usize) -> Bitmap {
    let ops = layout::project(invoice);
    PreviewRenderer::new(scale).render(&ops)
}
