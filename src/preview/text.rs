//! Text rendering for the preview.
//!
//! Implements wrapped, aligned text for full-width lines and row cells
//! using the Spleen glyph bitmaps from [`super::font`].

use super::PreviewRenderer;
use super::font::{FontMetrics, displayable_chars, generate_glyph};
use crate::layout::{Align, Cell, FontSize, TextStyle};

impl PreviewRenderer {
    /// Render a full-width text line (wrapping onto further lines when it
    /// overflows the content area).
    pub(super) fn draw_text(&mut self, content: &str, style: TextStyle) {
        if content.is_empty() {
            return;
        }
        let height = self.draw_text_in_region(content, style, 0, self.content_width);
        self.y += height;
    }

    /// Render side-by-side cells; the row advances by its tallest cell.
    pub(super) fn draw_row(&mut self, cells: &[Cell], style: TextStyle) {
        let mut row_height = 0usize;
        let mut x0 = 0f32;

        for cell in cells {
            let cell_x = x0.round() as usize;
            let cell_width = (cell.frac * self.content_width as f32).round() as usize;
            x0 += cell.frac * self.content_width as f32;

            if cell.content.is_empty() || cell_width == 0 {
                continue;
            }
            let cell_style = TextStyle {
                align: cell.align,
                ..style
            };
            let height = self.draw_text_in_region(&cell.content, cell_style, cell_x, cell_width);
            row_height = row_height.max(height);
        }

        // An all-empty row still occupies one line of the base size.
        if row_height == 0 {
            row_height = FontMetrics::for_size(style.size).line_height * self.scale;
        }
        self.y += row_height;
        self.ensure_height(self.y);
    }

    /// Render wrapped text inside a horizontal region of the content area
    /// without moving the cursor. Returns the pixel height consumed.
    fn draw_text_in_region(
        &mut self,
        content: &str,
        style: TextStyle,
        region_x: usize,
        region_width: usize,
    ) -> usize {
        let metrics = FontMetrics::for_size(style.size);
        let char_width = metrics.char_width * self.scale;
        let line_height = metrics.line_height * self.scale;
        let chars_per_line = (region_width / char_width).max(1);

        let chars = displayable_chars(content);
        let lines = wrap_chars(&chars, chars_per_line);

        for (i, line) in lines.iter().enumerate() {
            let line_width = line.len() * char_width;
            let start_x = match style.align {
                Align::Left => region_x,
                Align::Center => region_x + region_width.saturating_sub(line_width) / 2,
                Align::Right => region_x + region_width.saturating_sub(line_width),
            };

            let baseline_y = self.y + i * line_height;
            for (j, &ch) in line.iter().enumerate() {
                self.draw_char(ch, style, start_x + j * char_width, baseline_y);
            }
        }

        lines.len() * line_height
    }

    /// Draw one glyph at content coordinates, scaled by the render scale,
    /// with an offset double-strike for bold (the Spleen faces carry no
    /// bold variant).
    fn draw_char(&mut self, ch: char, style: TextStyle, x: usize, y: usize) {
        let metrics = FontMetrics::for_size(style.size);
        let glyph = self.glyph(style.size, ch);
        let scale = self.scale;

        for gy in 0..metrics.char_height {
            for gx in 0..metrics.char_width {
                if glyph[gy * metrics.char_width + gx] == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = x + gx * scale + sx;
                        let py = y + gy * scale + sy;
                        self.set_content_pixel(px, py, 0);
                        if style.bold {
                            self.set_content_pixel(px + scale, py, 0);
                        }
                    }
                }
            }
        }
    }

    /// Get or generate a glyph bitmap.
    fn glyph(&mut self, size: FontSize, ch: char) -> Vec<u8> {
        if let Some(glyph) = self.glyph_cache.get(&(size, ch)) {
            return glyph.clone();
        }
        let glyph = generate_glyph(size, ch);
        self.glyph_cache.insert((size, ch), glyph.clone());
        glyph
    }
}

/// Greedy wrap at word boundaries, falling back to a hard break for words
/// longer than a line.
fn wrap_chars(chars: &[char], per_line: usize) -> Vec<Vec<char>> {
    let mut lines: Vec<Vec<char>> = Vec::new();
    let mut current: Vec<char> = Vec::new();

    let words = chars.split(|&c| c == ' ');
    for word in words {
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };

        if needed <= per_line {
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend_from_slice(word);
        } else if word.len() <= per_line {
            lines.push(std::mem::take(&mut current));
            current.extend_from_slice(word);
        } else {
            // Hard-break an overlong word
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for chunk in word.chunks(per_line) {
                if chunk.len() == per_line {
                    lines.push(chunk.to_vec());
                } else {
                    current = chunk.to_vec();
                }
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, per_line: usize) -> Vec<String> {
        wrap_chars(&text.chars().collect::<Vec<_>>(), per_line)
            .into_iter()
            .map(|l| l.into_iter().collect())
            .collect()
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_at_word_boundary() {
        assert_eq!(wrap("hello brave world", 11), vec!["hello brave", "world"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_collapses_repeated_spaces() {
        assert_eq!(wrap("a    b", 10), vec!["a b"]);
    }
}
