//! Text measurement and word wrapping.

use unicode_width::UnicodeWidthStr;

use crate::style::FontId;

/// Host-supplied text measurement. Must be deterministic for a given
/// font and string within a frame.
pub trait TextMetrics {
    fn text_width(&self, font: FontId, text: &str) -> f32;
    fn text_height(&self, font: FontId) -> f32;
}

/// Fixed-cell metrics: every display column is `char_width` wide.
///
/// Wide (CJK) characters count as two columns, matching how a monospace
/// terminal or glyph atlas would lay them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl MonospaceMetrics {
    pub const fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8.0, 14.0)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, _font: FontId, text: &str) -> f32 {
        text.width() as f32 * self.char_width
    }

    fn text_height(&self, _font: FontId) -> f32 {
        self.line_height
    }
}

/// Greedy word wrap.
///
/// Breaks before the first word that would push a line past `max_width`.
/// A word wider than `max_width` on its own still gets a line to itself.
/// Hard `\n` breaks always start a new line, so an empty paragraph yields an
/// empty line.
pub fn wrap_text<'t>(
    metrics: &dyn TextMetrics,
    font: FontId,
    text: &'t str,
    max_width: f32,
) -> Vec<&'t str> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line: Option<(usize, usize)> = None;
        for (start, end) in word_spans(paragraph) {
            line = match line {
                None => Some((start, end)),
                Some((line_start, line_end)) => {
                    if metrics.text_width(font, &paragraph[line_start..end]) > max_width {
                        lines.push(&paragraph[line_start..line_end]);
                        Some((start, end))
                    } else {
                        Some((line_start, end))
                    }
                }
            };
        }
        lines.push(line.map_or("", |(start, end)| &paragraph[start..end]));
    }
    lines
}

/// Byte ranges of the space-separated words in `s`.
fn word_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, ch) in s.char_indices() {
        match (ch == ' ', start) {
            (true, Some(word_start)) => {
                spans.push((word_start, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(word_start) = start {
        spans.push((word_start, s.len()));
    }
    spans
}
