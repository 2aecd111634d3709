#![forbid(unsafe_code)]

//! Multi-line text label with word wrapping.
//!
//! Text is measured in terminal-style columns ([`unicode_width`]) and laid
//! out with fixed [`TextMetrics`]: every column is `advance` points wide and
//! every line is `line_height` points tall. Glyph rasterization is left to a
//! host-provided [`GlyphPainter`].

use lumen_core::geometry::{Point, Rect, Size};
use lumen_render::{Canvas, PackedRgba};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Fixed text metrics in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextMetrics {
    /// Width of one display column.
    pub advance: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            advance: 9.0,
            line_height: 21.0,
        }
    }
}

impl TextMetrics {
    /// Whole columns that fit in `width` points (at least one).
    pub fn columns_in(&self, width: f64) -> usize {
        if self.advance <= 0.0 || !width.is_finite() {
            return usize::MAX;
        }
        ((width / self.advance).floor().max(1.0)) as usize
    }
}

/// Draws shaped lines of text. Implemented by the host's text stack.
pub trait GlyphPainter {
    /// Paint `line` with its top-left corner at `origin`.
    fn paint_line(&self, canvas: &mut Canvas, line: &str, origin: Point, color: PackedRgba);
}

/// A wrapped text label.
#[derive(Debug, Clone)]
pub struct TextLabel {
    text: String,
    color: PackedRgba,
    alpha: f64,
    frame: Rect,
    metrics: TextMetrics,
}

impl Default for TextLabel {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: PackedRgba::WHITE,
            alpha: 1.0,
            frame: Rect::ZERO,
            metrics: TextMetrics::default(),
        }
    }

    #[must_use]
    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[inline]
    pub fn text_color(&self) -> PackedRgba {
        self.color
    }

    pub fn set_text_color(&mut self, color: PackedRgba) {
        self.color = color;
    }

    #[inline]
    pub fn text_metrics(&self) -> TextMetrics {
        self.metrics
    }

    pub fn set_text_metrics(&mut self, metrics: TextMetrics) {
        self.metrics = metrics;
    }

    /// Opacity in [0.0, 1.0].
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Lines of the text wrapped to `width` points.
    pub fn lines(&self, width: f64) -> Vec<String> {
        if self.text.is_empty() {
            return Vec::new();
        }
        wrap_words(&self.text, self.metrics.columns_in(width))
    }

    /// Natural size of the text wrapped inside `bounds.width`.
    ///
    /// The height may exceed `bounds.height`; callers clamp.
    pub fn size_that_fits(&self, bounds: Size) -> Size {
        let lines = self.lines(bounds.width);
        let columns = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        Size::new(
            columns as f64 * self.metrics.advance,
            lines.len() as f64 * self.metrics.line_height,
        )
    }

    /// Paint every line that fits vertically in the frame.
    pub fn paint(&self, canvas: &mut Canvas, painter: &dyn GlyphPainter) {
        if self.alpha <= 0.0 || self.frame.is_empty() {
            return;
        }
        let color = self.color.with_opacity(self.alpha);
        let mut y = self.frame.y;
        for line in self.lines(self.frame.width) {
            if y + self.metrics.line_height > self.frame.max_y() + f64::EPSILON {
                break;
            }
            painter.paint_line(canvas, &line, Point::new(self.frame.x, y), color);
            y += self.metrics.line_height;
        }
    }
}

/// Greedy word wrap to `width` columns. Newlines always break.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let paragraph = raw.strip_suffix('\r').unwrap_or(raw);
        let mut line = String::new();
        let mut line_width = 0;
        let before = lines.len();

        for word in split_words(paragraph) {
            let word_width = word.width();

            if line_width + word_width <= width {
                line.push_str(word);
                line_width += word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(line.trim_end().to_string());
                line.clear();
                line_width = 0;
                if word.trim().is_empty() {
                    continue;
                }
            }

            let word = word.trim_start();
            if word.width() > width {
                wrap_long_word(word, width, &mut lines, &mut line, &mut line_width);
            } else {
                line.push_str(word);
                line_width = word.width();
            }
        }

        if !line.is_empty() || lines.len() == before {
            lines.push(line.trim_end().to_string());
        }
    }

    lines
}

fn wrap_long_word(
    word: &str,
    width: usize,
    lines: &mut Vec<String>,
    line: &mut String,
    line_width: &mut usize,
) {
    for grapheme in word.graphemes(true) {
        let w = grapheme.width();
        if *line_width + w > width && !line.is_empty() {
            lines.push(std::mem::take(line));
            *line_width = 0;
        }
        line.push_str(grapheme);
        *line_width += w;
    }
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let is_ws = grapheme.chars().all(char::is_whitespace);
        if in_whitespace.is_some_and(|prev| prev != is_ws) {
            words.push(&text[start..idx]);
            start = idx;
        }
        in_whitespace = Some(is_ws);
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}
