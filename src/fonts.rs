//! Text measurement for the builtin PDF fonts.
//!
//! Blocks are set in Helvetica, which printpdf ships as a builtin font with
//! no glyph tables to read, so widths come from an average-advance
//! heuristic that is good enough for word wrapping.

/// Average glyph advance per point of font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub regular_advance: f32,
    pub bold_advance: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // Bold Helvetica runs about 10 % wider.
        Self {
            regular_advance: 0.5,
            bold_advance: 0.55,
        }
    }
}

impl FontMetrics {
    /// Width of `text` in points.
    pub fn measure_text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        let avg = if bold {
            self.bold_advance
        } else {
            self.regular_advance
        };
        text.chars().count() as f32 * font_size * avg
    }

    pub fn line_height(&self, font_size: f32, line_height_factor: f32) -> f32 {
        font_size * line_height_factor
    }
}

/// Word-wrap text to fit within `max_width` points. Returns at least one line.
///
/// Words longer than the line are kept whole on a line of their own.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    bold: bool,
    max_width: f32,
    metrics: &FontMetrics,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if metrics.measure_text_width(&candidate, font_size, bold) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}
