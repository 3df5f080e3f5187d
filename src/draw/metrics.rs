//! Fixed-width text metrics

use glam::Vec2;

use super::{TextMetrics, TextStyle};

/// Advance of one glyph as a fraction of the font size
const GLYPH_ADVANCE: f32 = 0.5;

/// Metrics of an idealised monospace font
///
/// Every glyph is `size / 2` wide and lines are `size` tall. Used by the
/// recording surface and wherever no real font is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        Vec2::new(glyphs * style.size * GLYPH_ADVANCE, self.line_height(style))
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        style.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measures_by_char_count() {
        let style = TextStyle::new(20.0);
        assert_eq!(MonospaceMetrics.measure("héllo", &style), Vec2::new(50.0, 20.0));
        assert_eq!(MonospaceMetrics.measure("", &style).x, 0.0);
    }
}
