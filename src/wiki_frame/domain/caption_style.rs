use crate::domain::color::Color;

/// How the caption is painted: text color, backing box color (with alpha) and the
/// padding used both as margin around the text and as distance from the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionStyle {
    pub text_color: Color,
    pub backdrop_color: Color,
    pub padding: u32,
}

impl CaptionStyle {
    pub fn new(text_color: Color, backdrop_color: Color, padding: u32) -> Self {
        Self {
            text_color,
            backdrop_color,
            padding,
        }
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        // 黒 5% (255 * 0.05 = 12)
        Self::new(Color::WHITE, Color::new(0, 0, 0, 12), 10)
    }
}
