use image::Rgb;

use crate::domain::frame::Canvas;

/// Ink bounding box of a rendered string, relative to the point passed to
/// [`Typeface::draw`] (top of the line box).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

pub trait Typeface {
    fn name(&self) -> &str;

    /// Horizontal advance of `text`, used to decide how many words fit.
    fn advance_width(&self, text: &str) -> f32;

    fn bounds(&self, text: &str) -> TextBounds;

    fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Rgb<u8>);
}

/// Hands out the face used for captions. Implementations never fail: when the
/// preferred font cannot be loaded they fall back to a built-in face.
pub trait FontProvider {
    fn typeface(&self) -> Box<dyn Typeface>;
}
