use crate::domain::error::DomainError;
use crate::domain::frame::{Bitmap, Canvas, Resolution};

// 入力はドメインの型、出力もドメインの型とする
#[cfg_attr(test, mockall::automock)]
pub trait ImageProcessor {
    /// Center-crops to the target aspect ratio and resizes to exactly `target`.
    fn fit_to_display(&self, image: &Bitmap, target: Resolution) -> Result<Canvas, DomainError>;

    /// Draws the single-line caption at the bottom of `canvas`. Never fails.
    fn overlay_caption(&self, canvas: Canvas, caption: &str) -> Canvas;
}
