use image::imageops::{self, FilterType};

use crate::domain::caption::fit_words;
use crate::domain::caption_style::CaptionStyle;
use crate::domain::color::Color;
use crate::domain::crop_window::CropWindow;
use crate::domain::error::DomainError;
use crate::domain::frame::{Bitmap, Canvas, Resolution};
use crate::domain::image_processor_trait::ImageProcessor;
use crate::domain::typeface::Typeface;

// ドメイン層で定義した ImageProcessor トレイトの具体的な実装
pub struct DefaultImageProcessor {
    typeface: Box<dyn Typeface>,
    style: CaptionStyle,
}

impl DefaultImageProcessor {
    pub fn new(typeface: Box<dyn Typeface>, style: CaptionStyle) -> Self {
        Self { typeface, style }
    }

    /// The longest word-prefix of `caption` whose advance fits between the side paddings.
    pub fn caption_line(&self, canvas_width: u32, caption: &str) -> String {
        let max_width = canvas_width.saturating_sub(2 * self.style.padding) as f32;
        fit_words(caption, max_width, |text| self.typeface.advance_width(text))
    }
}

impl ImageProcessor for DefaultImageProcessor {
    fn fit_to_display(&self, image: &Bitmap, target: Resolution) -> Result<Canvas, DomainError> {
        let source = Resolution::new(image.width(), image.height());
        let window = CropWindow::centered(source, target)?;
        log::info!(
            "Cropping {} to {:?} for a {} display",
            source,
            window.as_box(),
            target
        );

        let cropped = image
            .crop_imm(window.x, window.y, window.width, window.height)
            .into_rgb8();
        if window.resolution() == target {
            return Ok(cropped);
        }
        Ok(imageops::resize(&cropped, target.width, target.height, FilterType::Lanczos3))
    }

    fn overlay_caption(&self, mut canvas: Canvas, caption: &str) -> Canvas {
        let (width, height) = canvas.dimensions();
        let line = self.caption_line(width, caption);
        if line.is_empty() {
            log::warn!("Caption {:?} does not fit on one line, skipping overlay", caption);
            return canvas;
        }
        if line.len() < caption.trim().len() {
            log::debug!("Caption truncated to {:?}", line);
        }
        log::info!("Overlaying caption with {} ({})", self.typeface.name(), line);

        let bounds = self.typeface.bounds(&line);
        let padding = self.style.padding as i32;
        let x = (width as i32 - bounds.width()).div_euclid(2);
        let y = height as i32 - bounds.height() - padding;

        fill_rect_blended(
            &mut canvas,
            (x - padding, y - padding),
            (x + bounds.width() + padding, y + bounds.height() + padding),
            self.style.backdrop_color,
        );
        // インクの左上が (x, y) に来るように描画位置をずらす
        self.typeface.draw(
            &mut canvas,
            x - bounds.left,
            y - bounds.top,
            &line,
            self.style.text_color.to_rgb(),
        );
        canvas
    }
}

/// Blends `color` over every pixel of the rectangle, both corners inclusive,
/// clipped to the canvas.
fn fill_rect_blended(canvas: &mut Canvas, top_left: (i32, i32), bottom_right: (i32, i32), color: Color) {
    if color.a == 0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    let x0 = top_left.0.max(0) as u32;
    let y0 = top_left.1.max(0) as u32;
    let x1 = bottom_right.0.min(width as i32 - 1);
    let y1 = bottom_right.1.min(height as i32 - 1);
    if x1 < 0 || y1 < 0 {
        return;
    }

    for y in y0..=y1 as u32 {
        for x in x0..=x1 as u32 {
            let pixel = canvas.get_pixel_mut(x, y);
            *pixel = color.blend_over(*pixel);
        }
    }
}
