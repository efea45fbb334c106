//! Caption faces.
//!
//! [`TrueTypeFace`] renders a TrueType font with rusttype through imageproc.
//! [`BuiltinFace`] is a fixed 9x18 bold bitmap font compiled into the binary, used
//! when none of the configured font files can be loaded.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use embedded_graphics::mono_font::ascii::FONT_9X18_BOLD;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use image::Rgb;
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::domain::frame::Canvas;
use crate::domain::typeface::{FontProvider, TextBounds, Typeface};

pub struct TrueTypeFace {
    name: String,
    font: Font<'static>,
    scale: Scale,
}

impl TrueTypeFace {
    /// `size` is the em size in pixels (what other toolkits call the point size
    /// of a screen font). rusttype scales by line height, so convert.
    pub fn from_bytes(name: String, bytes: Vec<u8>, size: f32) -> Option<Self> {
        let font = Font::try_from_vec(bytes)?;
        let units_per_em = font.units_per_em() as f32;
        let unscaled = font.v_metrics_unscaled();
        let line_height = unscaled.ascent - unscaled.descent;
        let pixel_height = if units_per_em > 0.0 && line_height > 0.0 {
            size * line_height / units_per_em
        } else {
            size
        };
        Some(Self {
            name,
            font,
            scale: Scale::uniform(pixel_height),
        })
    }

    pub fn from_file(path: &Path, size: f32) -> Option<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Cannot read font {}: {}", path.display(), e);
                return None;
            }
        };
        let face = Self::from_bytes(path.display().to_string(), bytes, size);
        if face.is_none() {
            log::debug!("{} is not a usable TrueType font", path.display());
        }
        face
    }

    // imageproc の draw_text_mut と同じく ascent 分下げてレイアウトする
    fn layout(&self, text: &str) -> Vec<PositionedGlyph<'_>> {
        let v_metrics = self.font.v_metrics(self.scale);
        self.font
            .layout(text, self.scale, point(0.0, v_metrics.ascent))
            .collect()
    }
}

impl Typeface for TrueTypeFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance_width(&self, text: &str) -> f32 {
        self.layout(text)
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn bounds(&self, text: &str) -> TextBounds {
        self.layout(text)
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold(None, |acc: Option<TextBounds>, bb| {
                Some(match acc {
                    None => TextBounds {
                        left: bb.min.x,
                        top: bb.min.y,
                        right: bb.max.x,
                        bottom: bb.max.y,
                    },
                    Some(b) => TextBounds {
                        left: b.left.min(bb.min.x),
                        top: b.top.min(bb.min.y),
                        right: b.right.max(bb.max.x),
                        bottom: b.bottom.max(bb.max.y),
                    },
                })
            })
            .unwrap_or_default()
    }

    fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

/// Adapter so embedded-graphics can draw straight onto an `RgbImage`.
struct CanvasTarget<'a>(&'a mut Canvas);

impl OriginDimensions for CanvasTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for CanvasTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.0.dimensions();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x as u32 >= width || point.y as u32 >= height {
                continue;
            }
            self.0
                .put_pixel(point.x as u32, point.y as u32, Rgb([color.r(), color.g(), color.b()]));
        }
        Ok(())
    }
}

/// Built-in 9x18 bold face. ASCII only; other characters render as `?`.
pub struct BuiltinFace;

impl BuiltinFace {
    fn style(color: Rgb<u8>) -> MonoTextStyle<'static, Rgb888> {
        MonoTextStyle::new(&FONT_9X18_BOLD, Rgb888::new(color[0], color[1], color[2]))
    }
}

impl Typeface for BuiltinFace {
    fn name(&self) -> &str {
        "builtin 9x18 bold"
    }

    fn advance_width(&self, text: &str) -> f32 {
        let metrics = Self::style(Rgb([255, 255, 255])).measure_string(text, Point::zero(), Baseline::Top);
        metrics.next_position.x as f32
    }

    fn bounds(&self, text: &str) -> TextBounds {
        let metrics = Self::style(Rgb([255, 255, 255])).measure_string(text, Point::zero(), Baseline::Top);
        let bb = metrics.bounding_box;
        TextBounds {
            left: bb.top_left.x,
            top: bb.top_left.y,
            right: bb.top_left.x + bb.size.width as i32,
            bottom: bb.top_left.y + bb.size.height as i32,
        }
    }

    fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let mut target = CanvasTarget(canvas);
        // Infallible
        let _ = Text::with_baseline(text, Point::new(x, y), Self::style(color), Baseline::Top).draw(&mut target);
    }
}

/// Tries each configured font file in order, falling back to [`BuiltinFace`].
pub struct SystemFontProvider {
    candidates: Vec<PathBuf>,
    size: f32,
}

impl SystemFontProvider {
    pub fn new(candidates: Vec<PathBuf>, size: f32) -> Self {
        Self { candidates, size }
    }
}

impl FontProvider for SystemFontProvider {
    fn typeface(&self) -> Box<dyn Typeface> {
        for path in &self.candidates {
            if let Some(face) = TrueTypeFace::from_file(path, self.size) {
                log::info!("Using caption font {} at {}px", path.display(), self.size);
                return Box::new(face);
            }
        }
        log::warn!(
            "None of the caption fonts could be loaded ({:?}); using the built-in face",
            self.candidates
        );
        Box::new(BuiltinFace)
    }
}
