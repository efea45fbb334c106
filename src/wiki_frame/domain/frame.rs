use std::fmt;

use image::RgbImage;

use crate::domain::error::DomainError;

/// Decoded source image, in whatever color model the file had.
pub type Bitmap = image::DynamicImage;

/// 3-channel canvas produced by the fitter and drawn on by the annotator.
pub type Canvas = RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(canvas: &Canvas) -> Self {
        Self::new(canvas.width(), canvas.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A fully composited canvas whose size matches a device exactly.
#[derive(Debug, Clone)]
pub struct DisplayFrame {
    canvas: Canvas,
}

impl DisplayFrame {
    pub fn try_new(canvas: Canvas, device: Resolution) -> Result<Self, DomainError> {
        let actual = Resolution::of(&canvas);
        if actual != device {
            return Err(DomainError::FrameSizeMismatch {
                expected: device,
                actual,
            });
        }
        Ok(Self { canvas })
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::of(&self.canvas)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
