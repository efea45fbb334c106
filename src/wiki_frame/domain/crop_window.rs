use crate::domain::error::DomainError;
use crate::domain::frame::Resolution;

/// Centered region of the source that has (up to truncation) the target aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    pub fn centered(source: Resolution, target: Resolution) -> Result<Self, DomainError> {
        if source.is_empty() {
            return Err(DomainError::InvalidInput(format!("source image has no pixels ({})", source)));
        }
        if target.is_empty() {
            return Err(DomainError::InvalidInput(format!("target resolution has no pixels ({})", target)));
        }

        // 比率の比較も切り詰めも整数で行い、浮動小数点の誤差で 1px ずれないようにする
        let (sw, sh) = (source.width as u64, source.height as u64);
        let (tw, th) = (target.width as u64, target.height as u64);
        let window = if sw * th > tw * sh {
            // 横長: 左右だけを切り落とす
            let width = (tw * sh / th).clamp(1, sw) as u32;
            CropWindow {
                x: (source.width - width) / 2,
                y: 0,
                width,
                height: source.height,
            }
        } else {
            // 縦長: 上下だけを切り落とす
            let height = (sw * th / tw).clamp(1, sh) as u32;
            CropWindow {
                x: 0,
                y: (source.height - height) / 2,
                width: source.width,
                height,
            }
        };
        Ok(window)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// `(left, top, right, bottom)`, right and bottom exclusive.
    pub fn as_box(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }
}
