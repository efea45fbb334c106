use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, ImageFormat, RgbImage};

use super::error::InfrastructureError;
use crate::config::DisplayConfig;
use crate::domain::color::Color;
use crate::domain::display_trait::Display;
use crate::domain::frame::{Canvas, DisplayFrame, Resolution};

/// A panel backed by a PNG file. `show` writes the staged frame, surrounded by the
/// border margin, next to the target path and renames it into place.
pub struct PngFileDisplay {
    output_path: PathBuf,
    resolution: Resolution,
    border: Color,
    border_px: u32,
    staged: Option<DisplayFrame>,
}

impl PngFileDisplay {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            output_path: config.output_path.clone(),
            resolution: Resolution::new(config.width, config.height),
            border: config.border_color,
            border_px: config.border_px,
            staged: None,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn compose_panel(&self, frame: &DisplayFrame) -> Result<RgbImage, InfrastructureError> {
        let border = self.border_px;
        let padded = |side: u32| {
            border
                .checked_mul(2)
                .and_then(|margin| side.checked_add(margin))
                .ok_or_else(|| InfrastructureError::DeviceError(format!("border of {}px is too wide", border)))
        };
        let mut panel = RgbImage::from_pixel(
            padded(self.resolution.width)?,
            padded(self.resolution.height)?,
            self.border.to_rgb(),
        );
        imageops::replace(&mut panel, frame.canvas(), border as i64, border as i64);
        Ok(panel)
    }
}

impl Display for PngFileDisplay {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn set_border(&mut self, color: Color) {
        self.border = color;
    }

    fn set_image(&mut self, canvas: &Canvas) -> Result<(), InfrastructureError> {
        let frame = DisplayFrame::try_new(canvas.clone(), self.resolution)
            .map_err(|e| InfrastructureError::DeviceError(e.to_string()))?;
        self.staged = Some(frame);
        Ok(())
    }

    fn show(&mut self) -> Result<(), InfrastructureError> {
        let frame = self
            .staged
            .as_ref()
            .ok_or_else(|| InfrastructureError::DeviceError("show called before set_image".to_string()))?;
        let panel = self.compose_panel(frame)?;

        // 途中で失敗しても前の画像が残るように、一時ファイルに書いてから置き換える
        let mut tmp_name = self.output_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        let committed = panel
            .save_with_format(&tmp_path, ImageFormat::Png)
            .map_err(|e| InfrastructureError::DeviceError(format!("writing {}: {}", tmp_path.display(), e)))
            .and_then(|()| {
                fs::rename(&tmp_path, &self.output_path).map_err(|e| {
                    InfrastructureError::DeviceError(format!("committing {}: {}", self.output_path.display(), e))
                })
            });
        if let Err(e) = committed {
            // 書きかけの一時ファイルは残さない
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        log::info!(
            "Displayed {} frame on {}",
            frame.resolution(),
            self.output_path.display()
        );
        Ok(())
    }
}
