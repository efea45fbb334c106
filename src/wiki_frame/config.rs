//! Runtime settings.
//!
//! Every section has defaults matching the reference deployment (Wikimedia Commons
//! on a 600x448 panel), so a config file only needs the keys it wants to change.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::error::ApplicationError;
use crate::domain::caption_style::CaptionStyle;
use crate::domain::color::Color;

/// Upper bound for panel sides and border margins; keeps pixel arithmetic inside `i32`.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub source: SourceConfig,
    pub http: HttpConfig,
    pub display: DisplayConfig,
    pub caption: CaptionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub random_file_url: String,
    pub placeholder_caption: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            random_file_url: "https://commons.wikimedia.org/wiki/Special:Random/File".to_string(),
            placeholder_caption: "No description available.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Wikimedia asks clients to identify themselves with a contact address.
    pub user_agent: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "WikiFrame/0.1 (https://github.com/wiki-frame/wiki-frame; wiki-frame@example.org)".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub border_color: Color,
    pub border_px: u32,
    pub output_path: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 448,
            border_color: Color::BLACK,
            border_px: 0,
            output_path: PathBuf::from("wiki-frame.png"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Tried in order; the built-in face is used when none of them loads.
    pub font_paths: Vec<PathBuf>,
    pub font_size: f32,
    pub padding: u32,
    pub text_color: Color,
    pub backdrop_color: Color,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        let style = CaptionStyle::default();
        Self {
            font_paths: vec![PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf")],
            font_size: 18.0,
            padding: style.padding,
            text_color: style.text_color,
            backdrop_color: style.backdrop_color,
        }
    }
}

impl CaptionConfig {
    pub fn style(&self) -> CaptionStyle {
        CaptionStyle::new(self.text_color, self.backdrop_color, self.padding)
    }
}

impl FrameConfig {
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
            .map_err(|e| ApplicationError::ConfigurationError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, ApplicationError> {
        let config: FrameConfig =
            serde_json::from_str(raw).map_err(|e| ApplicationError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |msg: &str| Err(ApplicationError::ConfigurationError(msg.to_string()));

        if self.source.random_file_url.trim().is_empty() {
            return invalid("source.random_file_url must not be empty");
        }
        if self.http.user_agent.trim().is_empty() {
            return invalid("http.user_agent must not be empty");
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display.width and display.height must be positive");
        }
        if self.display.width > MAX_DIMENSION || self.display.height > MAX_DIMENSION {
            return invalid("display.width and display.height must be at most 16384");
        }
        if self.display.border_px > MAX_DIMENSION {
            return invalid("display.border_px must be at most 16384");
        }
        if !self.caption.font_size.is_finite() || self.caption.font_size <= 0.0 {
            return invalid("caption.font_size must be positive");
        }
        if self.caption.padding >= self.display.width / 2 {
            return invalid("caption.padding must be smaller than half the display width");
        }
        Ok(())
    }
}
