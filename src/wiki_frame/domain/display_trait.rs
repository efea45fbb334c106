use crate::domain::color::Color;
use crate::domain::frame::{Canvas, Resolution};
use crate::infrastructure::error::InfrastructureError;

/// A fixed-resolution output panel. Owned by the top-level run and handed to the
/// pipeline; nothing reaches the panel until `show` commits the staged frame.
#[cfg_attr(test, mockall::automock)]
pub trait Display {
    fn resolution(&self) -> Resolution;

    fn set_border(&mut self, color: Color);

    /// Stages a frame. Fails with `DeviceError` when its size differs from `resolution()`.
    fn set_image(&mut self, canvas: &Canvas) -> Result<(), InfrastructureError>;

    /// Commits the staged frame to the panel.
    fn show(&mut self) -> Result<(), InfrastructureError>;
}
