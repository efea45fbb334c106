use crate::domain::frame::Bitmap;
use crate::infrastructure::error::InfrastructureError;

#[cfg_attr(test, mockall::automock)]
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<Bitmap, InfrastructureError>;
}
