use crate::domain::image_resource::ImageResource;
use crate::infrastructure::error::InfrastructureError;

#[cfg_attr(test, mockall::automock)]
pub trait ImageSource {
    fn resolve(&self) -> Result<ImageResource, InfrastructureError>;
}
