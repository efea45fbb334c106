use super::error::ApplicationError;
use crate::domain::display_trait::Display;
use crate::domain::frame::{Canvas, Resolution};
use crate::domain::image_fetcher_trait::ImageFetcher;
use crate::domain::image_processor_trait::ImageProcessor;
use crate::domain::image_source_trait::ImageSource;

/// Runs the whole pipeline once: resolve, fetch, fit, annotate, show.
///
/// Every stage is terminal on failure. The display is only touched after the
/// frame has been fully composed, so a failed run leaves the panel as it was.
pub struct FrameService {
    source: Box<dyn ImageSource>,
    fetcher: Box<dyn ImageFetcher>,
    image_processor: Box<dyn ImageProcessor>,
}

impl FrameService {
    pub fn new(
        source: Box<dyn ImageSource>,
        fetcher: Box<dyn ImageFetcher>,
        image_processor: Box<dyn ImageProcessor>,
    ) -> Self {
        Self {
            source,
            fetcher,
            image_processor,
        }
    }

    pub fn compose(&self, target: Resolution) -> Result<Canvas, ApplicationError> {
        let resource = self.source.resolve()?;
        let image = self.fetcher.fetch(&resource.url)?;
        let canvas = self.image_processor.fit_to_display(&image, target)?;
        Ok(self.image_processor.overlay_caption(canvas, &resource.caption))
    }

    pub fn render(display: &mut dyn Display, canvas: &Canvas) -> Result<(), ApplicationError> {
        display.set_image(canvas)?;
        display.show()?;
        Ok(())
    }

    pub fn run(&self, display: &mut dyn Display) -> Result<(), ApplicationError> {
        let canvas = self.compose(display.resolution())?;
        log::info!("Displaying the image");
        Self::render(display, &canvas)?;
        log::info!("Image displayed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::caption_style::CaptionStyle;
    use crate::domain::display_trait::MockDisplay;
    use crate::domain::image_fetcher_trait::MockImageFetcher;
    use crate::domain::image_processor_trait::MockImageProcessor;
    use crate::domain::image_resource::ImageResource;
    use crate::domain::image_source_trait::MockImageSource;
    use crate::infrastructure::error::InfrastructureError;
    use crate::infrastructure::font_provider::BuiltinFace;
    use crate::infrastructure::image_processor::DefaultImageProcessor;
    use image::{DynamicImage, RgbImage};

    const INKY: Resolution = Resolution::new(600, 448);
    const IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/a/ab/Harbor.jpg";

    fn source_ok() -> MockImageSource {
        let mut source = MockImageSource::new();
        source.expect_resolve().times(1).returning(|| {
            Ok(ImageResource::new(
                IMAGE_URL.to_string(),
                "A view of the harbor at sunset.".to_string(),
            ))
        });
        source
    }

    fn fetcher_ok(width: u32, height: u32) -> MockImageFetcher {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.ends_with("Harbor.jpg"))
            .times(1)
            .returning(move |_| Ok(DynamicImage::new_rgb8(width, height)));
        fetcher
    }

    fn untouched_display() -> MockDisplay {
        let mut display = MockDisplay::new();
        display.expect_resolution().return_const(INKY);
        display.expect_set_image().times(0);
        display.expect_show().times(0);
        display
    }

    #[test]
    fn test_run_success_shows_fitted_frame_once() {
        let processor = DefaultImageProcessor::new(Box::new(BuiltinFace), CaptionStyle::default());
        let service = FrameService::new(Box::new(source_ok()), Box::new(fetcher_ok(1200, 500)), Box::new(processor));

        let mut display = MockDisplay::new();
        display.expect_resolution().return_const(INKY);
        display
            .expect_set_image()
            .withf(|canvas| canvas.dimensions() == (600, 448))
            .times(1)
            .returning(|_| Ok(()));
        display.expect_show().times(1).returning(|| Ok(()));

        assert!(service.run(&mut display).is_ok());
    }

    #[test]
    fn test_run_passes_caption_to_overlay() {
        let mut processor = MockImageProcessor::new();
        processor
            .expect_fit_to_display()
            .withf(|_, target| *target == INKY)
            .times(1)
            .returning(|_, target| Ok(RgbImage::new(target.width, target.height)));
        processor
            .expect_overlay_caption()
            .withf(|_, caption| caption == "A view of the harbor at sunset.")
            .times(1)
            .returning(|canvas, _| canvas);
        let service = FrameService::new(Box::new(source_ok()), Box::new(fetcher_ok(10, 10)), Box::new(processor));

        let canvas = service.compose(INKY).unwrap();
        assert_eq!(canvas.dimensions(), (600, 448));
    }

    #[test]
    fn test_parse_error_stops_before_fetch_and_display() {
        let mut source = MockImageSource::new();
        source
            .expect_resolve()
            .returning(|| Err(InfrastructureError::ParseError("no direct file link".to_string())));
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().times(0);
        let service = FrameService::new(Box::new(source), Box::new(fetcher), Box::new(MockImageProcessor::new()));

        let mut display = untouched_display();
        let err = service.run(&mut display).unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[test]
    fn test_download_failure_leaves_display_untouched() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Err(InfrastructureError::NetworkError("HTTP status client error (404 Not Found)".to_string())));
        let mut processor = MockImageProcessor::new();
        processor.expect_fit_to_display().times(0);
        let service = FrameService::new(Box::new(source_ok()), Box::new(fetcher), Box::new(processor));

        let mut display = untouched_display();
        match service.run(&mut display) {
            Err(ApplicationError::InfrastructureError(InfrastructureError::NetworkError(msg))) => {
                assert!(msg.contains("404"));
            }
            other => panic!("Expected NetworkError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_leaves_display_untouched() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Err(InfrastructureError::DecodeError("unsupported format".to_string())));
        let service = FrameService::new(Box::new(source_ok()), Box::new(fetcher), Box::new(MockImageProcessor::new()));

        let err = service.run(&mut untouched_display()).unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_device_error_is_reported() {
        let processor = DefaultImageProcessor::new(Box::new(BuiltinFace), CaptionStyle::default());
        let service = FrameService::new(Box::new(source_ok()), Box::new(fetcher_ok(800, 600)), Box::new(processor));

        let mut display = MockDisplay::new();
        display.expect_resolution().return_const(INKY);
        display
            .expect_set_image()
            .returning(|_| Err(InfrastructureError::DeviceError("panel busy".to_string())));
        display.expect_show().times(0);

        let err = service.run(&mut display).unwrap_err();
        assert_eq!(err.kind(), "DeviceError");
    }
}
