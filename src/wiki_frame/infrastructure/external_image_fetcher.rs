use std::io::Cursor;

use base64::decode;
use image::io::Reader as ImageReader;

use super::error::InfrastructureError;
use super::http_client::HttpClient;
use crate::domain::frame::Bitmap;
use crate::domain::image_fetcher_trait::ImageFetcher;

/// Downloads the resolved file and decodes it, guessing the format from its bytes.
/// `data:` URLs are decoded in place without touching the network.
pub struct DefaultExternalImageFetcher {
    http: Box<dyn HttpClient>,
}

impl DefaultExternalImageFetcher {
    pub fn new(http: Box<dyn HttpClient>) -> Self {
        Self { http }
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, InfrastructureError> {
        if url.starts_with("data:") {
            let base64_data = url
                .split(',')
                .nth(1)
                .ok_or_else(|| InfrastructureError::DecodeError("Invalid data URL: missing comma".to_string()))?;
            Ok(decode(base64_data)?)
        } else {
            Ok(self.http.get(url)?.body)
        }
    }
}

impl ImageFetcher for DefaultExternalImageFetcher {
    fn fetch(&self, url: &str) -> Result<Bitmap, InfrastructureError> {
        log::info!("Downloading image from URL: {}", url);
        let bytes = self.fetch_bytes(url)?;

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| InfrastructureError::DecodeError(format!("could not sniff image format: {}", e)))?;
        let format = reader.format();
        let image = reader.decode()?;
        log::info!(
            "Decoded {:?} image: {}x{} {:?}",
            format,
            image.width(),
            image.height(),
            image.color()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::{HttpResponse, MockHttpClient};
    use image::{ImageOutputFormat, Rgb, RgbImage};

    // 1x1 の透明な PNG
    const TINY_PNG_BASE64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut buffer = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn fetcher_returning(result: Result<Vec<u8>, String>) -> DefaultExternalImageFetcher {
        let mut mock = MockHttpClient::new();
        mock.expect_get().times(1).returning(move |url| match &result {
            Ok(body) => Ok(HttpResponse {
                final_url: url.to_string(),
                body: body.clone(),
            }),
            Err(msg) => Err(InfrastructureError::NetworkError(msg.clone())),
        });
        DefaultExternalImageFetcher::new(Box::new(mock))
    }

    #[test]
    fn test_fetch_decodes_downloaded_png() {
        let fetcher = fetcher_returning(Ok(png_bytes(4, 3)));
        let image = fetcher.fetch("https://upload.wikimedia.org/a.png").unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn test_fetch_data_url_skips_network() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().times(0);
        let fetcher = DefaultExternalImageFetcher::new(Box::new(mock));

        let image = fetcher
            .fetch(&format!("data:image/png;base64,{}", TINY_PNG_BASE64))
            .unwrap();
        assert_eq!((image.width(), image.height()), (1, 1));
    }

    #[test]
    fn test_fetch_invalid_bytes_is_decode_error() {
        let fetcher = fetcher_returning(Ok(vec![1, 2, 3, 4]));
        match fetcher.fetch("https://upload.wikimedia.org/broken.jpg") {
            Err(InfrastructureError::DecodeError(_)) => {}
            other => panic!("Expected DecodeError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_fetch_bad_data_url_is_decode_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().times(0);
        let fetcher = DefaultExternalImageFetcher::new(Box::new(mock));

        assert!(matches!(
            fetcher.fetch("data:image/png;base64"),
            Err(InfrastructureError::DecodeError(_))
        ));
        assert!(matches!(
            fetcher.fetch("data:image/png;base64,@@@"),
            Err(InfrastructureError::DecodeError(_))
        ));
    }

    #[test]
    fn test_fetch_propagates_http_status_error() {
        let fetcher = fetcher_returning(Err("HTTP status client error (404 Not Found)".to_string()));
        assert!(matches!(
            fetcher.fetch("https://upload.wikimedia.org/missing.jpg"),
            Err(InfrastructureError::NetworkError(_))
        ));
    }
}
