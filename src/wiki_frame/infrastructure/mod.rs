pub mod error;
pub mod external_image_fetcher;
pub mod file_display;
pub mod font_provider;
pub mod http_client;
pub mod image_processor;
pub mod wikimedia_source;
