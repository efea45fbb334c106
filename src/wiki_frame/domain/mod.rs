pub mod caption;
pub mod caption_style;
pub mod color;
pub mod crop_window;
pub mod display_trait;
pub mod error;
pub mod frame;
pub mod image_fetcher_trait;
pub mod image_processor_trait;
pub mod image_resource;
pub mod image_source_trait;
pub mod typeface;
