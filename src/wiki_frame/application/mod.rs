pub mod error;
pub mod frame_service;
