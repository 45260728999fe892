//! Image generation module.

mod provider;
pub mod providers;
mod types;

pub use provider::ImageService;
pub use types::{is_blank, GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat};
