//! The remote image service seam.

use crate::error::Result;
use crate::image::types::{GeneratedImage, GenerationRequest};
use async_trait::async_trait;

/// Something that turns a prompt into image bytes.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Generates an image from the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;

    /// Returns the name of this service for display.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ImageService + ?Sized> ImageService for Box<T> {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
