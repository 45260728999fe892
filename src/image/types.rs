//! Core types for image generation.

use crate::error::{CanvasError, Result};
use serde::{Deserialize, Serialize};

/// Image formats recognised in service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
    /// GIF format.
    Gif,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// A request to generate an image.
///
/// Serializes to the webhook body `{"prompt": "..."}`. The prompt is sent
/// exactly as typed; trimming only applies to the emptiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Rejects blank prompts.
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.prompt) {
            return Err(CanvasError::EmptyPrompt);
        }
        Ok(())
    }
}

/// True for empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Diagnostics about a completed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Endpoint the request was sent to.
    pub endpoint: Option<String>,
    /// HTTP status of the response.
    pub status: Option<u16>,
    /// `Content-Type` reported by the service, if any. Never validated.
    pub content_type: Option<String>,
    /// Round-trip duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A generated image with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated image should be displayed or saved"]
pub struct GeneratedImage {
    /// Raw image bytes, exactly as returned.
    pub data: Vec<u8>,
    /// Format sniffed from the bytes, if recognisable.
    pub format: Option<ImageFormat>,
    /// Request diagnostics.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Wraps raw bytes, sniffing the format. Empty data is a decode failure.
    pub fn from_bytes(data: Vec<u8>, metadata: GenerationMetadata) -> Result<Self> {
        if data.is_empty() {
            return Err(CanvasError::Decode("response body was empty".into()));
        }
        let format = ImageFormat::from_magic_bytes(&data);
        Ok(Self {
            data,
            format,
            metadata,
        })
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the image as a data URL.
    pub fn to_data_url(&self) -> String {
        let mime = self
            .format
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream");
        format!("data:{};base64,{}", mime, self.to_base64())
    }
}
