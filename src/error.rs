//! Error types for prompt-to-image generation.

/// Which user-facing bucket an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The prompt was rejected locally; no request was made.
    Validation,
    /// Anything that went wrong while talking to the image service.
    Generation,
}

/// Errors that can occur while generating or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Prompt was empty or whitespace-only.
    #[error("prompt is empty")]
    EmptyPrompt,

    /// Service returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if it was readable.
        message: String,
    },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be read as image data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Download requested while no image is displayed.
    #[error("no generated image to download")]
    NoImage,
}

impl CanvasError {
    /// Maps the error onto the two user-facing categories.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPrompt => ErrorKind::Validation,
            _ => ErrorKind::Generation,
        }
    }

    /// Returns true if the user can fix this by changing their input.
    pub fn is_user_fault(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, CanvasError>;
