#![warn(missing_docs)]
//! PromptCanvas - turn a text prompt into an image through a generation webhook.
//!
//! The crate models a single generator view: a prompt, a generate action
//! that POSTs `{"prompt": ...}` to a remote service, and the returned image
//! with a download action. The view itself is a pure state machine
//! ([`view::reduce`]); [`GenerationController`] runs it against a real
//! [`ImageService`].
//!
//! # Quick Start
//!
//! ```no_run
//! use promptcanvas::{GenerationController, Outcome, WebhookProvider};
//!
//! #[tokio::main]
//! async fn main() -> promptcanvas::Result<()> {
//!     let provider = WebhookProvider::builder().build()?;
//!     let mut controller = GenerationController::new(provider).download_dir("out");
//!
//!     controller.set_prompt("a raccoon DJ at a rooftop party");
//!     if let Outcome::Generated(_) = controller.request_generation().await {
//!         let path = controller.download()?;
//!         println!("saved {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The webhook URL defaults to [`DEFAULT_ENDPOINT`]. Set `PROMPTCANVAS_ENDPOINT`
//! or call [`WebhookProviderBuilder::endpoint`] to point elsewhere.
//!
//! # Features
//!
//! - `cli` (default): the `promptcanvas` command-line binary.

pub mod controller;
pub mod download;
mod error;
pub mod image;
pub mod notify;
pub mod resource;
pub mod view;

// Re-export error types at crate root
pub use error::{CanvasError, ErrorKind, Result};

pub use controller::{GenerationController, Outcome, PendingGeneration};
pub use image::providers::{
    WebhookProvider, WebhookProviderBuilder, DEFAULT_ENDPOINT, ENDPOINT_ENV,
};
pub use image::{GeneratedImage, GenerationRequest, ImageFormat, ImageService};
pub use notify::{Notification, NotificationLog, Notifier, Severity, TracingNotifier};
pub use resource::{ImageHandle, ResourceRegistry};
pub use view::{GenerationStatus, ViewEffect, ViewEvent, ViewModel, ViewState, EXAMPLE_PROMPTS};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::controller::{GenerationController, Outcome};
    pub use crate::error::{CanvasError, Result};
    pub use crate::image::providers::WebhookProvider;
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageService};
    pub use crate::notify::{Notification, Notifier};
}
