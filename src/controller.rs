//! Drives the view state machine against a real image service.

use crate::download::save_to_dir;
use crate::error::{CanvasError, Result};
use crate::image::{GeneratedImage, GenerationRequest, ImageService};
use crate::notify::{Notifier, TracingNotifier};
use crate::resource::{ImageHandle, ResourceRegistry};
use crate::view::{reduce, Ticket, ViewEffect, ViewEvent, ViewModel, ViewState};
use std::path::PathBuf;
use std::time::SystemTime;

/// How a call to [`GenerationController::request_generation`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank prompt; nothing was sent.
    Rejected,
    /// A request is already in flight or the view is gone.
    Busy,
    /// The image is now displayed.
    Generated(ImageHandle),
    /// The request failed; no image is displayed.
    Failed,
    /// The result arrived for a request the view no longer waits on.
    Discarded,
}

/// A request the view has committed to. Finish it with [`GenerationController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    /// Ticket to hand back to `complete`.
    pub ticket: Ticket,
    /// Body to send.
    pub request: GenerationRequest,
}

/// Owns the view state, the image bytes, and the service it talks to.
pub struct GenerationController<S, N = TracingNotifier> {
    service: S,
    notifier: N,
    state: ViewState,
    resources: ResourceRegistry,
    download_dir: PathBuf,
}

impl<S: ImageService> GenerationController<S> {
    /// Controller that reports notifications through `tracing`.
    pub fn new(service: S) -> Self {
        Self::with_notifier(service, TracingNotifier)
    }
}

impl<S: ImageService, N: Notifier> GenerationController<S, N> {
    /// Controller that sends notifications to `notifier`.
    pub fn with_notifier(service: S, notifier: N) -> Self {
        Self {
            service,
            notifier,
            state: ViewState::new(),
            resources: ResourceRegistry::new(),
            download_dir: PathBuf::from("."),
        }
    }

    /// Directory `download` writes into. Defaults to the working directory.
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// What a renderer should draw right now.
    pub fn view_model(&self) -> ViewModel {
        ViewModel::from_state(&self.state)
    }

    /// The image service requests go to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Bytes of the displayed image.
    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.state
            .generated_image()
            .and_then(|h| self.resources.resolve(h))
    }

    /// Number of image handles still holding bytes.
    pub fn live_resources(&self) -> usize {
        self.resources.len()
    }

    /// Replaces the prompt text. Ignored while a request is in flight.
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.apply(ViewEvent::PromptChanged(text.into()));
    }

    /// Copies a preset into the prompt. Does not generate.
    pub fn select_example(&mut self, index: usize) {
        self.apply(ViewEvent::ExampleSelected(index));
    }

    /// Validates the prompt and sends it to the service, suspending until the
    /// response is applied. Failures end up as a notification, never as an error.
    pub async fn request_generation(&mut self) -> Outcome {
        if !self.state.prompt_editable() {
            return Outcome::Busy;
        }
        let Some(pending) = self.begin_generation() else {
            return Outcome::Rejected;
        };
        let result = self.service.generate(&pending.request).await;
        self.complete(pending.ticket, result)
    }

    /// First half of [`request_generation`](Self::request_generation), for
    /// hosts that run the request themselves. `None` if nothing should be sent.
    pub fn begin_generation(&mut self) -> Option<PendingGeneration> {
        self.apply(ViewEvent::GenerateClicked)
            .into_iter()
            .find_map(|effect| match effect {
                ViewEffect::Submit { ticket, request } => {
                    tracing::debug!(
                        ticket,
                        prompt_len = request.prompt.len(),
                        "generation started"
                    );
                    Some(PendingGeneration { ticket, request })
                }
                _ => None,
            })
    }

    /// Applies the service's answer for `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<GeneratedImage>) -> Outcome {
        if !self.state.awaits(ticket) {
            tracing::debug!(ticket, "dropping result for a request no longer awaited");
        }

        match result {
            Ok(image) => {
                let bytes = image.size();
                let handle = self.resources.create(image.data);
                self.apply(ViewEvent::GenerationSucceeded {
                    ticket,
                    handle: handle.clone(),
                });
                if self.state.generated_image() == Some(&handle) {
                    tracing::info!(ticket, bytes, "image generated");
                    Outcome::Generated(handle)
                } else {
                    Outcome::Discarded
                }
            }
            Err(err) => {
                if !self.state.awaits(ticket) {
                    return Outcome::Discarded;
                }
                tracing::error!(ticket, error = %err, "error generating image");
                self.apply(ViewEvent::GenerationFailed { ticket });
                Outcome::Failed
            }
        }
    }

    /// Saves the displayed image as `ai-generated-<ms>.png` in the download dir.
    pub fn download(&mut self) -> Result<PathBuf> {
        let effects = self.apply(ViewEvent::DownloadClicked {
            at: SystemTime::now(),
        });
        let (handle, file_name) = effects
            .into_iter()
            .find_map(|effect| match effect {
                ViewEffect::Save { handle, file_name } => Some((handle, file_name)),
                _ => None,
            })
            .ok_or(CanvasError::NoImage)?;
        let data = self.resources.resolve(&handle).ok_or(CanvasError::NoImage)?;
        save_to_dir(&self.download_dir, &file_name, data)
    }

    /// Releases every image and stops accepting results.
    pub fn teardown(&mut self) {
        self.apply(ViewEvent::Teardown);
        self.resources.clear();
    }

    /// Runs one transition and performs the effects the controller owns.
    /// `Submit` and `Save` are handed back to the caller.
    fn apply(&mut self, event: ViewEvent) -> Vec<ViewEffect> {
        let (next, effects) = reduce(&self.state, event);
        self.state = next;

        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                ViewEffect::Notify(notification) => self.notifier.notify(notification),
                ViewEffect::Release(handle) => {
                    self.resources.revoke(&handle);
                }
                other => rest.push(other),
            }
        }
        rest
    }
}
