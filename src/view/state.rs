//! Pure state transitions for the generator view.
//!
//! [`reduce`] never performs I/O. It returns the next state plus a list of
//! effects (notify, submit a request, release or save an image) for the host
//! to carry out.

use crate::download::download_file_name;
use crate::image::{is_blank, GenerationRequest};
use crate::notify::Notification;
use crate::resource::ImageHandle;
use serde::Serialize;
use std::time::SystemTime;

/// Preset prompts offered while the view is empty.
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "a futuristic city at sunset",
    "a magical forest with glowing mushrooms",
    "abstract art with vibrant colors",
];

/// Identifies one submitted request. Results carrying any other ticket are stale.
pub type Ticket = u64;

/// Coarse lifecycle of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// Nothing in flight, nothing displayed.
    Idle,
    /// A request is in flight.
    Generating,
    /// Nothing in flight, an image is displayed.
    Done,
}

/// Everything the view remembers. Only [`reduce`] produces new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    prompt: String,
    is_generating: bool,
    generated_image: Option<ImageHandle>,
    in_flight: Option<Ticket>,
    next_ticket: Ticket,
    torn_down: bool,
}

impl ViewState {
    /// Initial state: idle, empty prompt, no image.
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            is_generating: false,
            generated_image: None,
            in_flight: None,
            next_ticket: 1,
            torn_down: false,
        }
    }

    /// Current prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// True while a request is in flight.
    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Handle of the displayed image.
    pub fn generated_image(&self) -> Option<&ImageHandle> {
        self.generated_image.as_ref()
    }

    /// True once the view has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Ticket of the request currently awaited, if any.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Lifecycle derived from the generating flag and the image.
    pub fn status(&self) -> GenerationStatus {
        if self.is_generating {
            GenerationStatus::Generating
        } else if self.generated_image.is_some() {
            GenerationStatus::Done
        } else {
            GenerationStatus::Idle
        }
    }

    /// True if a result for `ticket` should still be applied.
    pub fn awaits(&self, ticket: Ticket) -> bool {
        !self.torn_down && self.in_flight == Some(ticket)
    }

    /// Prompt edits are locked while a request is in flight.
    pub fn prompt_editable(&self) -> bool {
        !self.torn_down && !self.is_generating
    }

    /// Whether the generate control is enabled.
    pub fn can_generate(&self) -> bool {
        self.prompt_editable() && !is_blank(&self.prompt)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs to the view.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// The user edited the prompt.
    PromptChanged(String),
    /// Index into [`EXAMPLE_PROMPTS`].
    ExampleSelected(usize),
    /// The generate control was pressed.
    GenerateClicked,
    /// The service answered with an image, already registered as `handle`.
    GenerationSucceeded {
        /// Ticket of the request that produced it.
        ticket: Ticket,
        /// Where the bytes live.
        handle: ImageHandle,
    },
    /// The request failed in any way.
    GenerationFailed {
        /// Ticket of the failed request.
        ticket: Ticket,
    },
    /// The download control was pressed.
    DownloadClicked {
        /// Names the saved file.
        at: SystemTime,
    },
    /// The view is going away.
    Teardown,
}

/// Work the host must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    /// Show a toast.
    Notify(Notification),
    /// Send this request to the image service and report back with `ticket`.
    Submit {
        /// Identifies the answer.
        ticket: Ticket,
        /// Body to send.
        request: GenerationRequest,
    },
    /// The handle is no longer displayed; free its bytes.
    Release(ImageHandle),
    /// Save the bytes behind `handle` as `file_name`.
    Save {
        /// Image to save.
        handle: ImageHandle,
        /// `ai-generated-<ms>.png`.
        file_name: String,
    },
}

/// Applies one event, returning the next state and the effects to perform.
pub fn reduce(state: &ViewState, event: ViewEvent) -> (ViewState, Vec<ViewEffect>) {
    let mut next = state.clone();
    let mut fx = Vec::new();

    match event {
        ViewEvent::PromptChanged(text) => {
            if next.prompt_editable() {
                next.prompt = text;
            }
        }
        ViewEvent::ExampleSelected(index) => {
            if let Some(example) = EXAMPLE_PROMPTS.get(index) {
                if next.prompt_editable() {
                    next.prompt = (*example).to_string();
                }
            }
        }
        ViewEvent::GenerateClicked => {
            if next.torn_down || next.is_generating {
                // The control is disabled in this state.
            } else if is_blank(&next.prompt) {
                fx.push(ViewEffect::Notify(Notification::empty_prompt()));
            } else {
                if let Some(old) = next.generated_image.take() {
                    fx.push(ViewEffect::Release(old));
                }
                let ticket = next.next_ticket;
                next.next_ticket += 1;
                next.in_flight = Some(ticket);
                next.is_generating = true;
                fx.push(ViewEffect::Submit {
                    ticket,
                    request: GenerationRequest::new(next.prompt.clone()),
                });
            }
        }
        ViewEvent::GenerationSucceeded { ticket, handle } => {
            if next.awaits(ticket) {
                next.in_flight = None;
                next.is_generating = false;
                if let Some(old) = next.generated_image.replace(handle) {
                    fx.push(ViewEffect::Release(old));
                }
                fx.push(ViewEffect::Notify(Notification::generated()));
            } else {
                fx.push(ViewEffect::Release(handle));
            }
        }
        ViewEvent::GenerationFailed { ticket } => {
            if next.awaits(ticket) {
                next.in_flight = None;
                next.is_generating = false;
                fx.push(ViewEffect::Notify(Notification::generation_failed()));
            }
        }
        ViewEvent::DownloadClicked { at } => {
            if let Some(handle) = next.generated_image.as_ref() {
                fx.push(ViewEffect::Save {
                    handle: handle.clone(),
                    file_name: download_file_name(at),
                });
            }
        }
        ViewEvent::Teardown => {
            if let Some(old) = next.generated_image.take() {
                fx.push(ViewEffect::Release(old));
            }
            next.in_flight = None;
            next.is_generating = false;
            next.torn_down = true;
        }
    }

    (next, fx)
}
