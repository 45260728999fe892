//! What a renderer should draw for a given [`ViewState`].

use crate::resource::ImageHandle;
use crate::view::state::{GenerationStatus, ViewState, EXAMPLE_PROMPTS};
use serde::Serialize;

/// Page heading.
pub const TITLE: &str = "AI Image Generator";
/// Line under the heading.
pub const TAGLINE: &str = "Transform your ideas into stunning visuals with the power of AI";
/// Label above the prompt input.
pub const PROMPT_LABEL: &str = "Describe your image";
/// Hint shown in an empty prompt input.
pub const PROMPT_PLACEHOLDER: &str = "e.g., a raccoon DJ at a rooftop party, digital art style";
/// Generate button, idle.
pub const GENERATE_LABEL: &str = "Generate Image";
/// Generate button, in flight.
pub const GENERATING_LABEL: &str = "Generating...";
/// Text under the spinner.
pub const SPINNER_TEXT: &str = "Creating your masterpiece...";
/// Heading above the example prompts.
pub const EXAMPLES_HEADING: &str = "Try these examples:";

/// Render-ready snapshot of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Lifecycle.
    pub status: GenerationStatus,
    /// Prompt input contents.
    pub prompt: String,
    /// False while generating.
    pub prompt_editable: bool,
    /// Generate control enabled: idle with a non-blank prompt.
    pub generate_enabled: bool,
    /// Text on the generate control.
    pub generate_label: &'static str,
    /// Result panel is shown while generating or once an image exists.
    pub show_result_panel: bool,
    /// Spinner text while generating.
    pub spinner: Option<&'static str>,
    /// Address of the displayed image.
    pub image: Option<String>,
    /// Caption under the image: whatever the prompt holds now, which may
    /// differ from the prompt that produced the image.
    pub caption: Option<String>,
    /// Download control shown.
    pub download_visible: bool,
    /// Example prompts shown: no image and not generating.
    pub show_examples: bool,
    /// Example prompts to offer; empty when hidden.
    pub examples: Vec<&'static str>,
}

impl ViewModel {
    /// Derives the render model from a state.
    pub fn from_state(state: &ViewState) -> Self {
        let generating = state.is_generating();
        let image = state.generated_image().map(ImageHandle::url);
        let has_image = image.is_some();
        let show_examples = !has_image && !generating;

        Self {
            status: state.status(),
            prompt: state.prompt().to_string(),
            prompt_editable: state.prompt_editable(),
            generate_enabled: state.can_generate(),
            generate_label: if generating {
                GENERATING_LABEL
            } else {
                GENERATE_LABEL
            },
            show_result_panel: generating || has_image,
            spinner: generating.then_some(SPINNER_TEXT),
            caption: has_image.then(|| state.prompt().to_string()),
            download_visible: has_image,
            image,
            show_examples,
            examples: if show_examples {
                EXAMPLE_PROMPTS.to_vec()
            } else {
                Vec::new()
            },
        }
    }
}

impl From<&ViewState> for ViewModel {
    fn from(state: &ViewState) -> Self {
        Self::from_state(state)
    }
}
