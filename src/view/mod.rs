//! Generator view: state machine and render model.

mod render;
mod state;

pub use render::{
    ViewModel, EXAMPLES_HEADING, GENERATE_LABEL, GENERATING_LABEL, PROMPT_LABEL,
    PROMPT_PLACEHOLDER, SPINNER_TEXT, TAGLINE, TITLE,
};
pub use state::{
    reduce, GenerationStatus, Ticket, ViewEffect, ViewEvent, ViewState, EXAMPLE_PROMPTS,
};
