//! Image service implementations.

mod webhook;

pub use webhook::{WebhookProvider, WebhookProviderBuilder, DEFAULT_ENDPOINT, ENDPOINT_ENV};
