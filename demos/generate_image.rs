//! Basic image generation example.
//!
//! Run with: `cargo run --example generate_image -- "a futuristic city at sunset"`
//!
//! Set `PROMPTCANVAS_ENDPOINT` to use a webhook other than the default.

use promptcanvas::{GenerationController, NotificationLog, Outcome, WebhookProvider};

#[tokio::main]
async fn main() -> promptcanvas::Result<()> {
    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| promptcanvas::EXAMPLE_PROMPTS[0].to_string());

    let provider = WebhookProvider::builder().build()?;
    let notices = NotificationLog::new();
    let mut controller = GenerationController::with_notifier(provider, notices.clone());

    controller.set_prompt(prompt);
    let outcome = controller.request_generation().await;

    for n in notices.drain() {
        println!("[{:?}] {}: {}", n.severity, n.title, n.description);
    }

    if let Outcome::Generated(handle) = outcome {
        let path = controller.download()?;
        println!("Saved {} as {}", handle, path.display());
    }

    Ok(())
}
