//! CLI for PromptCanvas - prompt-to-image via a generation webhook.

use clap::{Args, Parser, Subcommand};
use promptcanvas::{
    view, GenerationController, ImageService, Notification, Notifier, Outcome, Severity,
    WebhookProvider, EXAMPLE_PROMPTS,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "promptcanvas")]
#[command(about = "Generate images from text prompts via an image-generation webhook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Webhook URL (defaults to the built-in endpoint)
    #[arg(long, global = true, env = "PROMPTCANVAS_ENDPOINT")]
    endpoint: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image from a text prompt and save it
    Generate(GenerateArgs),

    /// List the example prompts
    Examples,

    /// Interactive session: edit the prompt, generate, download
    Interactive(InteractiveArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// The text prompt describing the image
    prompt: String,

    /// Directory to save the image into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Args)]
struct InteractiveArgs {
    /// Directory downloads are saved into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

/// Prints notifications to stderr, the way a toast would pop up.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, n: Notification) {
        let marker = match n.severity {
            Severity::Info => "✓",
            Severity::Error => "✗",
        };
        eprintln!("{} {}: {}", marker, n.title, n.description);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("promptcanvas={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate(args) => {
            let provider = build_provider(cli.endpoint)?;
            generate(provider, args, cli.json).await?;
        }
        Commands::Examples => {
            list_examples(cli.json)?;
        }
        Commands::Interactive(args) => {
            let provider = build_provider(cli.endpoint)?;
            interactive(provider, args).await?;
        }
    }

    Ok(())
}

fn build_provider(endpoint: Option<String>) -> anyhow::Result<WebhookProvider> {
    let mut builder = WebhookProvider::builder();
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint(endpoint);
    }
    let provider = builder.build()?;
    tracing::debug!(endpoint = provider.endpoint(), "using webhook");
    Ok(provider)
}

async fn generate(
    provider: WebhookProvider,
    args: GenerateArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let mut controller = GenerationController::with_notifier(provider, StderrNotifier)
        .download_dir(&args.output_dir);
    controller.set_prompt(&args.prompt);

    match controller.request_generation().await {
        Outcome::Generated(_) => {}
        Outcome::Rejected => anyhow::bail!("prompt is empty"),
        Outcome::Failed => anyhow::bail!("image generation failed"),
        Outcome::Busy | Outcome::Discarded => anyhow::bail!("generation did not complete"),
    }

    let path = controller.download()?;
    let size = controller.image_bytes().map(<[u8]>::len).unwrap_or(0);

    if json_output {
        let result = serde_json::json!({
            "type": "image",
            "success": true,
            "output": path.display().to_string(),
            "size_bytes": size,
            "prompt": controller.state().prompt(),
            "service": controller.service().name(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Generated image: {} ({} bytes)", path.display(), size);
    }

    Ok(())
}

fn list_examples(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&EXAMPLE_PROMPTS)?);
    } else {
        println!("{}\n", view::EXAMPLES_HEADING);
        for (i, example) in EXAMPLE_PROMPTS.iter().enumerate() {
            println!("  {}. {}", i + 1, example);
        }
    }
    Ok(())
}

const HELP: &str = "\
Type a prompt to set it, or use a command:
  /example N   use example prompt N (1-3)
  /generate    generate an image from the current prompt
  /download    save the displayed image
  /show        print the current view
  /help        show this help
  /quit        exit";

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    SetPrompt(&'a str),
    /// Zero-based index into `EXAMPLE_PROMPTS`.
    Example(usize),
    Generate,
    Download,
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim_end();
    if !line.starts_with('/') {
        return Command::SetPrompt(line);
    }
    let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
    match name {
        "/quit" => Command::Quit,
        "/help" => Command::Help,
        "/show" => Command::Show,
        "/generate" => Command::Generate,
        "/download" => Command::Download,
        "/example" => match arg.trim().parse::<usize>() {
            Ok(n) if (1..=EXAMPLE_PROMPTS.len()).contains(&n) => Command::Example(n - 1),
            _ => Command::Invalid(format!("usage: /example 1-{}", EXAMPLE_PROMPTS.len())),
        },
        other => Command::Invalid(format!("unknown command {other}, try /help")),
    }
}

async fn interactive(provider: WebhookProvider, args: InteractiveArgs) -> anyhow::Result<()> {
    let mut controller = GenerationController::with_notifier(provider, StderrNotifier)
        .download_dir(&args.output_dir);

    println!("{}\n{}\n", view::TITLE, view::TAGLINE);
    println!("{HELP}\n");
    list_examples(false)?;
    println!("\n{} ({})", view::PROMPT_LABEL, view::PROMPT_PLACEHOLDER);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => show(&controller),
            Command::Example(index) => {
                controller.select_example(index);
                println!("Prompt: {}", controller.state().prompt());
            }
            Command::Generate => {
                println!("{}", view::SPINNER_TEXT);
                if let Outcome::Generated(handle) = controller.request_generation().await {
                    println!("Image ready: {}", handle);
                    show(&controller);
                }
            }
            Command::Download => match controller.download() {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => eprintln!("{e}"),
            },
            Command::Invalid(message) => eprintln!("{message}"),
            Command::SetPrompt(text) => controller.set_prompt(text),
        }
    }

    controller.teardown();
    Ok(())
}

fn show<S: ImageService, N: Notifier>(controller: &GenerationController<S, N>) {
    let vm = controller.view_model();
    println!("Status:   {:?}", vm.status);
    println!("Prompt:   {}", vm.prompt);
    if let Some(image) = &vm.image {
        let bytes = controller.image_bytes().map_or(0, <[u8]>::len);
        println!("Image:    {} ({} bytes)", image, bytes);
    }
    if let Some(caption) = &vm.caption {
        println!("Caption:  {}", caption);
    }
    println!(
        "Generate: {}",
        if vm.generate_enabled { "enabled" } else { "disabled" }
    );
}
