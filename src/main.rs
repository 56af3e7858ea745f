use anyhow::Context;
use bead_convert::ResizeMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beadgrid::api::ConvertParams;
use beadgrid::error::ErrorPayload;
use beadgrid::models::{
    AppConfig, ProcessingRequest, ProcessingResult, ProgressEvent, Strategy,
};
use beadgrid::server;
use beadgrid::services::{load_png, PipelineOrchestrator};

#[derive(Parser)]
#[command(name = "beadgrid")]
#[command(about = "Beadgrid - turn photographs into bead and stitch bracelet patterns")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a PNG file into a pattern
    Convert(ConvertArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Source PNG file
    input: PathBuf,

    /// Pattern width in beads (4-80)
    #[arg(short, long)]
    width: Option<usize>,

    /// Pattern height in beads (4-80)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Maximum number of colors (2-12)
    #[arg(short, long)]
    colors: Option<usize>,

    /// Detail boost: 0 normal, 1 eligible, 2 sharpen
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=2))]
    detail: Option<u8>,

    /// Framing: fit, fill or subjectCenteredCrop
    #[arg(short, long)]
    mode: Option<ResizeMode>,

    /// Use Floyd-Steinberg dithering
    #[arg(long)]
    dither: bool,

    /// Shift greens and browns before quantizing
    #[arg(long)]
    auto_template: bool,

    /// Map onto the configured locked palette
    #[arg(long)]
    lock: bool,

    /// Locked palette as comma-separated hex colors (e.g. "#000000,#FFFFFF")
    #[arg(long)]
    palette: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run on the calling thread instead of the worker pool
    #[arg(long)]
    inline: bool,
}

impl ConvertArgs {
    fn params(&self) -> ConvertParams {
        ConvertParams {
            w: self.width,
            h: self.height,
            colors: self.colors,
            detail: self.detail,
            mode: self.mode,
            dither: self.dither.then_some(true),
            auto_template: self.auto_template.then_some(true),
            lock: self.lock.then_some(true),
            palette: self.palette.clone(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ProcessingResult JSON
    Json,
    /// Legend and character grid
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(args).await,
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert a PNG file directly (no server needed)
async fn run_convert_command(args: ConvertArgs) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadgrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::from_env();
    if args.inline {
        config.pipeline.strategy = Strategy::Inline;
    }
    let orchestrator = PipelineOrchestrator::from_config(&config.pipeline);

    let bitmap = load_png(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let settings = args.params().into_settings(&config)?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            eprintln!(
                "[{:>3}%] {}",
                event.percent,
                format!("{:?}", event.stage).to_lowercase()
            );
        }
    });

    let outcome = orchestrator
        .submit_with_fallback(ProcessingRequest::new(bitmap, settings), Some(tx))
        .await;
    // Sender is dropped once the pipeline finishes, which ends the printer.
    let _ = printer.await;

    match outcome {
        Ok(result) => {
            let rendered = render(&result, args.format)?;
            write_output(args.output.as_deref(), &rendered)?;
            eprintln!(
                "{}x{} pattern, {} colors (from {}), {} ms",
                result.width,
                result.height,
                result.stats.final_color_count,
                result.stats.original_color_count,
                result.stats.processing_time_ms
            );
            Ok(())
        }
        Err(e) => {
            if args.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&ErrorPayload::from(&e))?);
            }
            Err(e.into())
        }
    }
}

fn render(result: &ProcessingResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => result.to_text(),
    })
}

fn write_output(path: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

/// Show status information when run without arguments
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("Beadgrid v{VERSION}");
    println!("Photographs to bead and stitch bracelet patterns\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Effective configuration section
    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    println!("\nConfiguration:");
    println!(
        "  Strategy:  {} (fallback {})",
        config.pipeline.strategy,
        if config.pipeline.retry_with_fallback {
            "on"
        } else {
            "off"
        }
    );
    println!(
        "  Defaults:  {}x{}, {} colors, {} framing",
        config.defaults.target_width,
        config.defaults.target_height,
        config.defaults.max_colors,
        config.defaults.resize_mode
    );
    match &config.palette.locked {
        Some(colors) => println!("  Locked:    {}", colors.join(", ")),
        None => println!("  Locked:    (none)"),
    }

    // Commands section
    println!("\nCommands:");
    println!("  beadgrid serve            Start the HTTP server");
    println!("  beadgrid convert <PNG>    Convert a PNG file into a pattern");
    println!("  beadgrid --help           Show all options");
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadgrid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let state = server::create_app_state(AppConfig::from_env());
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Beadgrid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
