//! CLI for submitting a generation job and watching it settle.

use std::time::Duration;

use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use faceless_client::{ApiClient, GenerateRequest, JobPoller, Settled};
use faceless_models::{Mode, ASPECT_PRESETS, VOICE_PRESETS};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    Script,
    Idea,
    Article,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Script => Mode::Script,
            CliMode::Idea => Mode::Idea,
            CliMode::Article => Mode::Article,
        }
    }
}

/// Submit a script, idea, or article and watch the video job to completion.
#[derive(Parser)]
#[command(name = "faceless", version)]
struct Args {
    /// Input text: the script, idea, or article excerpt
    text: String,

    /// How the input is interpreted
    #[arg(long, value_enum, default_value_t = CliMode::Script)]
    mode: CliMode,

    /// Voice preset
    #[arg(
        long,
        default_value = VOICE_PRESETS[0],
        value_parser = PossibleValuesParser::new(VOICE_PRESETS),
    )]
    voice: String,

    /// Aspect ratio preset
    #[arg(
        long,
        default_value = ASPECT_PRESETS[0],
        value_parser = PossibleValuesParser::new(ASPECT_PRESETS),
    )]
    aspect: String,

    /// API server base URL
    #[arg(long, default_value = "http://localhost:3001")]
    server: String,

    /// Seconds between status polls
    #[arg(long, default_value_t = 3)]
    interval: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut request = GenerateRequest::new(args.mode.into(), args.text);
    request.voice_style = args.voice;
    request.aspect_ratio = args.aspect;

    let poller = JobPoller::new(ApiClient::new(args.server))
        .with_interval(Duration::from_secs(args.interval));

    println!("Submitting {} job…", request.mode);

    match poller.run(&request).await {
        Settled::Success {
            video_url,
            scenes,
            title,
        } => {
            println!("Done: {title}");
            println!("Video: {video_url}");
            for (i, scene) in scenes.iter().enumerate() {
                println!("  Scene {}: {} [{}]", i + 1, scene.text, scene.keywords);
            }
        }
        Settled::Failure { message } => {
            eprintln!("Generation failed: {message}");
            std::process::exit(1);
        }
        Settled::Cancelled => {
            eprintln!("Cancelled before the job settled.");
            std::process::exit(1);
        }
    }
}
