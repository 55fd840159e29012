use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use emotion_core::{ClientConfig, Emotion, EmotionClient, EmotionScores};
use tracing::debug;

/// Exit status when the service rejects the text.
const EXIT_INVALID_INPUT: u8 = 2;

/// Detect the dominant emotion in a piece of text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to analyze; multiple words are joined with spaces
    #[arg(required = true)]
    text: Vec<String>,

    /// EmotionPredict endpoint (overrides EMOTION_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Model id sent in the grpc-metadata-mm-model-id header (overrides EMOTION_MODEL_ID)
    #[arg(long)]
    model_id: Option<String>,

    /// Request timeout in seconds, at least 1 (overrides EMOTION_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Print the result record as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<ClientConfig> {
        self.config_with(|key| std::env::var(key).ok())
    }

    /// Overlay the flags on a config read through `lookup`.
    fn config_with<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config =
            ClientConfig::from_lookup(lookup).context("Failed to read client configuration")?;
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(model_id) = &self.model_id {
            config = config.with_model_id(model_id.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Some(Duration::from_secs(secs)));
        }
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.config()?;
    debug!(endpoint = %config.endpoint, model = %config.model_id, "client configured");

    let text = args.text.join(" ");
    let scores = EmotionClient::with_config(config)
        .analyze(&text)
        .context("Emotion analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    }
    if scores.is_invalid_input() {
        eprintln!("Invalid text! Please try again!");
        return Ok(ExitCode::from(EXIT_INVALID_INPUT));
    }
    if !args.json {
        print!("{}", render(&scores));
    }
    Ok(ExitCode::SUCCESS)
}

/// One `name: score` line per emotion, then the dominant emotion.
fn render(scores: &EmotionScores) -> String {
    let mut out = String::new();
    for emotion in Emotion::ALL {
        if let Some(score) = scores.score(emotion) {
            out.push_str(&format!("{emotion}: {score:.4}\n"));
        }
    }
    if let Some(dominant) = scores.dominant_emotion {
        out.push_str(&format!("dominant_emotion: {dominant}\n"));
    }
    out
}
