use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use emovoice::audio::decoder;
use emovoice::features::FeatureExtractor;
use emovoice::model::{RuntimeModel, RuntimeScaler};
use emovoice::screening;

/// EmoVoice - speech emotion recognition
///
/// Decodes an audio file, extracts a 39-dimensional cepstral fingerprint,
/// rescales it with a persisted scaler, and classifies the emotion by
/// k-nearest-neighbor voting against a persisted training set.
#[derive(Parser, Debug)]
#[command(name = "emovoice")]
#[command(version = "0.1.0")]
#[command(about = "Speech emotion recognition", long_about = None)]
struct Args {
    /// Input audio file (supports WAV, MP3, FLAC, OGG, etc.)
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Path to the serialized classifier state (JSON: k, vectors, labels)
    #[arg(long, value_name = "PATH")]
    model: PathBuf,

    /// Path to the serialized feature scaler (JSON: mean, scale)
    #[arg(long, value_name = "PATH")]
    scaler: PathBuf,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if !self.input_file.is_file() {
            anyhow::bail!("input file does not exist: {:?}", self.input_file);
        }
        if !self.model.is_file() {
            anyhow::bail!("model file does not exist: {:?}", self.model);
        }
        if !self.scaler.is_file() {
            anyhow::bail!("scaler file does not exist: {:?}", self.scaler);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    args.validate()
        .context("failed to validate command-line arguments")?;

    println!("EmoVoice v0.1.0 - Speech Emotion Recognition");
    println!("Input: {:?}", args.input_file);

    // Artifacts are loaded once, before any prediction.
    let classifier = RuntimeModel::from_path(&args.model)
        .context("failed to load model artifact")?
        .into_classifier()
        .context("failed to fit classifier from model artifact")?;
    let scaler = RuntimeScaler::from_path(&args.scaler)
        .context("failed to load scaler artifact")?
        .into_scaler();
    println!(
        "Model: k = {}, {} training points, {} dimensions",
        classifier.k(),
        classifier.training().len(),
        classifier.training().dimension()
    );

    let audio =
        decoder::decode_audio(&args.input_file).context("failed to decode input audio")?;
    println!(
        "Audio: {} samples at {} Hz ({:.2}s)",
        audio.samples.len(),
        audio.sample_rate,
        audio.duration_seconds()
    );

    let extracted = FeatureExtractor::new()
        .extract(&audio)
        .context("failed to extract features from input audio")?;
    debug!(chroma = ?extracted.chroma, "pitch-class profile");

    let scaled = scaler
        .transform(&extracted.vector)
        .context("scaler does not match extracted feature dimensions")?;
    let emotion = classifier
        .predict_one(&scaled)
        .context("classification failed")?;
    let state = screening::screen(&emotion);

    println!("\nDetected emotion: {}", emotion);
    println!("Mental state screening: {}", state);

    Ok(())
}
