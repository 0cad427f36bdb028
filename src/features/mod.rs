mod cepstrum;
mod chroma;
mod statistics;

use std::path::Path;

use tracing::debug;

use crate::audio::decoder;
use crate::types::AudioData;
use crate::{RecognitionError, Result};

pub use cepstrum::ANALYSIS_SAMPLE_RATE;

/// Number of dimensions in the classifier-facing feature vector:
/// 13 MFCC means, 13 delta means, 13 delta-delta means, in that order.
pub const FEATURE_DIM: usize = 3 * cepstrum::MFCC_COUNT;

/// Fixed-length summary of an audio signal.
#[derive(Debug, Clone)]
pub struct VoiceFeatures {
    /// The 39-dimensional fingerprint consumed by the classifier.
    pub vector: Vec<f64>,
    /// 12-bin pitch-class profile. Computed alongside the fingerprint and
    /// exposed for inspection, but not part of `vector`.
    pub chroma: Vec<f64>,
}

/// Responsible for turning a decoded signal into a fixed-length fingerprint.
///
/// Analysis parameters (sample rate, frame size, hop, coefficient count) are
/// compile-time constants so training-time and inference-time extraction
/// cannot drift apart.
#[derive(Debug, Default)]
pub struct FeatureExtractor {}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure mapping from a signal to its feature summary. Deterministic:
    /// identical input yields bit-for-bit identical output.
    pub fn extract(&self, audio: &AudioData) -> Result<VoiceFeatures> {
        let bundle = cepstrum::compute_cepstrum(audio)
            .map_err(|err| RecognitionError::Decode(err.to_string()))?;
        let vector = statistics::summarize(&bundle.mfcc)
            .map_err(|err| RecognitionError::Decode(err.to_string()))?;
        let chroma = chroma::profile(&bundle.power, &bundle.freqs);
        debug!(
            frames = bundle.mfcc.len(),
            dims = vector.len(),
            "extracted voice features"
        );
        Ok(VoiceFeatures { vector, chroma })
    }
}

/// Decode an audio file and extract its feature summary in one step. This is
/// the entry point the surrounding system calls with a file path.
pub fn extract_features<P: AsRef<Path>>(path: P) -> Result<VoiceFeatures> {
    let audio =
        decoder::decode_audio(path).map_err(|err| RecognitionError::Decode(err.to_string()))?;
    FeatureExtractor::new().extract(&audio)
}
