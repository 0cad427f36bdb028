//! EmoVoice core: speech emotion recognition by nearest-neighbor voting.
//!
//! Pipeline: decode an audio file to a mono signal, summarize it as a
//! 39-dimensional cepstral fingerprint, rescale with a persisted scaler,
//! and classify the result against a labeled training set.

pub mod audio;
pub mod classifier;
pub mod features;
pub mod model;
pub mod screening;
pub mod types;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Convenient alias for results returned by the recognition core.
pub type Result<T> = std::result::Result<T, RecognitionError>;

/// Failure conditions of the recognition core. All are deterministic given
/// their inputs; none are worth retrying unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The caller-supplied audio could not be decoded into a usable signal.
    Decode(String),
    /// A vector's length differs from the dimension the consumer was fit with.
    DimensionMismatch { expected: usize, actual: usize },
    /// The neighbor count k lies outside `1..=N` for a training set of size N.
    InsufficientTrainingData { k: usize, available: usize },
}

impl Display for RecognitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(message) => write!(f, "cannot process input audio: {message}"),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "feature vector has {actual} dimensions, expected {expected}"
            ),
            Self::InsufficientTrainingData { k, available } => write!(
                f,
                "k = {k} neighbors requested but training set holds {available} points"
            ),
        }
    }
}

impl Error for RecognitionError {}
