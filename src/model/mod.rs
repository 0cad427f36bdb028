//! Loading of persisted inference artifacts: the fitted classifier state
//! (k plus labeled training vectors) and the feature scaler. Both are
//! deserialized once at startup and converted into immutable runtime values.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result as PlumbingResult};
use serde::Deserialize;
use tracing::debug;

use crate::classifier::{KnnClassifier, TrainingSet};
use crate::{RecognitionError, Result};

/// Serialized classifier state parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeModel {
    pub k: usize,
    #[serde(alias = "X_train")]
    pub vectors: Vec<Vec<f64>>,
    #[serde(alias = "y_train")]
    pub labels: Vec<String>,
}

impl RuntimeModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> PlumbingResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read model file {:?}", path))?;
        Self::from_json(&data)
    }

    pub fn from_json(raw: &str) -> PlumbingResult<Self> {
        let model: Self = serde_json::from_str(raw).context("failed to parse model JSON")?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> PlumbingResult<()> {
        ensure!(self.k > 0, "model k must be greater than zero");
        ensure!(!self.vectors.is_empty(), "model holds no training vectors");
        ensure!(
            self.vectors.len() == self.labels.len(),
            "model holds {} vectors but {} labels",
            self.vectors.len(),
            self.labels.len()
        );
        Ok(())
    }

    /// Convert into a fitted classifier. Dimensional consistency of the
    /// stored vectors is enforced here.
    pub fn into_classifier(self) -> PlumbingResult<KnnClassifier> {
        let training = TrainingSet::new(self.vectors, self.labels)?;
        debug!(
            k = self.k,
            points = training.len(),
            dimension = training.dimension(),
            "loaded classifier state"
        );
        Ok(KnnClassifier::fit(self.k, training)?)
    }
}

/// Serialized standard scaler parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeScaler {
    pub mean: Vec<f64>,
    #[serde(alias = "std")]
    pub scale: Vec<f64>,
}

impl RuntimeScaler {
    pub fn from_path<P: AsRef<Path>>(path: P) -> PlumbingResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read scaler file {:?}", path))?;
        Self::from_json(&data)
    }

    pub fn from_json(raw: &str) -> PlumbingResult<Self> {
        let scaler: Self = serde_json::from_str(raw).context("failed to parse scaler JSON")?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> PlumbingResult<()> {
        ensure!(!self.mean.is_empty(), "scaler mean must not be empty");
        ensure!(
            self.mean.len() == self.scale.len(),
            "scaler mean has {} entries but scale has {}",
            self.mean.len(),
            self.scale.len()
        );
        Ok(())
    }

    pub fn into_scaler(self) -> StandardScaler {
        StandardScaler {
            mean: self.mean,
            scale: self.scale,
        }
    }
}

/// Mean/variance normalization fit once over the training corpus and applied
/// to every vector before classification.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Center and rescale a vector. Zero-scale columns pass through centered
    /// only, matching how a fitted scaler treats zero-variance features.
    pub fn transform(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.mean.len() {
            return Err(RecognitionError::DimensionMismatch {
                expected: self.mean.len(),
                actual: vector.len(),
            });
        }
        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&m, &s))| if s == 0.0 { x - m } else { (x - m) / s })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeModel, RuntimeScaler};
    use crate::RecognitionError;

    #[test]
    fn parses_model_json() {
        let json = r#"{
            "k": 1,
            "vectors": [[0.0, 1.0], [2.0, 3.0]],
            "labels": ["happy", "sad"]
        }"#;
        let model = RuntimeModel::from_json(json).unwrap();
        let knn = model.into_classifier().unwrap();
        assert_eq!(knn.k(), 1);
        assert_eq!(knn.training().len(), 2);
    }

    #[test]
    fn accepts_sklearn_style_aliases() {
        let json = r#"{
            "k": 1,
            "X_train": [[0.0]],
            "y_train": ["neutral"]
        }"#;
        let model = RuntimeModel::from_json(json).unwrap();
        assert_eq!(model.labels, vec!["neutral"]);
    }

    #[test]
    fn rejects_model_with_mismatched_labels() {
        let json = r#"{"k": 1, "vectors": [[0.0]], "labels": []}"#;
        assert!(RuntimeModel::from_json(json).is_err());
    }

    #[test]
    fn rejects_zero_k_model() {
        let json = r#"{"k": 0, "vectors": [[0.0]], "labels": ["x"]}"#;
        assert!(RuntimeModel::from_json(json).is_err());
    }

    #[test]
    fn scaler_centers_and_rescales() {
        let scaler = RuntimeScaler::from_json(r#"{"mean": [1.0, 2.0], "scale": [2.0, 0.0]}"#)
            .unwrap()
            .into_scaler();
        let scaled = scaler.transform(&[3.0, 5.0]).unwrap();
        assert_eq!(scaled, vec![1.0, 3.0]);
    }

    #[test]
    fn scaler_rejects_wrong_dimension() {
        let scaler = RuntimeScaler::from_json(r#"{"mean": [0.0], "scale": [1.0]}"#)
            .unwrap()
            .into_scaler();
        let err = scaler.transform(&[0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            RecognitionError::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        );
    }
}
