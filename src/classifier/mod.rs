//! k-nearest-neighbor emotion classifier.
//!
//! Classification is a pure function over state frozen at fit time, so any
//! number of threads may call `predict_one`/`predict` on a shared classifier
//! concurrently. Refitting builds a new value; ownership keeps it exclusive.

use anyhow::{ensure, Result as PlumbingResult};

use crate::{RecognitionError, Result};

/// Labeled feature vectors, immutable once constructed.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    vectors: Vec<Vec<f64>>,
    labels: Vec<String>,
    dimension: usize,
}

impl TrainingSet {
    /// Build a training set from parallel vectors and labels. All vectors
    /// must share one dimension; no constraint is placed on the label
    /// distribution (a single repeated label is legal, if degenerate).
    pub fn new(vectors: Vec<Vec<f64>>, labels: Vec<String>) -> PlumbingResult<Self> {
        ensure!(!vectors.is_empty(), "training set must not be empty");
        ensure!(
            vectors.len() == labels.len(),
            "training set holds {} vectors but {} labels",
            vectors.len(),
            labels.len()
        );
        let dimension = vectors[0].len();
        ensure!(dimension > 0, "training vectors must not be empty");
        for (index, vector) in vectors.iter().enumerate() {
            ensure!(
                vector.len() == dimension,
                "training vector {} has {} dimensions, expected {}",
                index,
                vector.len(),
                dimension
            );
        }
        Ok(Self {
            vectors,
            labels,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// A fitted classifier: k plus the training set it votes over.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    training: TrainingSet,
}

impl KnnClassifier {
    /// Bind `k` and a training set. Fails rather than clamping when `k`
    /// exceeds the number of training points, since clamping would change
    /// voting semantics without any signal to the caller.
    pub fn fit(k: usize, training: TrainingSet) -> Result<Self> {
        if k == 0 || k > training.len() {
            return Err(RecognitionError::InsufficientTrainingData {
                k,
                available: training.len(),
            });
        }
        Ok(Self { k, training })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn training(&self) -> &TrainingSet {
        &self.training
    }

    /// Classify one vector by majority vote among its k nearest training
    /// points under Euclidean distance.
    ///
    /// Determinism: distances are compared with exact f64 ordering (no
    /// epsilon); equal distances keep training-set insertion order via a
    /// stable sort, and vote ties resolve to the label seen earliest while
    /// scanning neighbors in increasing-distance order.
    pub fn predict_one(&self, vector: &[f64]) -> Result<String> {
        if vector.len() != self.training.dimension {
            return Err(RecognitionError::DimensionMismatch {
                expected: self.training.dimension,
                actual: vector.len(),
            });
        }

        let mut distances: Vec<(f64, usize)> = self
            .training
            .vectors
            .iter()
            .enumerate()
            .map(|(index, train)| (euclidean_distance(vector, train), index))
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let neighbors = distances[..self.k].iter().map(|&(_, index)| index);
        Ok(majority_label(&self.training.labels, neighbors).to_string())
    }

    /// Classify each vector independently, preserving order. An empty input
    /// yields an empty output.
    pub fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<String>> {
        vectors
            .iter()
            .map(|vector| self.predict_one(vector))
            .collect()
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Majority label over the given neighbor indices. Counting preserves
/// first-seen order so equal counts resolve to the earliest label in the
/// scan, which the caller supplies in increasing-distance order.
fn majority_label<'a, I>(labels: &'a [String], neighbors: I) -> &'a str
where
    I: Iterator<Item = usize>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for index in neighbors {
        let label = labels[index].as_str();
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some(entry) => entry.1 += 1,
            None => counts.push((label, 1)),
        }
    }
    let mut best = counts[0];
    for &candidate in &counts[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0
}
