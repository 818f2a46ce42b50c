//! k-nearest-neighbours vote over stored training rows

use super::{ensure_width, normalize, Classifier, ProbabilisticClassifier};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How neighbour votes are weighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weights {
    #[default]
    Uniform,
    /// Inverse Euclidean distance; exact matches take the whole vote
    Distance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNeighbors {
    pub classes: Vec<i64>,
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: Weights,
    /// Training rows
    pub samples: Vec<Vec<f64>>,
    /// Class index of each training row
    pub targets: Vec<usize>,
}

impl KNeighbors {
    /// Indices of the k closest rows with their distances, ties by training order
    fn neighbors(&self, x: &[f64]) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let d2: f64 = row.iter().zip(x).map(|(a, b)| (a - b) * (a - b)).sum();
                (i, d2.sqrt())
            })
            .collect();

        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        distances.truncate(self.n_neighbors);
        distances
    }
}

impl Classifier for KNeighbors {
    fn kind(&self) -> &'static str {
        "knn"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.samples.first().map(Vec::len).unwrap_or(0)
    }

    fn scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.predict_proba(x)
    }

    fn validate(&self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(Error::artifact("knn has no training samples"));
        }
        if self.samples.len() != self.targets.len() {
            return Err(Error::artifact(format!(
                "knn has {} samples but {} targets",
                self.samples.len(),
                self.targets.len()
            )));
        }
        if self.n_neighbors == 0 || self.n_neighbors > self.samples.len() {
            return Err(Error::artifact(format!(
                "n_neighbors {} not in 1..={}",
                self.n_neighbors,
                self.samples.len()
            )));
        }
        let width = self.n_features();
        if self.samples.iter().any(|row| row.len() != width) {
            return Err(Error::artifact("knn samples have differing widths"));
        }
        if let Some(bad) = self.targets.iter().find(|t| **t >= self.classes.len()) {
            return Err(Error::artifact(format!("knn target {} has no class", bad)));
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for KNeighbors {
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        ensure_width(self.kind(), self.n_features(), x)?;

        let neighbors = self.neighbors(x);
        let exact = neighbors.iter().any(|(_, d)| *d == 0.0);

        let mut votes = vec![0.0; self.classes.len()];
        for (i, d) in neighbors {
            let weight = match self.weights {
                Weights::Uniform => 1.0,
                Weights::Distance if exact => {
                    if d == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                Weights::Distance => 1.0 / d,
            };
            let slot = self
                .targets
                .get(i)
                .and_then(|t| votes.get_mut(*t))
                .ok_or_else(|| Error::inference(format!("knn sample {} has no class", i)))?;
            *slot += weight;
        }

        normalize(&votes)
    }
}
