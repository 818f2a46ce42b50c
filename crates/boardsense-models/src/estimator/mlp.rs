//! Multi-layer perceptron with dense layers

use super::{ensure_width, Classifier, ProbabilisticClassifier};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Hidden-layer activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
    Logistic,
    Identity,
}

impl Activation {
    fn apply(self, z: f64) -> f64 {
        match self {
            Self::Relu => z.max(0.0),
            Self::Tanh => z.tanh(),
            Self::Logistic => logistic(z),
            Self::Identity => z,
        }
    }
}

/// `out = weights * in + biases`, with `weights` stored row per output unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, b)| row.iter().zip(input).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }

    fn inputs(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mlp {
    pub classes: Vec<i64>,
    #[serde(default)]
    pub activation: Activation,
    pub layers: Vec<DenseLayer>,
}

impl Classifier for Mlp {
    fn kind(&self) -> &'static str {
        "mlp"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.layers.first().map(DenseLayer::inputs).unwrap_or(0)
    }

    fn scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.predict_proba(x)
    }

    fn validate(&self) -> Result<()> {
        let Some(first) = self.layers.first() else {
            return Err(Error::artifact("mlp has no layers"));
        };

        let mut width = first.inputs();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() || layer.weights.len() != layer.biases.len() {
                return Err(Error::artifact(format!(
                    "layer {} has {} weight rows and {} biases",
                    i,
                    layer.weights.len(),
                    layer.biases.len()
                )));
            }
            if layer.weights.iter().any(|row| row.len() != width) {
                return Err(Error::artifact(format!(
                    "layer {} does not accept {} inputs",
                    i, width
                )));
            }
            width = layer.weights.len();
        }

        let binary = self.classes.len() == 2 && width == 1;
        if width != self.classes.len() && !binary {
            return Err(Error::artifact(format!(
                "mlp emits {} outputs for {} classes",
                width,
                self.classes.len()
            )));
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for Mlp {
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        ensure_width(self.kind(), self.n_features(), x)?;

        let mut activations = x.to_vec();
        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            activations = layer.forward(&activations);
            if i < last {
                activations.iter_mut().for_each(|z| *z = self.activation.apply(*z));
            }
        }

        match activations.as_slice() {
            [z] => {
                let p = logistic(*z);
                Ok(vec![1.0 - p, p])
            }
            _ => Ok(softmax(&activations)),
        }
    }
}

fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|v| v / total).collect()
}
