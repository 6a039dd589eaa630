//! Logistic regression classifier

use serde::Deserialize;

use super::{ModelError, NoteClassifier};
use crate::models::{FeatureVector, FEATURE_COUNT};

fn default_threshold() -> f64 {
    0.5
}

/// Unvalidated logistic model as written in the artifact
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticSpec {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LogisticSpec")]
pub struct LogisticModel {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

impl TryFrom<LogisticSpec> for LogisticModel {
    type Error = ModelError;

    fn try_from(spec: LogisticSpec) -> Result<Self, ModelError> {
        if !spec.weights.iter().chain([&spec.intercept]).all(|w| w.is_finite()) {
            return Err(ModelError::Invalid("logistic weights must be finite".to_string()));
        }
        if !(spec.threshold > 0.0 && spec.threshold < 1.0) {
            return Err(ModelError::Invalid(format!(
                "logistic threshold {} outside (0, 1)",
                spec.threshold
            )));
        }
        Ok(Self {
            weights: spec.weights,
            intercept: spec.intercept,
            threshold: spec.threshold,
        })
    }
}

impl LogisticModel {
    /// Probability of class 1
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(features.as_array())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        1.0 / (1.0 + (-z).exp())
    }
}

impl NoteClassifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> i64 {
        if self.probability(features) >= self.threshold { 1 } else { 0 }
    }

    fn describe(&self) -> String {
        format!("logistic (threshold {})", self.threshold)
    }
}
