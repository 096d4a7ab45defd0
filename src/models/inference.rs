//! Probability prediction over a feature row

use crate::models::loader::ModelArtifact;
use crate::types::FeatureRow;
use anyhow::{bail, Result};
use tracing::debug;

/// Classifier wrapping a loaded artifact.
///
/// Stateless beyond the immutable coefficient table; prediction is a pure
/// function of the row.
pub struct Classifier {
    artifact: ModelArtifact,
}

impl Classifier {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Model family name, for display
    pub fn model_type(&self) -> &str {
        &self.artifact.model_type
    }

    /// Target description, for display
    pub fn target(&self) -> &str {
        &self.artifact.target
    }

    /// Reported accuracy of the fitted model
    pub fn accuracy(&self) -> f64 {
        self.artifact.metrics.accuracy
    }

    /// Reported recall of the fitted model
    pub fn recall(&self) -> f64 {
        self.artifact.metrics.recall
    }

    /// Probability of the positive class (high recycling performance).
    ///
    /// The row must supply every feature the model was fit on; a missing
    /// feature name is a schema mismatch and fails the evaluation. A
    /// categorical value outside the training levels contributes zero, as
    /// one-hot encoding gives unseen levels an all-zero indicator.
    pub fn predict_probability(&self, row: &FeatureRow) -> Result<f64> {
        let mut logit = self.artifact.intercept;

        for feature in &self.artifact.numeric_features {
            let Some(value) = row.numeric(&feature.name) else {
                bail!(
                    "Feature row does not supply numeric feature {:?} expected by the model",
                    feature.name
                );
            };
            let standardized = (value - feature.mean) / feature.std;
            logit += standardized * feature.coefficient;
        }

        for feature in &self.artifact.categorical_features {
            let Some(value) = row.categorical(&feature.name) else {
                bail!(
                    "Feature row does not supply categorical feature {:?} expected by the model",
                    feature.name
                );
            };
            if let Some(index) = feature.categories.iter().position(|c| c == value) {
                logit += feature.coefficients[index];
            } else {
                debug!(
                    feature = %feature.name,
                    value,
                    "Category not seen during training, contributes zero"
                );
            }
        }

        let probability = sigmoid(logit);
        debug!(logit, probability, "Prediction complete");
        Ok(probability)
    }
}

/// Logistic function mapping a linear score into (0, 1)
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
