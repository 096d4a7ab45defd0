//! Serialized classifier artifact loading

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// A numeric model input: standardized with the training scaler statistics,
/// then weighted by its coefficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericFeature {
    pub name: String,
    /// Training-set mean used for standardization
    pub mean: f64,
    /// Training-set standard deviation used for standardization
    pub std: f64,
    pub coefficient: f64,
}

/// A categorical model input: one-hot encoded over the levels seen during
/// training, one coefficient per level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalFeature {
    pub name: String,
    pub categories: Vec<String>,
    pub coefficients: Vec<f64>,
}

/// Headline metrics reported for the fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub recall: f64,
}

/// The serialized classifier: a fitted logistic regression exported as its
/// coefficient table.
///
/// Loaded once per process and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Model family, e.g. "logistic_regression"
    pub model_type: String,
    /// Human-readable target description
    pub target: String,
    pub intercept: f64,
    pub numeric_features: Vec<NumericFeature>,
    pub categorical_features: Vec<CategoricalFeature>,
    pub metrics: ModelMetrics,
}

impl ModelArtifact {
    /// Load and validate the artifact from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact {}", path.display()))?;

        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to deserialize model artifact {}", path.display()))?;

        artifact.validate()?;

        info!(
            path = %path.display(),
            model_type = %artifact.model_type,
            numeric = artifact.numeric_features.len(),
            categorical = artifact.categorical_features.len(),
            "Model artifact loaded"
        );

        Ok(artifact)
    }

    /// Structural validation of the coefficient table.
    pub fn validate(&self) -> Result<()> {
        if self.numeric_features.is_empty() && self.categorical_features.is_empty() {
            bail!("Model artifact declares no features");
        }
        for feature in &self.categorical_features {
            if feature.categories.len() != feature.coefficients.len() {
                bail!(
                    "Categorical feature {:?} has {} categories but {} coefficients",
                    feature.name,
                    feature.categories.len(),
                    feature.coefficients.len()
                );
            }
        }
        for feature in &self.numeric_features {
            if feature.std <= 0.0 {
                bail!(
                    "Numeric feature {:?} has non-positive standard deviation {}",
                    feature.name,
                    feature.std
                );
            }
        }
        Ok(())
    }

    /// Names of all features the model was fit on, numeric then categorical.
    pub fn feature_names(&self) -> Vec<&str> {
        self.numeric_features
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.categorical_features.iter().map(|f| f.name.as_str()))
            .collect()
    }
}

/// Coefficient table used across the crate's unit tests.
#[cfg(test)]
pub(crate) fn sample_artifact_json() -> &'static str {
    r#"{
            "model_type": "logistic_regression",
            "target": "high recycling performance (>20% recycling ratio)",
            "intercept": -0.25,
            "numeric_features": [
                {"name": "refuse_lag1", "mean": 5000.0, "std": 1500.0, "coefficient": -0.8},
                {"name": "paper_lag1", "mean": 800.0, "std": 250.0, "coefficient": 1.1},
                {"name": "mgp_lag1", "mean": 600.0, "std": 200.0, "coefficient": 0.9},
                {"name": "refuse_lag12", "mean": 5200.0, "std": 1500.0, "coefficient": -0.3},
                {"name": "population_2010", "mean": 120000.0, "std": 60000.0, "coefficient": 0.2}
            ],
            "categorical_features": [
                {"name": "borough", "categories": ["Bronx", "Brooklyn", "Manhattan", "Queens", "Staten Island"], "coefficients": [-0.4, 0.1, 0.5, 0.2, 0.6]},
                {"name": "communitydistrict", "categories": ["1", "2", "3"], "coefficients": [0.05, -0.02, 0.1]},
                {"name": "month", "categories": ["2024-05", "2024-06", "2024-07"], "coefficients": [0.0, 0.12, 0.08]}
            ],
            "metrics": {"accuracy": 0.932, "recall": 0.935}
        }"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_artifact_json()).unwrap();
        file.flush().unwrap();

        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.model_type, "logistic_regression");
        assert_eq!(artifact.numeric_features.len(), 5);
        assert_eq!(artifact.feature_names().len(), 8);
        assert!(artifact.feature_names().contains(&"population_2010"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ModelArtifact::load("no/such/model.json").is_err());
    }

    #[test]
    fn test_shipped_artifact_schema() {
        let artifact = ModelArtifact::load("models_data/recycling_model.json").unwrap();
        let mut names = artifact.feature_names();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "borough",
                "communitydistrict",
                "mgp_lag1",
                "month",
                "paper_lag1",
                "population_2010",
                "refuse_lag1",
                "refuse_lag12",
            ]
        );
        assert_eq!(artifact.metrics.accuracy, 0.932);
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        file.flush().unwrap();
        assert!(ModelArtifact::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_coefficient_mismatch() {
        let mut artifact: ModelArtifact = serde_json::from_str(sample_artifact_json()).unwrap();
        artifact.categorical_features[0].coefficients.pop();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scaler() {
        let mut artifact: ModelArtifact = serde_json::from_str(sample_artifact_json()).unwrap();
        artifact.numeric_features[0].std = 0.0;
        assert!(artifact.validate().is_err());
    }
}
