//! Decision engine: feature assembly, model invocation, and thresholding.

use crate::config::AppConfig;
use crate::models::{Classifier, ModelArtifact};
use crate::reference::ReferenceTable;
use crate::types::{FeatureRow, PredictionRequest, PredictionResult};
use anyhow::Result;
use tracing::{debug, info};

/// Owns the loaded classifier and reference table and evaluates requests.
///
/// Both artifacts are loaded exactly once, at construction, and are read-only
/// afterwards. The engine is constructed explicitly and passed to callers so
/// evaluation stays a pure function of its inputs.
pub struct PredictionEngine {
    classifier: Classifier,
    reference: ReferenceTable,
    threshold: f64,
}

impl PredictionEngine {
    /// Load both artifacts and build the engine. Any load failure is fatal.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let artifact = ModelArtifact::load(&config.artifacts.model_path)?;
        let reference = ReferenceTable::load(&config.artifacts.reference_path)?;

        info!(
            threshold = config.detection.threshold,
            "Prediction engine initialized"
        );

        Ok(Self {
            classifier: Classifier::new(artifact),
            reference,
            threshold: config.detection.threshold,
        })
    }

    /// Build an engine from already-loaded components.
    pub fn from_parts(classifier: Classifier, reference: ReferenceTable, threshold: f64) -> Self {
        Self {
            classifier,
            reference,
            threshold,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate one request: format the month key, resolve the district
    /// population, assemble the feature row, predict, and threshold.
    ///
    /// Prediction errors propagate; there are no retries and no side effects.
    pub fn evaluate(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        request.validate()?;

        let population_2010 = self
            .reference
            .lookup(request.borough, request.communitydistrict);

        let row = FeatureRow {
            month: request.month_key(),
            borough: request.borough.name().to_string(),
            communitydistrict: request.communitydistrict.to_string(),
            refuse_lag1: request.refuse_lag1,
            paper_lag1: request.paper_lag1,
            mgp_lag1: request.mgp_lag1,
            refuse_lag12: request.refuse_lag12,
            population_2010,
        };
        debug!(?row, "Feature row assembled");

        let probability = self.classifier.predict_probability(&row)?;

        Ok(PredictionResult::new(request, probability, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ReferenceRecord, DEFAULT_POPULATION};
    use crate::types::{Borough, Performance};

    fn sample_engine(records: Vec<ReferenceRecord>) -> PredictionEngine {
        let artifact: ModelArtifact =
            serde_json::from_str(crate::models::loader::sample_artifact_json()).unwrap();
        PredictionEngine::from_parts(
            Classifier::new(artifact),
            ReferenceTable::from_records(records),
            0.60,
        )
    }

    fn bronx_request() -> PredictionRequest {
        PredictionRequest {
            borough: Borough::Bronx,
            communitydistrict: 1,
            month: 6,
            year: 2024,
            refuse_lag1: 5000.0,
            paper_lag1: 800.0,
            mgp_lag1: 600.0,
            refuse_lag12: 5200.0,
        }
    }

    #[test]
    fn test_evaluate_uses_fallback_population_on_miss() {
        // No reference rows at all: the lookup degrades to the fallback and
        // the evaluation still succeeds.
        let engine = sample_engine(Vec::new());
        let result = engine.evaluate(&bronx_request()).unwrap();

        assert!((0.0..=1.0).contains(&result.probability));
        assert_eq!(result.month, "2024-06");
        assert_eq!(result.communitydistrict, 1);

        // Same probability as predicting over the row with the fallback
        // population filled in.
        let row = FeatureRow {
            month: "2024-06".to_string(),
            borough: "Bronx".to_string(),
            communitydistrict: "1".to_string(),
            refuse_lag1: 5000.0,
            paper_lag1: 800.0,
            mgp_lag1: 600.0,
            refuse_lag12: 5200.0,
            population_2010: DEFAULT_POPULATION,
        };
        let direct = engine.classifier().predict_probability(&row).unwrap();
        assert_eq!(result.probability, direct);
    }

    #[test]
    fn test_evaluate_uses_reference_population_on_hit() {
        let engine = sample_engine(vec![ReferenceRecord {
            borough: "bronx".to_string(),
            communitydistrict: 1,
            population_2010: Some(91_497),
        }]);
        let miss_engine = sample_engine(Vec::new());

        let hit = engine.evaluate(&bronx_request()).unwrap();
        let miss = miss_engine.evaluate(&bronx_request()).unwrap();
        // Different population, different probability
        assert_ne!(hit.probability, miss.probability);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let engine = sample_engine(Vec::new());
        let first = engine.evaluate(&bronx_request()).unwrap();
        let second = engine.evaluate(&bronx_request()).unwrap();
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn test_evaluate_rejects_invalid_request() {
        let engine = sample_engine(Vec::new());
        let mut request = bronx_request();
        request.month = 13;
        assert!(engine.evaluate(&request).is_err());
    }

    #[test]
    fn test_label_follows_threshold() {
        let engine = sample_engine(Vec::new());
        let result = engine.evaluate(&bronx_request()).unwrap();
        let expected = if result.probability >= 0.60 {
            Performance::High
        } else {
            Performance::Low
        };
        assert_eq!(result.outcome, expected);
    }
}
