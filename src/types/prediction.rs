//! Prediction outcome data structures

use crate::types::district::{Borough, PredictionRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary performance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    High,
    Low,
}

impl Performance {
    /// Classify a probability against the decision threshold.
    ///
    /// The threshold is inclusive: a probability exactly at the threshold
    /// counts as high performance.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Performance::High
        } else {
            Performance::Low
        }
    }

    /// Label shown in the classification metric
    pub fn label(&self) -> &'static str {
        match self {
            Performance::High => "High Performance",
            Performance::Low => "Low Performance",
        }
    }
}

/// Result of one recycling performance evaluation.
///
/// Derived on every input change and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of high recycling performance (0.0 - 1.0)
    pub probability: f64,

    /// Classification at the decision threshold
    pub outcome: Performance,

    /// Threshold the classification was made at
    pub threshold: f64,

    /// Borough the prediction is for
    pub borough: Borough,

    /// Community district the prediction is for
    pub communitydistrict: u32,

    /// Prediction month key, "YYYY-MM"
    pub month: String,

    /// Evaluation timestamp
    pub timestamp: DateTime<Utc>,
}

impl PredictionResult {
    /// Build a result for a request from the model's probability output.
    pub fn new(request: &PredictionRequest, probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            outcome: Performance::from_probability(probability, threshold),
            threshold,
            borough: request.borough,
            communitydistrict: request.communitydistrict,
            month: request.month_key(),
            timestamp: Utc::now(),
        }
    }
}
