//! Text rendering of prediction results and model metadata.
//!
//! Pure string formatting: nothing here decides anything beyond picking one
//! of the two outcome templates from the label.

use crate::models::Classifier;
use crate::types::{Performance, PredictionResult};

/// Headline line for the prediction outcome.
pub fn outcome_headline(result: &PredictionResult) -> &'static str {
    match result.outcome {
        Performance::High => "High Recycling Performance Expected",
        Performance::Low => "Low Recycling Performance Expected",
    }
}

/// Sentence describing the prediction for the selected district and month.
pub fn outcome_detail(result: &PredictionResult) -> String {
    match result.outcome {
        Performance::High => format!(
            "District {} - CD {} is predicted to achieve >20% recycling ratio in {}.",
            result.borough, result.communitydistrict, result.month
        ),
        Performance::Low => format!(
            "District {} - CD {} may not reach the 20% recycling target in {}.",
            result.borough, result.communitydistrict, result.month
        ),
    }
}

/// Probability formatted as a percentage with one decimal place.
pub fn probability_percent(result: &PredictionResult) -> String {
    format!("{:.1}%", result.probability * 100.0)
}

/// Full result block as shown to the operator.
pub fn render_result(result: &PredictionResult) -> String {
    format!(
        "\nPrediction Results\n------------------\n{}\n{}\n\nPerformance Probability: {}\nClassification:          {}\n",
        outcome_headline(result),
        outcome_detail(result),
        probability_percent(result),
        result.outcome.label(),
    )
}

/// Static model information block.
pub fn render_model_info(classifier: &Classifier, threshold: f64) -> String {
    format!(
        "\nModel Information\n-----------------\nModel Type:  {}\nTarget:      {}\nFeatures:    Temporal patterns, waste type lags, population metrics\nPerformance: Accuracy {:.1}% | Recall {:.1}%\nThreshold:   {:.1}%\n",
        display_model_type(classifier.model_type()),
        classifier.target(),
        classifier.accuracy() * 100.0,
        classifier.recall() * 100.0,
        threshold * 100.0,
    )
}

/// Footer caption.
pub fn render_footer() -> &'static str {
    "NYC Waste Management Analytics | DSNY Monthly Tonnage Data | Model: Logistic Regression"
}

fn display_model_type(model_type: &str) -> String {
    match model_type {
        "logistic_regression" => "Logistic Regression".to_string(),
        other => other.to_string(),
    }
}
