//! Type definitions for the recycling performance predictor

pub mod district;
pub mod features;
pub mod prediction;

pub use district::{Borough, PredictionRequest};
pub use features::FeatureRow;
pub use prediction::{Performance, PredictionResult};
