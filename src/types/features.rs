//! Model input row assembled from operator inputs and the reference table.
//!
//! Field names and value formatting match the training data exactly: the
//! classifier resolves features by these names, so the row acts as the
//! single-record feature table the model expects.

use serde::{Deserialize, Serialize};

/// One row of model input, ready for probability prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Prediction month, "YYYY-MM"
    pub month: String,

    /// Canonical borough name
    pub borough: String,

    /// Community district number as text
    pub communitydistrict: String,

    /// Refuse tons collected last month
    pub refuse_lag1: f64,

    /// Paper recyclables collected last month
    pub paper_lag1: f64,

    /// Metal/glass/plastic tons collected last month
    pub mgp_lag1: f64,

    /// Refuse tons collected same month last year
    pub refuse_lag12: f64,

    /// 2010 census population of the district
    pub population_2010: u64,
}

impl FeatureRow {
    /// Resolve a numeric feature by its training name.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match name {
            "refuse_lag1" => Some(self.refuse_lag1),
            "paper_lag1" => Some(self.paper_lag1),
            "mgp_lag1" => Some(self.mgp_lag1),
            "refuse_lag12" => Some(self.refuse_lag12),
            "population_2010" => Some(self.population_2010 as f64),
            _ => None,
        }
    }

    /// Resolve a categorical feature by its training name.
    pub fn categorical(&self, name: &str) -> Option<&str> {
        match name {
            "month" => Some(&self.month),
            "borough" => Some(&self.borough),
            "communitydistrict" => Some(&self.communitydistrict),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> FeatureRow {
        FeatureRow {
            month: "2024-06".to_string(),
            borough: "Bronx".to_string(),
            communitydistrict: "1".to_string(),
            refuse_lag1: 5000.0,
            paper_lag1: 800.0,
            mgp_lag1: 600.0,
            refuse_lag12: 5200.0,
            population_2010: 50000,
        }
    }

    #[test]
    fn test_numeric_lookup() {
        let row = sample_row();
        assert_eq!(row.numeric("refuse_lag1"), Some(5000.0));
        assert_eq!(row.numeric("population_2010"), Some(50000.0));
        assert_eq!(row.numeric("borough"), None);
        assert_eq!(row.numeric("refuse_lag2"), None);
    }

    #[test]
    fn test_categorical_lookup() {
        let row = sample_row();
        assert_eq!(row.categorical("month"), Some("2024-06"));
        assert_eq!(row.categorical("communitydistrict"), Some("1"));
        assert_eq!(row.categorical("refuse_lag1"), None);
    }

    #[test]
    fn test_row_serialization() {
        let row = sample_row();
        let json = serde_json::to_string(&row).unwrap();
        let deserialized: FeatureRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, deserialized);
    }
}
