//! District and time-period inputs for recycling performance prediction

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five NYC boroughs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Borough {
    Bronx,
    Brooklyn,
    Manhattan,
    Queens,
    #[serde(rename = "Staten Island")]
    StatenIsland,
}

impl Borough {
    /// All boroughs in selection order
    pub const ALL: [Borough; 5] = [
        Borough::Bronx,
        Borough::Brooklyn,
        Borough::Manhattan,
        Borough::Queens,
        Borough::StatenIsland,
    ];

    /// Canonical name as it appears in the reference dataset and model categories
    pub fn name(&self) -> &'static str {
        match self {
            Borough::Bronx => "Bronx",
            Borough::Brooklyn => "Brooklyn",
            Borough::Manhattan => "Manhattan",
            Borough::Queens => "Queens",
            Borough::StatenIsland => "Staten Island",
        }
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Borough {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronx" => Ok(Borough::Bronx),
            "brooklyn" => Ok(Borough::Brooklyn),
            "manhattan" => Ok(Borough::Manhattan),
            "queens" => Ok(Borough::Queens),
            "staten island" => Ok(Borough::StatenIsland),
            other => bail!("unknown borough: {other:?}"),
        }
    }
}

/// Operator inputs for one prediction: which district, which month, and the
/// recent waste collection tonnages the model uses as lag features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Borough of the community district
    pub borough: Borough,

    /// Community district number within the borough (1-18)
    pub communitydistrict: u32,

    /// Prediction month (1-12)
    pub month: u32,

    /// Prediction year (2015-2030)
    pub year: i32,

    /// Refuse tons collected last month
    pub refuse_lag1: f64,

    /// Paper recyclables collected last month
    pub paper_lag1: f64,

    /// Metal/glass/plastic tons collected last month
    pub mgp_lag1: f64,

    /// Refuse tons collected same month last year
    pub refuse_lag12: f64,
}

impl PredictionRequest {
    pub const DISTRICT_RANGE: (u32, u32) = (1, 18);
    pub const YEAR_RANGE: (i32, i32) = (2015, 2030);

    /// Create a request with the documented input defaults
    pub fn new(borough: Borough) -> Self {
        Self {
            borough,
            communitydistrict: 1,
            month: 6,
            year: 2024,
            refuse_lag1: 5000.0,
            paper_lag1: 800.0,
            mgp_lag1: 600.0,
            refuse_lag12: 5200.0,
        }
    }

    /// Check all declared input ranges, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        let (d_lo, d_hi) = Self::DISTRICT_RANGE;
        if !(d_lo..=d_hi).contains(&self.communitydistrict) {
            bail!(
                "community district {} out of range {}-{}",
                self.communitydistrict,
                d_lo,
                d_hi
            );
        }
        if !(1..=12).contains(&self.month) {
            bail!("month {} out of range 1-12", self.month);
        }
        let (y_lo, y_hi) = Self::YEAR_RANGE;
        if !(y_lo..=y_hi).contains(&self.year) {
            bail!("year {} out of range {}-{}", self.year, y_lo, y_hi);
        }
        for (name, value) in [
            ("refuse_lag1", self.refuse_lag1),
            ("paper_lag1", self.paper_lag1),
            ("mgp_lag1", self.mgp_lag1),
            ("refuse_lag12", self.refuse_lag12),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{} must be a non-negative number, got {}", name, value);
            }
        }
        Ok(())
    }

    /// Month key in the "YYYY-MM" form the model was trained on
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
