//! District reference table loaded from the historical dataset.
//!
//! Provides the one auxiliary model feature (2010 census population) by
//! (borough, community district) lookup, with a fixed fallback when a
//! district is absent from the dataset.

use crate::types::Borough;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Population used when a district has no row in the reference dataset
pub const DEFAULT_POPULATION: u64 = 50_000;

/// One row of the reference dataset. Extra columns in the file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRecord {
    /// Borough name as stored in the dataset (may need trimming/casing)
    pub borough: String,
    /// Community district number
    pub communitydistrict: u32,
    /// 2010 census population, when the dataset carries it
    #[serde(default)]
    pub population_2010: Option<u64>,
}

/// Static reference table, loaded once and read-only thereafter.
pub struct ReferenceTable {
    records: Vec<ReferenceRecord>,
}

impl ReferenceTable {
    /// Load the reference dataset from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open reference dataset {}", path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: ReferenceRecord = row
                .with_context(|| format!("Malformed row in reference dataset {}", path.display()))?;
            records.push(record);
        }

        info!(
            path = %path.display(),
            districts = records.len(),
            "Reference dataset loaded"
        );

        Ok(Self { records })
    }

    /// Build a table from in-memory records.
    pub fn from_records(records: Vec<ReferenceRecord>) -> Self {
        Self { records }
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the 2010 population for a district.
    ///
    /// The stored borough string is trimmed and title-cased before comparison
    /// against the canonical borough name; the operator-side name is assumed
    /// canonical already. First matching row wins. A miss, or a matching row
    /// without a population value, degrades silently to [`DEFAULT_POPULATION`].
    pub fn lookup(&self, borough: Borough, communitydistrict: u32) -> u64 {
        let wanted = borough.name();

        let hit = self.records.iter().find(|record| {
            record.communitydistrict == communitydistrict
                && title_case(record.borough.trim()) == wanted
        });

        match hit.and_then(|record| record.population_2010) {
            Some(population) => {
                debug!(
                    borough = %borough,
                    communitydistrict,
                    population,
                    "Reference lookup hit"
                );
                population
            }
            None => {
                warn!(
                    borough = %borough,
                    communitydistrict,
                    fallback = DEFAULT_POPULATION,
                    "No reference population, using fallback"
                );
                DEFAULT_POPULATION
            }
        }
    }
}

/// Title-case each whitespace-separated word: first letter uppercased, the
/// rest lowercased ("staten island" -> "Staten Island").
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
