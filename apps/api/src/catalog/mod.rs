//! Dataset Store: the college catalog, loaded once from CSV at startup.
//!
//! Rows are validated at the boundary. A bad row fails the whole load rather than being
//! skipped, so every `CollegeRecord` handed out downstream already satisfies its invariants.

pub mod compare;
pub mod filter;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{CollegeRecord, Profession};

pub use compare::compare;
pub use filter::suggest;

/// Columns that must be present in the header row. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "College",
    "Profession",
    "Course",
    "Location",
    "Rating",
    "Review1",
    "Review2",
];

const MAX_RATING: f32 = 5.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("malformed catalog row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid catalog row {row}: {reason}")]
    Invalid { row: usize, reason: String },

    #[error("catalog must list at least two distinct colleges, found {0}")]
    TooFewColleges(usize),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row before validation. Column names follow the dataset headers.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "College")]
    college: String,
    #[serde(rename = "Profession")]
    profession: Profession,
    #[serde(rename = "Course")]
    course: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Rating")]
    rating: f32,
    #[serde(rename = "Review1")]
    review1: String,
    #[serde(rename = "Review2")]
    review2: String,
}

impl CatalogRow {
    fn into_record(self, row: usize) -> Result<CollegeRecord, CatalogError> {
        let college = self.college.trim().to_string();
        if college.is_empty() {
            return Err(CatalogError::Invalid {
                row,
                reason: "College is blank".to_string(),
            });
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::Invalid {
                row,
                reason: format!("Rating {} is outside 0.0–{MAX_RATING}", self.rating),
            });
        }
        Ok(CollegeRecord {
            college,
            profession: self.profession,
            course: self.course.trim().to_string(),
            location: self.location.trim().to_string(),
            // Folds a parsed `-0` into `0.0`.
            rating: self.rating + 0.0,
            review1: self.review1.trim().to_string(),
            review2: self.review2.trim().to_string(),
        })
    }
}

/// The in-memory catalog. Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CollegeRecord>,
}

impl Catalog {
    /// Loads and validates the catalog CSV at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} catalog rows ({} colleges) from {}",
            catalog.len(),
            catalog.college_names().len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parses a catalog from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(CatalogError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<CatalogRow>().enumerate() {
            // Row numbers are 1-based and count the header line.
            let row = idx + 2;
            let raw = result.map_err(|source| CatalogError::Row { row, source })?;
            records.push(raw.into_record(row)?);
        }

        Self::from_records(records)
    }

    /// Builds a catalog from already-typed records, enforcing the two-college minimum.
    pub fn from_records(records: Vec<CollegeRecord>) -> Result<Self, CatalogError> {
        let distinct: HashSet<&str> = records.iter().map(|r| r.college.as_str()).collect();
        if distinct.len() < 2 {
            return Err(CatalogError::TooFewColleges(distinct.len()));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CollegeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct college names in first-appearance order.
    pub fn college_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.college.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// First record whose college name matches exactly.
    pub fn find(&self, college: &str) -> Option<&CollegeRecord> {
        self.records.iter().find(|r| r.college == college)
    }
}
