//! ERDDAP wire and result types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::{BoundingBox, Coordinates};

/// Envelope of every ERDDAP `.json` response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErddapResponse {
    #[serde(default)]
    pub table: Option<ErddapTable>,
}

/// Tabular ERDDAP payload
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErddapTable {
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<Value>>>,
}

impl ErddapTable {
    /// Position of a named column, if advertised
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }
}

/// Render a table cell as text
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A dataset found by catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetCandidate {
    /// Base URL of the server that listed it
    pub server: String,
    pub dataset_id: String,
    pub title: String,
    /// Variable term the search was run for
    pub variable: String,
}

/// Inclusive time bounds used for a griddap request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Spatial constraint used for a griddap request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialBounds {
    Point(Coordinates),
    Area(BoundingBox),
}

impl SpatialBounds {
    /// Latitude range as `(low, high)`
    pub fn lat_range(&self) -> (f64, f64) {
        match self {
            Self::Point(p) => (p.lat, p.lat),
            Self::Area(b) => (b.min_lat, b.max_lat),
        }
    }

    /// Longitude range as `(low, high)`
    pub fn lon_range(&self) -> (f64, f64) {
        match self {
            Self::Point(p) => (p.lon, p.lon),
            Self::Area(b) => (b.min_lon, b.max_lon),
        }
    }
}

/// Rows retrieved from one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedData {
    pub dataset_id: String,
    pub dataset_title: String,
    pub server: String,
    /// Variable actually requested from the dataset
    pub variable: String,
    pub columns: Vec<String>,
    /// First rows of the response, capped
    pub data_rows: Vec<Vec<Value>>,
    /// Row count before capping
    pub total_rows: usize,
    pub query_url: String,
    pub time_range: TimeRange,
    pub spatial_bounds: SpatialBounds,
}

impl FetchedData {
    /// Whether any measurement rows were retrieved
    pub fn has_rows(&self) -> bool {
        !self.data_rows.is_empty()
    }
}
