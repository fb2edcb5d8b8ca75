//! Structured query types
//!
//! A [`StructuredQuery`] is the normalized form of a natural-language
//! oceanographic request. Every field is optional: the generation service
//! is asked to leave uncertain fields null, and the error path produces a
//! query that only carries `error` and `original_query`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single point location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Normalized representation of an oceanographic request
///
/// Serializes with every schema field present (null when unknown) so
/// callers always see the same object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StructuredQuery {
    /// Primary measurement, e.g. `salinity`
    pub variable: Option<String>,
    /// Alternative ERDDAP variable names for the measurement
    #[serde(default)]
    pub variable_aliases: Vec<String>,
    /// Free-text location
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub bbox: Option<BoundingBox>,
    pub depth_m: Option<f64>,
    /// Free-text period, e.g. `last month`
    pub time_period: Option<String>,
    /// ISO-8601 start, e.g. `2024-01-01T00:00:00Z`
    pub time_start: Option<String>,
    /// ISO-8601 end
    pub time_end: Option<String>,
    /// Requested analysis (`average`, `trend`, `time_series`, ...)
    pub aggregation: Option<String>,
    pub units: Option<String>,
    /// Dataset ids the parser believes may hold the data
    #[serde(default)]
    pub erddap_dataset_hints: Vec<String>,
    pub additional_context: Option<String>,
    /// Set only when the pipeline failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set only when the pipeline failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    /// Fields outside the schema, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StructuredQuery {
    /// The all-null query used when the generation reply cannot be parsed
    ///
    /// # Examples
    ///
    /// ```
    /// use ocean_nli::query::StructuredQuery;
    ///
    /// let query = StructuredQuery::unparsed("what is the ocean doing");
    /// assert!(query.variable.is_none());
    /// assert_eq!(query.additional_context.as_deref(), Some("what is the ocean doing"));
    /// ```
    pub fn unparsed(raw_query: &str) -> Self {
        Self {
            additional_context: Some(raw_query.to_string()),
            ..Self::default()
        }
    }

    /// The query attached to an `ok: false` response
    pub fn failed(error: impl Into<String>, raw_query: &str) -> Self {
        Self {
            error: Some(error.into()),
            original_query: Some(raw_query.to_string()),
            ..Self::default()
        }
    }

    /// Primary variable, ignoring blank strings
    pub fn primary_variable(&self) -> Option<&str> {
        self.variable
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Variable names to try against a dataset, primary first
    pub fn candidate_variables(&self) -> Vec<&str> {
        self.primary_variable()
            .into_iter()
            .chain(self.variable_aliases.iter().map(String::as_str))
            .collect()
    }

    /// Build a query from arbitrary JSON, coercing fields leniently
    ///
    /// Numbers given as numeric strings are parsed, values of the wrong
    /// shape become null, and a bbox or point with any unusable component
    /// is dropped entirely. Returns `None` when `value` is not an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocean_nli::query::StructuredQuery;
    /// use serde_json::json;
    ///
    /// let query = StructuredQuery::from_value(json!({
    ///     "variable": "sst",
    ///     "depth_m": "50",
    ///     "bbox": {"min_lat": 1, "max_lat": "2", "min_lon": 3, "max_lon": null}
    /// }))
    /// .unwrap();
    /// assert_eq!(query.depth_m, Some(50.0));
    /// assert!(query.bbox.is_none());
    /// ```
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut obj) = value else {
            return None;
        };

        let mut take = |key: &str| obj.remove(key).unwrap_or(Value::Null);

        let variable = coerce_string(take("variable"));
        let variable_aliases = coerce_string_list(take("variable_aliases"));
        let location = coerce_string(take("location"));
        let coordinates = coerce_coordinates(&take("coordinates"));
        let bbox = coerce_bbox(&take("bbox"));
        let depth_m = coerce_f64(&take("depth_m"));
        let time_period = coerce_string(take("time_period"));
        let time_start = coerce_string(take("time_start"));
        let time_end = coerce_string(take("time_end"));
        let aggregation = coerce_string(take("aggregation"));
        let units = coerce_string(take("units"));
        let erddap_dataset_hints = coerce_string_list(take("erddap_dataset_hints"));
        let additional_context = match take("additional_context") {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        };
        let error = coerce_string(take("error"));
        let original_query = coerce_string(take("original_query"));

        Some(Self {
            variable,
            variable_aliases,
            location,
            coordinates,
            bbox,
            depth_m,
            time_period,
            time_start,
            time_end,
            aggregation,
            units,
            erddap_dataset_hints,
            additional_context,
            error,
            original_query,
            extra: obj,
        })
    }
}

fn coerce_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_string_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(coerce_string).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn coerce_coordinates(value: &Value) -> Option<Coordinates> {
    Some(Coordinates {
        lat: coerce_f64(value.get("lat")?)?,
        lon: coerce_f64(value.get("lon")?)?,
    })
}

fn coerce_bbox(value: &Value) -> Option<BoundingBox> {
    Some(BoundingBox {
        min_lat: coerce_f64(value.get("min_lat")?)?,
        max_lat: coerce_f64(value.get("max_lat")?)?,
        min_lon: coerce_f64(value.get("min_lon")?)?,
        max_lon: coerce_f64(value.get("max_lon")?)?,
    })
}
