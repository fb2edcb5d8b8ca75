//! Griddap data retrieval for a single dataset candidate

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;

use super::endpoint;
use super::types::{cell_text, DatasetCandidate, ErddapResponse, FetchedData, SpatialBounds, TimeRange};
use crate::config::ErddapConfig;
use crate::error::{OceanError, Result};
use crate::query::{BoundingBox, StructuredQuery};

/// Fetches a constrained subset of a gridded dataset
#[derive(Clone)]
pub struct DataFetcher {
    client: Client,
    timeout: Duration,
    max_rows: usize,
    window_days: i64,
    default_bbox: BoundingBox,
}

impl DataFetcher {
    /// Create a fetcher sharing `client`'s connection pool
    pub fn new(client: Client, config: &ErddapConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.fetch_timeout_seconds),
            max_rows: config.max_rows,
            window_days: config.default_window_days,
            default_bbox: config.default_bbox,
        }
    }

    /// Retrieve data for `candidate` constrained by `query`
    ///
    /// Returns `None` on any failure; the cause is logged.
    pub async fn fetch(
        &self,
        candidate: &DatasetCandidate,
        query: &StructuredQuery,
    ) -> Option<FetchedData> {
        match self.try_fetch(candidate, query).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    "Error fetching {} from {}: {}",
                    candidate.dataset_id,
                    candidate.server,
                    e
                );
                None
            }
        }
    }

    async fn try_fetch(
        &self,
        candidate: &DatasetCandidate,
        query: &StructuredQuery,
    ) -> Result<Option<FetchedData>> {
        let info_url = endpoint(
            &candidate.server,
            &format!("info/{}/index.json", candidate.dataset_id),
        );
        let info: ErddapResponse = self.get_json(&info_url).await?;
        let advertised = advertised_variables(&info);

        let Some(variable) = resolve_variable(query, &advertised) else {
            tracing::debug!("{} advertises no usable variable", candidate.dataset_id);
            return Ok(None);
        };

        let time_range = effective_time_range(query, Utc::now(), self.window_days);
        let bounds = spatial_constraint(query, self.default_bbox);
        let query_url = format!(
            "{}?{}",
            endpoint(
                &candidate.server,
                &format!("griddap/{}.json", candidate.dataset_id)
            ),
            griddap_query(&variable, &time_range, &bounds)
        );

        tracing::debug!("Fetching griddap data: {}", query_url);
        let data: ErddapResponse = self.get_json(&query_url).await?;

        let Some(table) = data.table else {
            return Ok(None);
        };
        let Some(mut rows) = table.rows else {
            return Ok(None);
        };

        let total_rows = rows.len();
        rows.truncate(self.max_rows);

        Ok(Some(FetchedData {
            dataset_id: candidate.dataset_id.clone(),
            dataset_title: candidate.title.clone(),
            server: candidate.server.clone(),
            variable,
            columns: table.column_names,
            data_rows: rows,
            total_rows,
            query_url,
            time_range,
            spatial_bounds: bounds,
        }))
    }

    async fn get_json(&self, url: &str) -> Result<ErddapResponse> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OceanError::Fetch(format!("{} returned {}", url, status)).into());
        }

        Ok(response.json().await?)
    }
}

/// Variable names listed in a dataset's info table
///
/// Info rows are `[row_type, variable_name, attribute_name, data_type, value]`;
/// rows of type `variable` name the dataset's data variables.
pub fn advertised_variables(info: &ErddapResponse) -> Vec<String> {
    let Some(rows) = info.table.as_ref().and_then(|t| t.rows.as_ref()) else {
        return Vec::new();
    };

    rows.iter()
        .filter(|row| row.len() > 1 && row[0].as_str() == Some("variable"))
        .map(|row| cell_text(&row[1]))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Pick the dataset variable to request
///
/// The primary variable and aliases are tried in order against the
/// advertised names; when none match, the first advertised variable wins.
pub fn resolve_variable(query: &StructuredQuery, advertised: &[String]) -> Option<String> {
    query
        .candidate_variables()
        .into_iter()
        .find(|name| advertised.iter().any(|a| a == name))
        .map(String::from)
        .or_else(|| advertised.first().cloned())
}

/// Time bounds for the request
///
/// Missing bounds are filled from `now` and a trailing window of
/// `window_days`.
pub fn effective_time_range(
    query: &StructuredQuery,
    now: DateTime<Utc>,
    window_days: i64,
) -> TimeRange {
    let window = chrono::Duration::days(window_days);
    let start = non_blank(&query.time_start);
    let end = non_blank(&query.time_end);

    match (start, end) {
        (Some(start), Some(end)) => TimeRange {
            start: start.to_string(),
            end: end.to_string(),
        },
        (Some(start), None) => TimeRange {
            start: start.to_string(),
            end: end_of_day(now),
        },
        (None, Some(end)) => {
            let anchor = parse_instant(end).unwrap_or(now);
            TimeRange {
                start: start_of_day(anchor - window),
                end: end.to_string(),
            }
        }
        (None, None) => TimeRange {
            start: start_of_day(now - window),
            end: end_of_day(now),
        },
    }
}

/// Spatial bounds for the request: point, then bbox, then `default_bbox`
pub fn spatial_constraint(query: &StructuredQuery, default_bbox: BoundingBox) -> SpatialBounds {
    if let Some(point) = query.coordinates {
        SpatialBounds::Point(point)
    } else {
        SpatialBounds::Area(query.bbox.unwrap_or(default_bbox))
    }
}

/// Griddap constraint string for one variable
///
/// # Examples
///
/// ```
/// use ocean_nli::erddap::{SpatialBounds, TimeRange};
/// use ocean_nli::erddap::fetch::griddap_query;
/// use ocean_nli::query::Coordinates;
///
/// let time = TimeRange {
///     start: "2024-01-01T00:00:00Z".to_string(),
///     end: "2024-01-31T23:59:59Z".to_string(),
/// };
/// let point = SpatialBounds::Point(Coordinates { lat: 18.9, lon: 72.8 });
///
/// assert_eq!(
///     griddap_query("sst", &time, &point),
///     "sst[(2024-01-01T00:00:00Z):1:(2024-01-31T23:59:59Z)][(18.9):1:(18.9)][(72.8):1:(72.8)]"
/// );
/// ```
pub fn griddap_query(variable: &str, time: &TimeRange, bounds: &SpatialBounds) -> String {
    let (lat0, lat1) = bounds.lat_range();
    let (lon0, lon1) = bounds.lon_range();
    format!(
        "{}[({}):1:({})][({}):1:({})][({}):1:({})]",
        variable, time.start, time.end, lat0, lat1, lon0, lon1
    )
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn start_of_day(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT00:00:00Z").to_string()
}

fn end_of_day(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT23:59:59Z").to_string()
}
