//! Answer prompts
//!
//! Two narratives close the pipeline: a data-grounded analysis when ERDDAP
//! returned rows, and a general-knowledge explanation when it did not.

use crate::erddap::FetchedData;
use crate::query::StructuredQuery;

/// Rows included in the data prompt
pub const SAMPLE_ROWS: usize = 10;

/// Generates the prompt narrating fetched ERDDAP data
///
/// Only the first [`SAMPLE_ROWS`] rows are embedded; the total count is
/// stated separately.
pub fn generate_data_prompt(user_query: &str, data: &FetchedData) -> String {
    let columns = serde_json::to_string(&data.columns).unwrap_or_default();
    let sample: Vec<_> = data.data_rows.iter().take(SAMPLE_ROWS).collect();
    let sample = serde_json::to_string(&sample).unwrap_or_default();
    let time_range = serde_json::to_string(&data.time_range).unwrap_or_default();
    let spatial = serde_json::to_string(&data.spatial_bounds).unwrap_or_default();

    format!(
        r#"You are an expert oceanographer analyzing real oceanographic data. The user asked: "{user_query}"

I have retrieved the following REAL DATA from ERDDAP:

Dataset: {title}
Dataset ID: {dataset_id}
Variable: {variable}
Columns: {columns}
Data sample (first few rows): {sample}
Total data points: {total}
Time range: {time_range}
Spatial area: {spatial}

Please provide a comprehensive analysis that includes:

1. **Data Summary**: What was found and from which dataset
2. **Key Findings**: Analyze the actual values, ranges, patterns in the data
3. **Temporal Analysis**: Any trends or patterns over the time period
4. **Spatial Context**: Geographic context of the measurements
5. **Data Quality**: Comments on the dataset coverage and reliability
6. **Scientific Interpretation**: What these measurements mean oceanographically
7. **Additional Context**: Related parameters or seasonal patterns that might be relevant

Make the response informative but accessible, focusing on the actual data retrieved. Be specific about the values and patterns you observe in the real data.

Response should be 200-400 words.
"#,
        title = or_unknown(&data.dataset_title),
        dataset_id = or_unknown(&data.dataset_id),
        variable = or_unknown(&data.variable),
        total = data.total_rows,
    )
}

/// Generates the prompt for a general-knowledge answer
///
/// Used when no ERDDAP dataset produced rows. The structured query is
/// embedded as pretty-printed JSON.
pub fn generate_fallback_prompt(user_query: &str, query: &StructuredQuery) -> String {
    let structured = serde_json::to_string_pretty(query).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are an expert oceanographer providing information about marine data and observations.

The user asked: "{user_query}"

Based on the structured analysis: {structured}

I attempted to retrieve real oceanographic data from ERDDAP servers but was unable to find suitable datasets or the data query failed.

Please provide a comprehensive, informative response that includes:

1. **Data Availability**: Explain what types of oceanographic data are typically available for the requested variable/location/time period
2. **Data Sources**: Mention relevant oceanographic databases, satellite missions, research programs, and ERDDAP servers that collect this type of data
3. **Typical Values & Patterns**: Provide context about typical ranges, seasonal patterns, or regional characteristics for the requested variable
4. **Measurement Methods**: Briefly explain how this type of oceanographic data is typically collected
5. **Spatial & Temporal Variability**: Discuss known variations across different regions and time scales
6. **Related Parameters**: Suggest related oceanographic variables that might be of interest
7. **Data Access Recommendations**: Suggest specific datasets, portals, or search strategies for finding this data

Keep the response informative but accessible, around 300-500 words. Focus on being helpful and educational about ocean science and data availability.

If the query lacks specific details, explain what additional information would help narrow down the search and suggest related parameters or regions of interest.
"#
    )
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}
