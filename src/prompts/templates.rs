//! Static answers used when the generation service is unavailable
//!
//! These are the terminal stage of every fallback chain and never fail.

use crate::erddap::FetchedData;
use crate::query::StructuredQuery;

/// Answer returned with `ok: false`
pub const APOLOGY: &str = "I apologize, but I encountered an issue processing your oceanographic query. Please try rephrasing your question about a specific oceanographic parameter like temperature, salinity, or chlorophyll concentrations.";

/// Summary of fetched data without any generated narration
pub fn data_summary(data: &FetchedData) -> String {
    let variable = non_empty(&data.variable).unwrap_or("oceanographic parameter");
    let title = non_empty(&data.dataset_title).unwrap_or("ERDDAP dataset");

    format!(
        "I successfully retrieved {total} data points for {variable} from the {title}.

The data covers the requested time period and spatial area. Based on the ERDDAP dataset, this provides real oceanographic measurements that can help answer your question about {variable}.

The dataset includes measurements with proper quality control and metadata. You can access the full dataset and explore additional parameters through the ERDDAP data server.

For more detailed analysis of the specific values and trends, you may want to download the complete dataset or specify a more focused query.",
        total = data.total_rows,
    )
}

/// General guidance when neither data nor generated text is available
pub fn general_guidance(query: &StructuredQuery) -> String {
    let variable = query
        .primary_variable()
        .unwrap_or("oceanographic parameter");
    let location = query
        .location
        .as_deref()
        .and_then(non_empty)
        .unwrap_or("the specified location");

    format!(
        "I can help you understand {variable} data for {location}.

Oceanographic data is typically collected through research vessels, autonomous floats, satellites, and coastal monitoring stations. For {variable}, you might find relevant data in:

**Major Data Sources:**
- NOAA's oceanographic databases
- Copernicus Marine Service
- NASA ocean color and satellite data
- ERDDAP servers worldwide
- Regional oceanographic institutions

**Typical Data Characteristics:**
The availability and quality of {variable} data varies by location and time period. Coastal areas and major shipping routes typically have more comprehensive coverage than remote ocean regions.

**Recommendations:**
1. Try searching specific ERDDAP servers for your region
2. Check satellite-based products for broader coverage
3. Look into research program datasets for your area
4. Consider related parameters that might provide additional context

Would you like me to provide more specific guidance about data sources or measurement techniques for your parameter of interest?"
    )
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
