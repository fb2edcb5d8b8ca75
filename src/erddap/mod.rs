//! ERDDAP federation client
//!
//! Catalog search over every configured server and griddap retrieval for a
//! single dataset. Both degrade silently: failures are logged and produce
//! no result rather than an error.

pub mod fetch;
pub mod search;
pub mod types;

pub use fetch::DataFetcher;
pub use search::CatalogSearch;
pub use types::{DatasetCandidate, FetchedData, SpatialBounds, TimeRange};

use reqwest::Client;

use crate::error::Result;

/// Join a server base URL and a relative ERDDAP path
///
/// # Examples
///
/// ```
/// use ocean_nli::erddap::endpoint;
///
/// assert_eq!(
///     endpoint("https://coastwatch.pfeg.noaa.gov/erddap/", "search/index.json"),
///     "https://coastwatch.pfeg.noaa.gov/erddap/search/index.json"
/// );
/// assert_eq!(endpoint("http://localhost/erddap", "info/x/index.json"), "http://localhost/erddap/info/x/index.json");
/// ```
pub fn endpoint(server: &str, path: &str) -> String {
    format!("{}/{}", server.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Build the pooled HTTP client shared by search and fetch
///
/// Per-request timeouts are applied at each call site.
///
/// # Errors
///
/// Returns error if the TLS backend cannot be initialized
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("ocean-nli/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
