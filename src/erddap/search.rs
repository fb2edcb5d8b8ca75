//! Catalog search across the ERDDAP federation
//!
//! Servers are queried one after another in declaration order. A server
//! that fails in any way is logged and skipped; the merged result keeps
//! server order then row order and is truncated to the configured limit.

use std::time::Duration;

use reqwest::Client;

use super::types::{cell_text, DatasetCandidate, ErddapResponse};
use super::endpoint;
use crate::config::ErddapConfig;
use crate::error::{OceanError, Result};

/// Keyword synonyms for well-known variables
///
/// Unknown variables search for themselves, lower-cased.
///
/// # Examples
///
/// ```
/// use ocean_nli::erddap::search::search_terms;
///
/// assert_eq!(search_terms("Salinity"), vec!["sss", "sal", "salinity"]);
/// assert_eq!(search_terms("Nitrate"), vec!["nitrate"]);
/// ```
pub fn search_terms(variable: &str) -> Vec<String> {
    let lowered = variable.trim().to_lowercase();
    let terms: &[&str] = match lowered.as_str() {
        "temperature" | "sea_surface_temperature" => &["sst", "temp", "temperature"],
        "salinity" | "sea_surface_salinity" => &["sss", "sal", "salinity"],
        "chlorophyll" | "chlorophyll_a" => &["chl", "chlor", "chlorophyll"],
        "wind" => &["wind", "scatterometer"],
        "ocean_color" => &["oc", "modis", "viirs", "seawifs"],
        _ => return vec![lowered],
    };
    terms.iter().map(|t| t.to_string()).collect()
}

/// Keyword search over every configured server
#[derive(Clone)]
pub struct CatalogSearch {
    client: Client,
    servers: Vec<String>,
    timeout: Duration,
    items_per_page: u32,
    max_datasets: usize,
}

impl CatalogSearch {
    /// Create a search client sharing `client`'s connection pool
    pub fn new(client: Client, config: &ErddapConfig) -> Self {
        Self {
            client,
            servers: config.servers.clone(),
            timeout: Duration::from_secs(config.search_timeout_seconds),
            items_per_page: config.items_per_page,
            max_datasets: config.max_datasets,
        }
    }

    /// Configured server base URLs
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Find datasets for `variable` on every server
    ///
    /// Never fails: unreachable or misbehaving servers contribute nothing.
    /// `location` is only recorded in logs.
    pub async fn search(&self, variable: &str, location: Option<&str>) -> Vec<DatasetCandidate> {
        let terms = search_terms(variable);
        tracing::info!(
            "Searching {} ERDDAP servers for {} (terms: {:?}, location: {:?})",
            self.servers.len(),
            variable,
            terms,
            location
        );

        let mut datasets = Vec::new();
        for server in &self.servers {
            match self.search_server(server, variable, &terms).await {
                Ok(found) => {
                    tracing::debug!("{} returned {} datasets", server, found.len());
                    datasets.extend(found);
                }
                Err(e) => {
                    tracing::warn!("Error searching ERDDAP server {}: {}", server, e);
                }
            }
        }

        datasets.truncate(self.max_datasets);
        datasets
    }

    async fn search_server(
        &self,
        server: &str,
        variable: &str,
        terms: &[String],
    ) -> Result<Vec<DatasetCandidate>> {
        let url = endpoint(server, "search/index.json");
        let search_for = terms.join(" OR ");
        let items_per_page = self.items_per_page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", "1"),
                ("itemsPerPage", items_per_page.as_str()),
                ("searchFor", search_for.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OceanError::Catalog(format!("{} returned {}", url, status)).into());
        }

        let payload: ErddapResponse = response.json().await?;
        let Some(table) = payload.table else {
            return Ok(Vec::new());
        };

        let id_col = table.column_index("Dataset ID").unwrap_or(0);
        let title_col = table.column_index("Title").unwrap_or(1);

        let candidates = table
            .rows
            .unwrap_or_default()
            .into_iter()
            .filter(|row| row.len() >= 2)
            .filter_map(|row| {
                let dataset_id = cell_text(row.get(id_col)?);
                let title = row.get(title_col).map(cell_text).unwrap_or_default();
                (!dataset_id.is_empty()).then(|| DatasetCandidate {
                    server: server.to_string(),
                    dataset_id,
                    title,
                    variable: variable.to_string(),
                })
            })
            .collect();

        Ok(candidates)
    }
}
