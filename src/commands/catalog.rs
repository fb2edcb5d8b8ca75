use colored::Colorize;
use prettytable::{format, row, Table};

use crate::config::Config;
use crate::erddap::{self, CatalogSearch, DatasetCandidate};
use crate::error::Result;

/// Search every configured catalog and print matching datasets
pub async fn run_search(config: Config, variable: &str, location: Option<&str>) -> Result<()> {
    let search = CatalogSearch::new(erddap::build_client()?, &config.erddap);
    let datasets = search.search(variable, location).await;

    if datasets.is_empty() {
        println!("{}", format!("No datasets found for {}.", variable).yellow());
        return Ok(());
    }

    println!("\nDatasets for {}:", variable.bold());
    candidates_table(&datasets).printstd();
    println!();

    Ok(())
}

/// Print the configured ERDDAP servers in query order
pub fn run_servers(config: &Config) -> Result<()> {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["#".bold(), "Server".bold()]);

    for (i, server) in config.erddap.servers.iter().enumerate() {
        table.add_row(row![i + 1, server.cyan()]);
    }

    println!("\nERDDAP servers:");
    table.printstd();
    println!();

    Ok(())
}

/// Table of search results, one row per dataset
pub fn candidates_table(datasets: &[DatasetCandidate]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["Dataset ID".bold(), "Title".bold(), "Server".bold()]);

    for dataset in datasets {
        let title = if dataset.title.chars().count() > 60 {
            let short: String = dataset.title.chars().take(57).collect();
            format!("{}...", short)
        } else {
            dataset.title.clone()
        };

        table.add_row(row![dataset.dataset_id.cyan(), title, dataset.server]);
    }

    table
}
