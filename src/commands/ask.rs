use chrono::Utc;
use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{ChatResponse, Pipeline};
use crate::session::DataSource;

/// Answer a single question from the command line
pub async fn run_ask(config: Config, query: &str, json: bool) -> Result<()> {
    let pipeline = Pipeline::new(&config)?;
    let session_id = format!("cli-{}", Utc::now().timestamp());

    let response = pipeline.handle(query, &session_id).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_response(&response));
    }

    Ok(())
}

/// Human-readable rendering of a response
pub fn render_response(response: &ChatResponse) -> String {
    let source = match response.data_source {
        DataSource::Erddap => "erddap".green(),
        DataSource::Gemini => "gemini".yellow(),
        DataSource::Error => "error".red(),
    };

    let mut out = format!("\n{} {}\n", "Source:".bold(), source);

    if let Some(variable) = response.structured_query.primary_variable() {
        out.push_str(&format!("{} {}\n", "Variable:".bold(), variable));
    }

    if let Some(data) = &response.erddap_data {
        out.push_str(&format!(
            "{} {} ({})\n{} {} of {} rows\n{} {}\n",
            "Dataset:".bold(),
            data.dataset_id.cyan(),
            data.dataset_title,
            "Rows:".bold(),
            data.data_rows.len(),
            data.total_rows,
            "Query:".bold(),
            data.query_url
        ));
    }

    out.push('\n');
    out.push_str(&response.answer);
    out.push_str("\n\n");
    out
}
