//! Prompts and static answer templates
//!
//! This module builds every prompt sent to the generation service and the
//! static texts used when that service is unavailable.

pub mod answer_prompt;
pub mod parse_prompt;
pub mod templates;

pub use answer_prompt::{generate_data_prompt, generate_fallback_prompt};
pub use parse_prompt::generate_parse_prompt;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::StructuredQuery;
    use crate::test_utils::sample_fetched_data;

    #[test]
    fn test_parse_prompt_lists_schema_fields() {
        let prompt = generate_parse_prompt("chlorophyll in the Bay of Bengal");
        for field in [
            "variable:",
            "variable_aliases:",
            "coordinates:",
            "bbox:",
            "depth_m:",
            "time_start:",
            "time_end:",
            "aggregation:",
            "units:",
            "additional_context:",
        ] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains(r#"{"lat": float, "lon": float}"#));
    }

    #[test]
    fn test_data_prompt_samples_ten_rows() {
        let data = sample_fetched_data(25);
        let prompt = generate_data_prompt("sst trends", &data);
        assert!(prompt.contains("The user asked: \"sst trends\""));
        assert!(prompt.contains("Total data points: 25"));
        assert!(prompt.contains("Dataset ID: erdTestSst"));
        assert!(prompt.contains("[\"2024-01-10T00:00:00Z\""));
        assert!(!prompt.contains("[\"2024-01-11T00:00:00Z\""));
    }

    #[test]
    fn test_data_prompt_unknown_title() {
        let mut data = sample_fetched_data(1);
        data.dataset_title = String::new();
        let prompt = generate_data_prompt("q", &data);
        assert!(prompt.contains("Dataset: Unknown"));
    }

    #[test]
    fn test_fallback_prompt_embeds_structured_query() {
        let query = StructuredQuery {
            variable: Some("nitrate".to_string()),
            location: Some("Gulf of Mexico".to_string()),
            ..StructuredQuery::default()
        };
        let prompt = generate_fallback_prompt("nitrate in the gulf", &query);
        assert!(prompt.contains("\"variable\": \"nitrate\""));
        assert!(prompt.contains("unable to find suitable datasets"));
    }

    #[test]
    fn test_data_summary_template() {
        let summary = templates::data_summary(&sample_fetched_data(7));
        assert!(summary.starts_with("I successfully retrieved 7 data points for analysed_sst"));
        assert!(summary.contains("Test SST Analysis"));
    }

    #[test]
    fn test_general_guidance_defaults() {
        let text = templates::general_guidance(&StructuredQuery::default());
        assert!(text.starts_with(
            "I can help you understand oceanographic parameter data for the specified location."
        ));
    }

    #[test]
    fn test_general_guidance_uses_query_fields() {
        let query = StructuredQuery {
            variable: Some("salinity".to_string()),
            location: Some("Red Sea".to_string()),
            ..StructuredQuery::default()
        };
        let text = templates::general_guidance(&query);
        assert!(text.starts_with("I can help you understand salinity data for Red Sea."));
    }
}
