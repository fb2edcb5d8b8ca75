//! Query parsing prompt
//!
//! Instructs the generation service to turn a free-text question into the
//! structured query JSON schema.

/// Generates the prompt asking for a structured query as strict JSON
///
/// # Examples
///
/// ```
/// use ocean_nli::prompts::parse_prompt::generate_parse_prompt;
///
/// let prompt = generate_parse_prompt("temperature near Mumbai");
/// assert!(prompt.contains("\"temperature near Mumbai\""));
/// assert!(prompt.contains("erddap_dataset_hints"));
/// ```
pub fn generate_parse_prompt(user_query: &str) -> String {
    format!(
        r#"You are an expert oceanographer and data analyst. Parse this oceanographic query into a structured JSON format suitable for ERDDAP data queries.

User Query: "{user_query}"

Extract and return ONLY a valid JSON object with these fields:
- variable: the primary oceanographic measurement requested (e.g., "sea_surface_temperature", "salinity", "chlorophyll_a", "dissolved_oxygen") or null
- variable_aliases: list of alternative ERDDAP variable names for the measurement
- location: descriptive location mentioned (e.g., "Arabian Sea", "near Mumbai", "Indian Ocean") or null
- coordinates: if specific lat/lon mentioned, format as {{"lat": float, "lon": float}} or null
- bbox: if area mentioned, format as {{"min_lat": float, "max_lat": float, "min_lon": float, "max_lon": float}} or null
- depth_m: approximate depth in meters as a number, or null
- time_period: descriptive time period (e.g., "last month", "January 2024", "recent") or null
- time_start: ISO datetime if specific start time can be inferred (e.g., "2024-01-01T00:00:00Z") or null
- time_end: ISO datetime if specific end time can be inferred or null
- aggregation: type of analysis requested ("average", "maximum", "minimum", "trend", "time_series") or null
- units: preferred units if mentioned (e.g., "°C", "psu", "mg/L") or null
- erddap_dataset_hints: potential ERDDAP dataset IDs that might contain this data (e.g., ["erdMH1sstd1day", "erdQSsstd1day"]) or []
- additional_context: any other relevant details from the query

Common ERDDAP variable mappings:
- Temperature: "sea_surface_temperature", "temperature", "sst"
- Salinity: "salinity", "sea_surface_salinity", "sss"
- Chlorophyll: "chlorophyll_a", "chl_a", "chlor_a"
- Ocean color: "remote_sensing_reflectance", "rrs"
- Wind: "wind_speed", "wind_direction", "u_wind", "v_wind"

Be conservative - use null for uncertain extractions. Return only the JSON, no explanations.
"#
    )
}
