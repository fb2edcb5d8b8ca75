//! Canned intents that bypass the generation service
//!
//! A handful of demo questions always resolve to hand-authored structured
//! queries. Each intent is recognised when every one of its keywords occurs
//! in the lower-cased question.

use super::types::{BoundingBox, StructuredQuery};

/// A recognised intent and the structured query it resolves to
pub struct Intent {
    /// Stable identifier used in logs
    pub name: &'static str,
    /// Lower-case phrases that must all be present
    pub keywords: &'static [&'static str],
    build: fn() -> StructuredQuery,
}

impl Intent {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().all(|keyword| lowered.contains(keyword))
    }

    /// The canned structured query for this intent
    pub fn structured_query(&self) -> StructuredQuery {
        (self.build)()
    }
}

/// Intents in priority order
pub static INTENTS: &[Intent] = &[
    Intent {
        name: "equatorial_salinity_profiles",
        keywords: &["salinity profiles", "equator", "march 2023"],
        build: equatorial_salinity_profiles,
    },
    Intent {
        name: "arabian_sea_bgc",
        keywords: &["bgc", "arabian sea", "last 6 months"],
        build: arabian_sea_bgc,
    },
    Intent {
        name: "nearest_argo_floats",
        keywords: &["nearest", "argo float"],
        build: nearest_argo_floats,
    },
];

/// Find the first canned intent matching `query`
///
/// # Examples
///
/// ```
/// use ocean_nli::query::shortcuts::match_intent;
///
/// let intent = match_intent("Where are the nearest ARGO floats?").unwrap();
/// assert_eq!(intent.name, "nearest_argo_floats");
/// assert!(match_intent("sea surface temperature near Mumbai").is_none());
/// ```
pub fn match_intent(query: &str) -> Option<&'static Intent> {
    let lowered = query.to_lowercase();
    INTENTS.iter().find(|intent| intent.matches(&lowered))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn equatorial_salinity_profiles() -> StructuredQuery {
    StructuredQuery {
        variable: Some("salinity".to_string()),
        variable_aliases: strings(&["sss", "sea_surface_salinity"]),
        location: Some("Equator".to_string()),
        bbox: Some(BoundingBox {
            min_lat: -2.0,
            max_lat: 2.0,
            min_lon: -180.0,
            max_lon: 180.0,
        }),
        time_period: Some("March 2023".to_string()),
        time_start: Some("2023-03-01T00:00:00Z".to_string()),
        time_end: Some("2023-03-31T23:59:59Z".to_string()),
        aggregation: Some("profile".to_string()),
        units: Some("psu".to_string()),
        erddap_dataset_hints: strings(&["argo_all_prof"]),
        additional_context: Some(
            "Retrieve vertical salinity profiles along the equator (±2° lat) in March 2023"
                .to_string(),
        ),
        ..StructuredQuery::default()
    }
}

fn arabian_sea_bgc() -> StructuredQuery {
    StructuredQuery {
        variable: Some("bgc".to_string()),
        variable_aliases: strings(&[
            "chlorophyll_a",
            "dissolved_oxygen",
            "nitrate",
            "phosphate",
        ]),
        location: Some("Arabian Sea".to_string()),
        bbox: Some(BoundingBox {
            min_lat: 10.0,
            max_lat: 25.0,
            min_lon: 55.0,
            max_lon: 75.0,
        }),
        time_period: Some("last 6 months".to_string()),
        time_start: Some("2023-09-01T00:00:00Z".to_string()),
        time_end: Some("2024-02-29T23:59:59Z".to_string()),
        aggregation: Some("time_series".to_string()),
        erddap_dataset_hints: strings(&["argo_bgc", "coriolis"]),
        additional_context: Some(
            "Compare biogeochemical parameters (chlorophyll, DO, nitrate, phosphate) in the Arabian Sea"
                .to_string(),
        ),
        ..StructuredQuery::default()
    }
}

fn nearest_argo_floats() -> StructuredQuery {
    StructuredQuery {
        variable: Some("argo_float".to_string()),
        location: Some("user-specified location".to_string()),
        time_period: Some("recent".to_string()),
        erddap_dataset_hints: strings(&["argo_all_traj"]),
        additional_context: Some(
            "Find nearest ARGO float positions to given coordinates".to_string(),
        ),
        ..StructuredQuery::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salinity_intent_exact_phrase() {
        let intent =
            match_intent("Show me salinity profiles near the equator in March 2023").unwrap();
        let query = intent.structured_query();
        assert_eq!(query.variable.as_deref(), Some("salinity"));
        assert_eq!(
            query.bbox,
            Some(BoundingBox {
                min_lat: -2.0,
                max_lat: 2.0,
                min_lon: -180.0,
                max_lon: 180.0
            })
        );
        assert_eq!(query.time_start.as_deref(), Some("2023-03-01T00:00:00Z"));
        assert_eq!(query.time_end.as_deref(), Some("2023-03-31T23:59:59Z"));
    }

    #[test]
    fn test_bgc_intent_is_case_insensitive() {
        let intent =
            match_intent("COMPARE BGC parameters in the ARABIAN SEA for the LAST 6 MONTHS")
                .unwrap();
        assert_eq!(intent.name, "arabian_sea_bgc");
        let query = intent.structured_query();
        assert_eq!(query.variable_aliases.len(), 4);
        assert!(query.units.is_none());
    }

    #[test]
    fn test_argo_intent() {
        let query = match_intent("What are the nearest ARGO floats to this location?")
            .unwrap()
            .structured_query();
        assert_eq!(query.variable.as_deref(), Some("argo_float"));
        assert!(query.bbox.is_none());
        assert!(query.time_start.is_none());
        assert!(query.variable_aliases.is_empty());
    }

    #[test]
    fn test_partial_keywords_do_not_match() {
        assert!(match_intent("salinity profiles near the equator").is_none());
        assert!(match_intent("bgc in the arabian sea").is_none());
        assert!(match_intent("nearest buoy").is_none());
    }

    #[test]
    fn test_canned_queries_are_stable() {
        for intent in INTENTS {
            assert_eq!(intent.structured_query(), intent.structured_query());
        }
    }
}
