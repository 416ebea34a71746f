// Trip records and the sorted-trips query
use super::stats::{Metric, lenient_f64};
use serde::Deserialize;

pub const DEFAULT_SORT_FIELD: &str = "total_amount";
pub const DEFAULT_TRIP_LIMIT: u32 = 10;
pub const DEFAULT_TOP_TRIPS: u32 = 10;

/// Rows requested by the trips table on every refresh
pub const TABLE_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(default)]
    pub pickup_borough: Option<String>,
    pub pickup_location: Metric,
    pub dropoff_location: Metric,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    pub trip_distance: Metric,
    #[serde(deserialize_with = "lenient_f64")]
    pub speed: f64,
    pub pickup_time: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TripPage {
    #[serde(default)]
    pub data: Vec<TripRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripQuery {
    pub sort_by: String,
    pub limit: u32,
    pub borough: Option<String>,
}

impl Default for TripQuery {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            limit: DEFAULT_TRIP_LIMIT,
            borough: None,
        }
    }
}

impl TripQuery {
    pub fn new(sort_by: impl Into<String>, limit: u32, borough: Option<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            limit,
            borough,
        }
    }

    /// Path and query string relative to the API base
    pub fn path(&self) -> String {
        let mut path = format!(
            "/trips/custom-sort?sort_by={}&limit={}",
            urlencoding::encode(&self.sort_by),
            self.limit
        );
        if let Some(borough) = self.borough.as_deref().filter(|b| !b.is_empty()) {
            path.push_str("&borough=");
            path.push_str(&urlencoding::encode(borough));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_path() {
        assert_eq!(
            TripQuery::default().path(),
            "/trips/custom-sort?sort_by=total_amount&limit=10"
        );
    }

    #[test]
    fn test_borough_is_percent_encoded() {
        let query = TripQuery::new("speed", 100, Some("Staten Island".to_string()));
        assert_eq!(
            query.path(),
            "/trips/custom-sort?sort_by=speed&limit=100&borough=Staten%20Island"
        );
    }

    #[test]
    fn test_empty_borough_is_omitted() {
        let query = TripQuery::new("trip_distance", 100, Some(String::new()));
        assert_eq!(
            query.path(),
            "/trips/custom-sort?sort_by=trip_distance&limit=100"
        );
    }

    #[test]
    fn test_trip_record_accepts_numeric_strings() {
        let page: TripPage = serde_json::from_value(json!({
            "data": [{
                "pickup_borough": "Brooklyn",
                "pickup_location": 61,
                "dropoff_location": "17",
                "total_amount": "23.5",
                "trip_distance": 4.2,
                "speed": 11.04,
                "pickup_time": "2024-01-03 08:15:42"
            }]
        }))
        .unwrap();

        let trip = &page.data[0];
        assert_eq!(trip.total_amount, 23.5);
        assert_eq!(trip.pickup_location, Metric::Number(61.0));
        assert_eq!(trip.dropoff_location, Metric::Text("17".to_string()));
    }

    #[test]
    fn test_page_without_data_is_empty() {
        let page: TripPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.data.is_empty());
    }
}
