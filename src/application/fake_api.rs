// In-memory StatsApi for controller and event loop tests
use crate::application::stats_api::StatsApi;
use crate::domain::stats::{
    AnalyticsSummary, BoroughCount, HealthStatus, QualityReport, SpeedPoint, SummaryStats,
};
use crate::domain::trips::{TripPage, TripQuery};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Returns canned payloads and records every request path it receives
#[derive(Default)]
pub struct FakeStatsApi {
    pub summary: Option<SummaryStats>,
    pub quality: Option<QualityReport>,
    pub boroughs: Option<Vec<BoroughCount>>,
    pub speed: Option<Vec<SpeedPoint>>,
    pub analytics: Option<AnalyticsSummary>,
    pub trips: Option<TripPage>,
    /// The four dashboard requests wait here before answering
    pub dashboard_barrier: Option<Arc<Barrier>>,
    /// `top_expensive_trips` never answers
    pub stall_top_expensive: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeStatsApi {
    /// Every endpoint answers with realistic data
    pub fn populated() -> Self {
        Self {
            summary: serde_json::from_value(json!({"total_trips": 1234567, "avg_fare": 17.5})).ok(),
            quality: serde_json::from_value(json!({
                "overall_score": "92.31%",
                "rejected_records": 66498,
                "detailed_issues": [
                    {"issue": "Time Reversal", "count": 53662, "status": "critical"},
                    {"issue": "Extreme Speed (>100MPH)", "count": 250, "status": "warning"},
                    {"issue": "Unknown Zones", "count": 0, "status": "success"}
                ]
            }))
            .ok(),
            boroughs: serde_json::from_value(json!([
                {"Borough": "Manhattan", "trip_count": 2400000},
                {"Borough": "Queens", "trip_count": 210000},
                {"Borough": "Staten Island", "trip_count": 310}
            ]))
            .ok(),
            speed: serde_json::from_value(json!([
                {"time_of_day": "Morning", "avg_speed": 11.2},
                {"time_of_day": "Evening", "avg_speed": 9.8}
            ]))
            .ok(),
            analytics: serde_json::from_value(json!({
                "kpis": {"total_revenue": "$54.2M", "avg_trip_duration": "14.2 min"},
                "chart_data": [{"hour": "00:00", "trips": 9000}, {"hour": "01:00", "trips": 6100}]
            }))
            .ok(),
            trips: serde_json::from_value(json!({
                "data": [
                    {
                        "pickup_borough": "Manhattan",
                        "pickup_location": 161,
                        "dropoff_location": 236,
                        "total_amount": 88.1,
                        "trip_distance": 19.4,
                        "speed": 22.17,
                        "pickup_time": "2024-01-15 06:02:11"
                    },
                    {
                        "pickup_borough": "Manhattan",
                        "pickup_location": 237,
                        "dropoff_location": 141,
                        "total_amount": 12.0,
                        "trip_distance": 1.1,
                        "speed": 8.0,
                        "pickup_time": "2024-01-15 13:45:00"
                    }
                ]
            }))
            .ok(),
            dashboard_barrier: None,
            stall_top_expensive: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, path: impl Into<String>) {
        self.calls.lock().unwrap().push(path.into());
    }

    async fn dashboard_rendezvous(&self) {
        if let Some(barrier) = &self.dashboard_barrier {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl StatsApi for FakeStatsApi {
    async fn health(&self) -> Option<HealthStatus> {
        self.record("/health");
        None
    }

    async fn summary(&self) -> Option<SummaryStats> {
        self.record("/stats/summary");
        self.dashboard_rendezvous().await;
        self.summary.clone()
    }

    async fn quality(&self) -> Option<QualityReport> {
        self.record("/stats/quality");
        self.dashboard_rendezvous().await;
        self.quality.clone()
    }

    async fn borough_distribution(&self) -> Option<Vec<BoroughCount>> {
        self.record("/stats/charts/boroughs");
        self.dashboard_rendezvous().await;
        self.boroughs.clone()
    }

    async fn speed_efficiency(&self) -> Option<Vec<SpeedPoint>> {
        self.record("/stats/charts/efficiency");
        self.dashboard_rendezvous().await;
        self.speed.clone()
    }

    async fn analytics_summary(&self) -> Option<AnalyticsSummary> {
        self.record("/analytics/summary");
        self.analytics.clone()
    }

    async fn custom_borough_revenue(&self) -> Option<serde_json::Value> {
        self.record("/analytics/borough-custom");
        Some(json!([{"borough": "Manhattan", "revenue": 1.5e7}]))
    }

    async fn top_expensive_trips(&self, n: u32) -> Option<serde_json::Value> {
        self.record(format!("/trips/top-expensive?n={}", n));
        if self.stall_top_expensive {
            std::future::pending::<()>().await;
        }
        Some(json!({"data": []}))
    }

    async fn sorted_trips(&self, query: &TripQuery) -> Option<TripPage> {
        self.record(query.path());
        self.trips.clone()
    }
}
