// Data access trait for the statistics backend
use crate::domain::stats::{
    AnalyticsSummary, BoroughCount, HealthStatus, QualityReport, SpeedPoint, SummaryStats,
};
use crate::domain::trips::{TripPage, TripQuery};
use async_trait::async_trait;

/// One method per logical query. `None` means no data is available, whatever
/// the reason; implementations log failures instead of returning them.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Backend liveness and whether its database file exists
    async fn health(&self) -> Option<HealthStatus>;

    async fn summary(&self) -> Option<SummaryStats>;

    async fn quality(&self) -> Option<QualityReport>;

    async fn borough_distribution(&self) -> Option<Vec<BoroughCount>>;

    async fn speed_efficiency(&self) -> Option<Vec<SpeedPoint>>;

    async fn analytics_summary(&self) -> Option<AnalyticsSummary>;

    /// Revenue per borough computed by the backend's custom grouping.
    /// No view renders it, so the payload stays untyped.
    async fn custom_borough_revenue(&self) -> Option<serde_json::Value>;

    async fn top_expensive_trips(&self, n: u32) -> Option<serde_json::Value>;

    async fn sorted_trips(&self, query: &TripQuery) -> Option<TripPage>;
}
