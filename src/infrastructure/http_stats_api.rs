// HTTP client for the statistics backend
use crate::application::stats_api::StatsApi;
use crate::domain::stats::{
    AnalyticsSummary, BoroughCount, HealthStatus, QualityReport, SpeedPoint, SummaryStats,
};
use crate::domain::trips::{TripPage, TripQuery};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned status {status}")]
    Status { path: String, status: StatusCode },
    #[error("failed to parse response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpStatsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Errors stop here: they are logged and reported as missing data
    async fn call<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.fetch_json(path).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("API error: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl StatsApi for HttpStatsApi {
    async fn health(&self) -> Option<HealthStatus> {
        self.call("/health").await
    }

    async fn summary(&self) -> Option<SummaryStats> {
        self.call("/stats/summary").await
    }

    async fn quality(&self) -> Option<QualityReport> {
        self.call("/stats/quality").await
    }

    async fn borough_distribution(&self) -> Option<Vec<BoroughCount>> {
        self.call("/stats/charts/boroughs").await
    }

    async fn speed_efficiency(&self) -> Option<Vec<SpeedPoint>> {
        self.call("/stats/charts/efficiency").await
    }

    async fn analytics_summary(&self) -> Option<AnalyticsSummary> {
        self.call("/analytics/summary").await
    }

    async fn custom_borough_revenue(&self) -> Option<serde_json::Value> {
        self.call("/analytics/borough-custom").await
    }

    async fn top_expensive_trips(&self, n: u32) -> Option<serde_json::Value> {
        self.call(&format!("/trips/top-expensive?n={}", n)).await
    }

    async fn sorted_trips(&self, query: &TripQuery) -> Option<TripPage> {
        self.call(&query.path()).await
    }
}
