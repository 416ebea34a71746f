// Statistics payloads served by the trip analytics backend
use serde::{Deserialize, Deserializer};

/// A value the backend sends either as a number or as preformatted text
/// (`92.31`, `"92.31%"`, `"$12.3M"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryStats {
    pub total_trips: u64,
    pub avg_fare: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[serde(alias = "ok")]
    Success,
    #[serde(alias = "warn")]
    Warning,
    #[serde(alias = "error")]
    Critical,
    #[serde(other)]
    Unknown,
}

impl IssueStatus {
    /// Class name used both for the card modifier and the `--status-*` colour variable
    pub fn css_class(&self) -> &'static str {
        match self {
            IssueStatus::Success => "success",
            IssueStatus::Warning => "warning",
            IssueStatus::Critical => "critical",
            IssueStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityIssue {
    pub issue: String,
    pub count: u64,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityReport {
    pub overall_score: Metric,
    pub rejected_records: u64,
    #[serde(default)]
    pub valid_records: Option<u64>,
    #[serde(default)]
    pub detailed_issues: Vec<QualityIssue>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoroughCount {
    #[serde(rename = "Borough", alias = "borough", default)]
    pub borough: Option<String>,
    pub trip_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeedPoint {
    pub time_of_day: String,
    pub avg_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyPoint {
    pub hour: String,
    pub trips: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsKpis {
    pub total_revenue: Metric,
    pub avg_trip_duration: Metric,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsSummary {
    pub kpis: AnalyticsKpis,
    #[serde(default)]
    pub chart_data: Vec<HourlyPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database_found: bool,
}

/// Accepts `12.5` as well as `"12.5"`. Text that is not numeric becomes NaN
/// so that one bad cell does not discard the whole page.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        Raw::Null => f64::NAN,
    })
}
