// View renderers - typed payloads in, DOM patches and chart configs out
use crate::domain::chart::{
    Axis, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, ScaleOptions, ScaleType,
    TickOptions,
};
use crate::domain::stats::{
    AnalyticsKpis, BoroughCount, HourlyPoint, QualityIssue, QualityReport, SpeedPoint,
    SummaryStats,
};
use crate::domain::trips::{TripPage, TripRecord};
use crate::domain::view::View;
use crate::presentation::dom::{DomPatch, Element, Fragment, QualityItem, TripRow};
use crate::presentation::format;
use std::collections::BTreeMap;

const LOADING_TEXT: &str = "Processing Manual Sort...";
const EMPTY_TEXT: &str = "No records found.";

fn set_text(element: Element, text: String) -> DomPatch {
    DomPatch::SetText { element, text }
}

/// Shows `active`, hides every other view and moves the nav highlight
pub fn navigation(active: View) -> Vec<DomPatch> {
    View::ALL
        .into_iter()
        .flat_map(|view| {
            let selected = view == active;
            [
                DomPatch::SetVisible {
                    element: Element::ViewContainer(view),
                    visible: selected,
                },
                DomPatch::SetClass {
                    element: Element::NavLink(view),
                    class: "active",
                    present: selected,
                },
            ]
        })
        .collect()
}

pub fn summary_kpis(summary: &SummaryStats) -> Vec<DomPatch> {
    vec![
        set_text(Element::TotalTrips, format::group_thousands(summary.total_trips)),
        set_text(Element::AvgFare, format!("${}", format::metric(&summary.avg_fare))),
    ]
}

pub fn quality_kpis(report: &QualityReport) -> Vec<DomPatch> {
    vec![
        set_text(Element::QualityScore, format::metric(&report.overall_score)),
        set_text(
            Element::RejectedCount,
            format!(
                "{} rejected records",
                format::group_thousands(report.rejected_records)
            ),
        ),
    ]
}

pub fn analytics_kpis(kpis: &AnalyticsKpis) -> Vec<DomPatch> {
    vec![
        set_text(Element::TotalRevenue, format::metric(&kpis.total_revenue)),
        set_text(Element::AvgDuration, format::metric(&kpis.avg_trip_duration)),
    ]
}

pub fn quality_item(issue: &QualityIssue) -> Fragment {
    Fragment::QualityItem(QualityItem {
        label: issue.issue.clone(),
        count: format::group_thousands(issue.count),
        status: issue.status,
        fill_percent: format::progress_percent(issue.count),
    })
}

/// Headline score and the rebuilt issue list
pub fn quality_view(report: &QualityReport) -> Vec<DomPatch> {
    vec![
        set_text(Element::OverallScoreLarge, format::metric(&report.overall_score)),
        DomPatch::ReplaceChildren {
            element: Element::IssueList,
            fragments: report.detailed_issues.iter().map(quality_item).collect(),
        },
    ]
}

pub fn trip_row(trip: &TripRecord) -> Fragment {
    let borough = trip
        .pickup_borough
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or("Unknown");

    Fragment::TripRow(TripRow {
        borough: borough.to_string(),
        pickup_zone: format!("Zone {}", format::metric(&trip.pickup_location)),
        dropoff_zone: format!("Zone {}", format::metric(&trip.dropoff_location)),
        amount: format::currency(trip.total_amount),
        distance: format!("{} mi", format::metric(&trip.trip_distance)),
        speed: format::speed_mph(trip.speed),
        pickup_clock: format::pickup_clock(&trip.pickup_time),
    })
}

pub fn trips_loading() -> DomPatch {
    DomPatch::ReplaceChildren {
        element: Element::TripsBody,
        fragments: vec![Fragment::TableMessage {
            text: LOADING_TEXT.to_string(),
            loading: true,
        }],
    }
}

/// One row per record in response order; a single message row when there is nothing to show
pub fn trips_table(page: Option<&TripPage>) -> DomPatch {
    let fragments = match page {
        Some(page) if !page.data.is_empty() => page.data.iter().map(trip_row).collect(),
        _ => vec![Fragment::TableMessage {
            text: EMPTY_TEXT.to_string(),
            loading: false,
        }],
    };

    DomPatch::ReplaceChildren {
        element: Element::TripsBody,
        fragments,
    }
}

/// Horizontal bars on a log scale; Manhattan dwarfs the outer boroughs.
pub fn borough_chart(rows: &[BoroughCount]) -> ChartConfig {
    let mut dataset = Dataset::new(
        "Trips",
        rows.iter().map(|r| Some(r.trip_count as f64)).collect(),
    );
    dataset.background_color = Some("#4a90e2".to_string());

    let mut scales = BTreeMap::new();
    scales.insert(
        Axis::X,
        ScaleOptions {
            scale_type: Some(ScaleType::Logarithmic),
            ticks: None,
        },
    );
    scales.insert(
        Axis::Y,
        ScaleOptions {
            scale_type: None,
            ticks: Some(TickOptions { auto_skip: false }),
        },
    );

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: rows
                .iter()
                .map(|r| r.borough.clone().unwrap_or_else(|| "Unknown".to_string()))
                .collect(),
            datasets: vec![dataset],
        },
        options: Some(ChartOptions {
            index_axis: Some(Axis::Y),
            responsive: Some(true),
            maintain_aspect_ratio: Some(false),
            scales,
        }),
    }
}

pub fn speed_chart(points: &[SpeedPoint]) -> ChartConfig {
    let mut dataset = Dataset::new(
        "Avg Speed (mph)",
        points.iter().map(|p| p.avg_speed).collect(),
    );
    dataset.border_color = Some("#1e3c72".to_string());
    dataset.background_color = Some("rgba(30, 60, 114, 0.1)".to_string());
    dataset.tension = Some(0.4);
    dataset.fill = Some(true);

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: points.iter().map(|p| p.time_of_day.clone()).collect(),
            datasets: vec![dataset],
        },
        options: None,
    }
}

pub fn hourly_chart(points: &[HourlyPoint]) -> ChartConfig {
    let mut dataset = Dataset::new(
        "Trips per Hour",
        points.iter().map(|p| Some(p.trips as f64)).collect(),
    );
    dataset.background_color = Some("#1e3c72".to_string());

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: points.iter().map(|p| p.hour.clone()).collect(),
            datasets: vec![dataset],
        },
        options: None,
    }
}
