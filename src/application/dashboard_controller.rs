// Dashboard controller - View switching, loaders and chart lifecycle
use crate::application::chart_registry::ChartRegistry;
use crate::application::stats_api::StatsApi;
use crate::domain::chart::{ChartConfig, ChartId};
use crate::domain::stats::{
    AnalyticsSummary, BoroughCount, QualityReport, SpeedPoint, SummaryStats,
};
use crate::domain::trips::{DEFAULT_SORT_FIELD, TABLE_PAGE_SIZE, TripPage, TripQuery};
use crate::domain::view::{Theme, View};
use crate::presentation::dom::{DomPatch, Document, Element};
use crate::presentation::views;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Current values of the borough and sort inputs above the trips table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub borough: Option<String>,
    pub sort_by: String,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self {
            borough: None,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
        }
    }
}

impl TableFilter {
    pub fn query(&self) -> TripQuery {
        TripQuery::new(self.sort_by.clone(), TABLE_PAGE_SIZE, self.borough.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Dashboard,
    Analytics,
    Quality,
    Trips(TableFilter),
}

impl LoadRequest {
    pub fn for_view(view: View) -> Self {
        match view {
            View::Dashboard => LoadRequest::Dashboard,
            View::Analytics => LoadRequest::Analytics,
            View::Quality => LoadRequest::Quality,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: Option<SummaryStats>,
    pub quality: Option<QualityReport>,
    pub boroughs: Option<Vec<BoroughCount>>,
    pub speed: Option<Vec<SpeedPoint>>,
}

#[derive(Debug, Clone)]
pub enum Loaded {
    Dashboard(DashboardData),
    Analytics(Option<AnalyticsSummary>),
    Quality(Option<QualityReport>),
    Trips(Option<TripPage>),
}

/// A started load. Its result is only rendered while the token is live.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    request: LoadRequest,
    token: CancellationToken,
}

impl PendingLoad {
    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Fetches everything a request needs. The dashboard fans out four requests
/// and waits for all of them.
pub async fn fetch(api: &dyn StatsApi, request: &LoadRequest) -> Loaded {
    match request {
        LoadRequest::Dashboard => {
            let (summary, quality, boroughs, speed) = tokio::join!(
                api.summary(),
                api.quality(),
                api.borough_distribution(),
                api.speed_efficiency()
            );
            Loaded::Dashboard(DashboardData {
                summary,
                quality,
                boroughs,
                speed,
            })
        }
        LoadRequest::Analytics => Loaded::Analytics(api.analytics_summary().await),
        LoadRequest::Quality => Loaded::Quality(api.quality().await),
        LoadRequest::Trips(filter) => Loaded::Trips(api.sorted_trips(&filter.query()).await),
    }
}

pub struct DashboardController<D: Document> {
    api: Arc<dyn StatsApi>,
    document: D,
    charts: ChartRegistry,
    active_view: View,
    theme: Theme,
    filter: TableFilter,
    view_token: CancellationToken,
    table_token: CancellationToken,
}

impl<D: Document> DashboardController<D> {
    pub fn new(api: Arc<dyn StatsApi>, document: D) -> Self {
        let view_token = CancellationToken::new();
        let table_token = view_token.child_token();
        Self {
            api,
            document,
            charts: ChartRegistry::new(),
            active_view: View::default(),
            theme: Theme::default(),
            filter: TableFilter::default(),
            view_token,
            table_token,
        }
    }

    pub fn api(&self) -> Arc<dyn StatsApi> {
        self.api.clone()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> &TableFilter {
        &self.filter
    }

    /// Initial render: the dashboard view in the current theme, then its load
    pub fn mount(&mut self) -> PendingLoad {
        self.commit(views::navigation(self.active_view));
        self.commit([DomPatch::SetClass {
            element: Element::Root,
            class: self.theme.class(),
            present: true,
        }]);
        self.begin(LoadRequest::for_view(self.active_view))
    }

    /// Switches views. Always re-fetches, even when `view` is already active.
    pub fn navigate(&mut self, view: View) -> PendingLoad {
        tracing::debug!("Switching view {} -> {}", self.active_view, view);
        self.active_view = view;
        self.commit(views::navigation(view));
        self.begin(LoadRequest::for_view(view))
    }

    /// Flips between the light and dark classes and re-renders live charts.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.commit([
            DomPatch::ToggleClass {
                element: Element::Root,
                class: Theme::Dark.class(),
            },
            DomPatch::ToggleClass {
                element: Element::Root,
                class: Theme::Light.class(),
            },
        ]);
        let refresh = self.charts.refresh_all();
        self.commit(refresh);
    }

    /// An empty borough clears the filter
    pub fn set_borough_filter(&mut self, borough: Option<String>) -> PendingLoad {
        self.filter.borough = borough.filter(|b| !b.trim().is_empty());
        self.begin(LoadRequest::Trips(self.filter.clone()))
    }

    pub fn set_sort_field(&mut self, sort_by: impl Into<String>) -> PendingLoad {
        self.filter.sort_by = sort_by.into();
        self.begin(LoadRequest::Trips(self.filter.clone()))
    }

    /// Starts a load, cancelling the one it supersedes. View loads supersede
    /// the previous view load and any table load under it; table loads only
    /// supersede the previous table load.
    pub fn begin(&mut self, request: LoadRequest) -> PendingLoad {
        let token = match &request {
            LoadRequest::Trips(_) => {
                self.table_token.cancel();
                self.table_token = self.view_token.child_token();
                self.commit([views::trips_loading()]);
                self.table_token.clone()
            }
            _ => {
                self.view_token.cancel();
                self.view_token = CancellationToken::new();
                self.table_token = self.view_token.child_token();
                self.view_token.clone()
            }
        };

        tracing::debug!("Starting load {:?}", request);
        PendingLoad { request, token }
    }

    /// Renders a finished load. Returns the follow-up load, if any.
    pub fn complete(&mut self, pending: PendingLoad, loaded: Loaded) -> Option<PendingLoad> {
        if pending.is_stale() {
            tracing::debug!("Dropping stale result for {:?}", pending.request);
            return None;
        }

        match loaded {
            Loaded::Dashboard(data) => {
                self.render_dashboard(data);
                Some(self.begin(LoadRequest::Trips(TableFilter::default())))
            }
            Loaded::Analytics(data) => {
                if let Some(analytics) = data {
                    self.commit(views::analytics_kpis(&analytics.kpis));
                    self.render_chart(ChartId::Hourly, views::hourly_chart(&analytics.chart_data));
                }
                None
            }
            Loaded::Quality(data) => {
                if let Some(report) = data {
                    self.commit(views::quality_view(&report));
                }
                None
            }
            Loaded::Trips(page) => {
                if let Some(page) = &page {
                    tracing::debug!("Rendering {} trip rows", page.data.len());
                }
                self.commit([views::trips_table(page.as_ref())]);
                None
            }
        }
    }

    /// Fetches and renders a load and its follow-ups in place
    pub async fn run(&mut self, pending: PendingLoad) {
        let mut next = Some(pending);
        while let Some(pending) = next {
            let loaded = fetch(self.api.as_ref(), pending.request()).await;
            next = self.complete(pending, loaded);
        }
    }

    pub async fn load_dashboard(&mut self) {
        let pending = self.begin(LoadRequest::Dashboard);
        self.run(pending).await;
    }

    pub async fn load_analytics(&mut self) {
        let pending = self.begin(LoadRequest::Analytics);
        self.run(pending).await;
    }

    pub async fn load_quality(&mut self) {
        let pending = self.begin(LoadRequest::Quality);
        self.run(pending).await;
    }

    pub async fn load_trips_table(&mut self, filter: TableFilter) {
        let pending = self.begin(LoadRequest::Trips(filter));
        self.run(pending).await;
    }

    fn render_dashboard(&mut self, data: DashboardData) {
        if let Some(summary) = &data.summary {
            self.commit(views::summary_kpis(summary));
        }
        if let Some(quality) = &data.quality {
            self.commit(views::quality_kpis(quality));
        }
        if let Some(boroughs) = &data.boroughs {
            self.render_chart(ChartId::Borough, views::borough_chart(boroughs));
        }
        if let Some(speed) = &data.speed {
            self.render_chart(ChartId::Speed, views::speed_chart(speed));
        }
    }

    fn render_chart(&mut self, chart: ChartId, config: ChartConfig) {
        let patches = self.charts.replace(chart, config);
        self.commit(patches);
    }

    fn commit(&mut self, patches: impl IntoIterator<Item = DomPatch>) {
        for patch in patches {
            tracing::trace!("Applying {:?}", patch);
            self.document.apply(&patch);
        }
    }
}
