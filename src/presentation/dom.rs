// DOM update descriptions and a headless document that applies them
use crate::domain::chart::{ChartConfig, ChartId};
use crate::domain::stats::IssueStatus;
use crate::domain::view::{Theme, View};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

pub const TABLE_COLUMNS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Root,
    ViewContainer(View),
    NavLink(View),
    TotalTrips,
    AvgFare,
    QualityScore,
    RejectedCount,
    TotalRevenue,
    AvgDuration,
    OverallScoreLarge,
    IssueList,
    TripsBody,
}

impl Element {
    /// KPI fields whose text is replaced by the loaders
    pub const KPIS: [Element; 7] = [
        Element::TotalTrips,
        Element::AvgFare,
        Element::QualityScore,
        Element::RejectedCount,
        Element::TotalRevenue,
        Element::AvgDuration,
        Element::OverallScoreLarge,
    ];

    pub fn dom_id(&self) -> String {
        match self {
            Element::Root => "body".to_string(),
            Element::ViewContainer(view) => format!("{}-view", view.name()),
            Element::NavLink(view) => format!("nav-{}", view.name()),
            Element::TotalTrips => "total-trips".to_string(),
            Element::AvgFare => "avg-fare".to_string(),
            Element::QualityScore => "quality-score".to_string(),
            Element::RejectedCount => "rejected-count-text".to_string(),
            Element::TotalRevenue => "total-revenue".to_string(),
            Element::AvgDuration => "avg-duration".to_string(),
            Element::OverallScoreLarge => "overall-score-large".to_string(),
            Element::IssueList => "issue-list".to_string(),
            Element::TripsBody => "trips-tbody".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRow {
    pub borough: String,
    pub pickup_zone: String,
    pub dropoff_zone: String,
    pub amount: String,
    pub distance: String,
    pub speed: String,
    pub pickup_clock: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityItem {
    pub label: String,
    pub count: String,
    pub status: IssueStatus,
    pub fill_percent: f64,
}

/// Child content inserted by `DomPatch::ReplaceChildren`
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    TripRow(TripRow),
    /// A single row spanning every table column
    TableMessage { text: String, loading: bool },
    QualityItem(QualityItem),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::TripRow(row) => write!(
                f,
                "{} | {} | {} | {} | {} | {} | {}",
                row.borough,
                row.pickup_zone,
                row.dropoff_zone,
                row.amount,
                row.distance,
                row.speed,
                row.pickup_clock
            ),
            Fragment::TableMessage { text, loading } => {
                if *loading {
                    write!(f, "… {}", text)
                } else {
                    f.write_str(text)
                }
            }
            Fragment::QualityItem(item) => write!(
                f,
                "[{}] {} {} ({}%)",
                item.status.css_class(),
                item.label,
                item.count,
                item.fill_percent
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    SetText {
        element: Element,
        text: String,
    },
    SetVisible {
        element: Element,
        visible: bool,
    },
    SetClass {
        element: Element,
        class: &'static str,
        present: bool,
    },
    ToggleClass {
        element: Element,
        class: &'static str,
    },
    ReplaceChildren {
        element: Element,
        fragments: Vec<Fragment>,
    },
    CreateChart {
        chart: ChartId,
        instance: u64,
        config: ChartConfig,
    },
    DestroyChart {
        chart: ChartId,
        instance: u64,
    },
    RefreshChart {
        chart: ChartId,
        instance: u64,
    },
}

/// Rendering surface the controller writes to
pub trait Document {
    fn apply(&mut self, patch: &DomPatch);
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveChart {
    pub instance: u64,
    pub config: ChartConfig,
    pub renders: u32,
}

/// Document model kept in memory; used by the terminal front end and tests.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    texts: HashMap<Element, String>,
    visible: HashSet<Element>,
    classes: HashMap<Element, BTreeSet<&'static str>>,
    children: HashMap<Element, Vec<Fragment>>,
    canvases: BTreeMap<ChartId, Vec<LiveChart>>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocument {
    /// Static markup: placeholder KPI text and the light theme on the root.
    pub fn new() -> Self {
        let texts = Element::KPIS
            .iter()
            .map(|element| (*element, "--".to_string()))
            .collect();
        let mut classes = HashMap::new();
        classes.insert(Element::Root, BTreeSet::from([Theme::Light.class()]));

        Self {
            texts,
            visible: HashSet::new(),
            classes,
            children: HashMap::new(),
            canvases: BTreeMap::new(),
        }
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    pub fn visible_views(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|v| self.is_visible(Element::ViewContainer(*v)))
            .collect()
    }

    pub fn has_class(&self, element: Element, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|set| set.contains(class))
    }

    pub fn classes(&self, element: Element) -> Vec<&'static str> {
        self.classes
            .get(&element)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn children(&self, element: Element) -> &[Fragment] {
        self.children
            .get(&element)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Instances currently attached to a chart's canvas
    pub fn live_charts(&self, chart: ChartId) -> &[LiveChart] {
        self.canvases
            .get(&chart)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Document for InMemoryDocument {
    fn apply(&mut self, patch: &DomPatch) {
        match patch {
            DomPatch::SetText { element, text } => {
                self.texts.insert(*element, text.clone());
            }
            DomPatch::SetVisible { element, visible } => {
                if *visible {
                    self.visible.insert(*element);
                } else {
                    self.visible.remove(element);
                }
            }
            DomPatch::SetClass {
                element,
                class,
                present,
            } => {
                let set = self.classes.entry(*element).or_default();
                if *present {
                    set.insert(*class);
                } else {
                    set.remove(class);
                }
            }
            DomPatch::ToggleClass { element, class } => {
                let set = self.classes.entry(*element).or_default();
                if !set.remove(class) {
                    set.insert(*class);
                }
            }
            DomPatch::ReplaceChildren { element, fragments } => {
                self.children.insert(*element, fragments.clone());
            }
            DomPatch::CreateChart {
                chart,
                instance,
                config,
            } => {
                self.canvases.entry(*chart).or_default().push(LiveChart {
                    instance: *instance,
                    config: config.clone(),
                    renders: 1,
                });
            }
            DomPatch::DestroyChart { chart, instance } => {
                if let Some(live) = self.canvases.get_mut(chart) {
                    live.retain(|c| c.instance != *instance);
                }
            }
            DomPatch::RefreshChart { chart, instance } => {
                if let Some(live) = self
                    .canvases
                    .get_mut(chart)
                    .and_then(|live| live.iter_mut().find(|c| c.instance == *instance))
                {
                    live.renders += 1;
                }
            }
        }
    }
}

impl fmt::Display for InMemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let views: Vec<&str> = self.visible_views().iter().map(|v| v.name()).collect();
        writeln!(
            f,
            "== view: {} | theme: {}",
            views.join(","),
            self.classes(Element::Root).join(" ")
        )?;

        for element in Element::KPIS {
            writeln!(
                f,
                "{:>20}: {}",
                element.dom_id(),
                self.text(element).unwrap_or_default()
            )?;
        }

        for (chart, live) in &self.canvases {
            for instance in live {
                writeln!(
                    f,
                    "{:>20}: #{} {:?} [{}] (renders: {})",
                    chart.canvas_id(),
                    instance.instance,
                    instance.config.kind,
                    instance.config.labels().join(", "),
                    instance.renders
                )?;
            }
        }

        for element in [Element::IssueList, Element::TripsBody] {
            let fragments = self.children(element);
            if fragments.is_empty() {
                continue;
            }
            writeln!(f, "-- {} ({})", element.dom_id(), fragments.len())?;
            for fragment in fragments {
                writeln!(f, "   {}", fragment)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartData, ChartKind};

    fn config() -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: vec!["Queens".to_string()],
                datasets: Vec::new(),
            },
            options: None,
        }
    }

    #[test]
    fn test_new_document_has_placeholder_kpis() {
        let doc = InMemoryDocument::new();
        assert_eq!(doc.text(Element::TotalTrips), Some("--"));
        assert!(doc.has_class(Element::Root, "light-mode"));
        assert!(doc.visible_views().is_empty());
    }

    #[test]
    fn test_toggle_class() {
        let mut doc = InMemoryDocument::new();
        let toggle = DomPatch::ToggleClass {
            element: Element::Root,
            class: "dark-mode",
        };
        doc.apply(&toggle);
        assert!(doc.has_class(Element::Root, "dark-mode"));
        doc.apply(&toggle);
        assert!(!doc.has_class(Element::Root, "dark-mode"));
    }

    #[test]
    fn test_create_without_destroy_overlaps() {
        let mut doc = InMemoryDocument::new();
        for instance in [1, 2] {
            doc.apply(&DomPatch::CreateChart {
                chart: ChartId::Borough,
                instance,
                config: config(),
            });
        }
        assert_eq!(doc.live_charts(ChartId::Borough).len(), 2);

        doc.apply(&DomPatch::DestroyChart {
            chart: ChartId::Borough,
            instance: 1,
        });
        let live = doc.live_charts(ChartId::Borough);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].instance, 2);
    }

    #[test]
    fn test_refresh_counts_renders() {
        let mut doc = InMemoryDocument::new();
        doc.apply(&DomPatch::CreateChart {
            chart: ChartId::Speed,
            instance: 7,
            config: config(),
        });
        doc.apply(&DomPatch::RefreshChart {
            chart: ChartId::Speed,
            instance: 7,
        });
        assert_eq!(doc.live_charts(ChartId::Speed)[0].renders, 2);
    }

    #[test]
    fn test_element_ids() {
        assert_eq!(Element::ViewContainer(View::Quality).dom_id(), "quality-view");
        assert_eq!(Element::RejectedCount.dom_id(), "rejected-count-text");
    }
}
