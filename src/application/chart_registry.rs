// Live chart instances, at most one per chart
use crate::domain::chart::{ChartConfig, ChartId};
use crate::presentation::dom::DomPatch;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub instance: u64,
    pub config: ChartConfig,
}

#[derive(Debug, Default)]
pub struct ChartRegistry {
    live: BTreeMap<ChartId, ChartHandle>,
    next_instance: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chart: ChartId) -> Option<&ChartHandle> {
        self.live.get(&chart)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Removes the chart's instance, returning the patch that destroys it
    pub fn dispose(&mut self, chart: ChartId) -> Option<DomPatch> {
        self.live.remove(&chart).map(|handle| DomPatch::DestroyChart {
            chart,
            instance: handle.instance,
        })
    }

    /// Destroys any previous instance of `chart` before creating the new one.
    pub fn replace(&mut self, chart: ChartId, config: ChartConfig) -> Vec<DomPatch> {
        let mut patches = Vec::with_capacity(2);
        if let Some(destroy) = self.dispose(chart) {
            patches.push(destroy);
        }

        self.next_instance += 1;
        let instance = self.next_instance;
        patches.push(DomPatch::CreateChart {
            chart,
            instance,
            config: config.clone(),
        });
        self.live.insert(chart, ChartHandle { instance, config });

        patches
    }

    /// Re-render every live chart, e.g. after a theme change
    pub fn refresh_all(&self) -> Vec<DomPatch> {
        self.live
            .iter()
            .map(|(chart, handle)| DomPatch::RefreshChart {
                chart: *chart,
                instance: handle.instance,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartData, ChartKind};

    fn config(label: &str) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: vec![label.to_string()],
                datasets: Vec::new(),
            },
            options: None,
        }
    }

    #[test]
    fn test_first_render_only_creates() {
        let mut registry = ChartRegistry::new();
        let patches = registry.replace(ChartId::Speed, config("Morning"));
        assert_eq!(patches.len(), 1);
        assert!(matches!(
            patches[0],
            DomPatch::CreateChart {
                chart: ChartId::Speed,
                instance: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_replace_destroys_previous_instance_first() {
        let mut registry = ChartRegistry::new();
        registry.replace(ChartId::Borough, config("Queens"));
        let patches = registry.replace(ChartId::Borough, config("Bronx"));

        assert_eq!(
            patches[0],
            DomPatch::DestroyChart {
                chart: ChartId::Borough,
                instance: 1
            }
        );
        assert!(matches!(
            patches[1],
            DomPatch::CreateChart {
                chart: ChartId::Borough,
                instance: 2,
                ..
            }
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(ChartId::Borough).map(|h| h.config.labels()[0].as_str()),
            Some("Bronx")
        );
    }

    #[test]
    fn test_refresh_all_covers_each_live_chart() {
        let mut registry = ChartRegistry::new();
        assert!(registry.refresh_all().is_empty());

        registry.replace(ChartId::Borough, config("Queens"));
        registry.replace(ChartId::Hourly, config("08:00"));
        let refreshed: Vec<ChartId> = registry
            .refresh_all()
            .into_iter()
            .filter_map(|p| match p {
                DomPatch::RefreshChart { chart, .. } => Some(chart),
                _ => None,
            })
            .collect();
        assert_eq!(refreshed, vec![ChartId::Borough, ChartId::Hourly]);
    }

    #[test]
    fn test_dispose_missing_chart_is_noop() {
        let mut registry = ChartRegistry::new();
        assert!(registry.dispose(ChartId::Speed).is_none());
        assert!(registry.is_empty());
    }
}
