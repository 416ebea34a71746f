// Single-task UI loop: input events and finished loads are handled in turn
use crate::application::dashboard_controller::{DashboardController, Loaded, PendingLoad, fetch};
use crate::application::stats_api::StatsApi;
use crate::presentation::dom::Document;
use crate::presentation::events::UiEvent;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Queries whose JSON is printed as it arrives instead of rendered
#[derive(Debug, Clone, Copy)]
enum RawQuery {
    TopExpensive(u32),
    BoroughRevenue,
}

impl RawQuery {
    fn label(self) -> &'static str {
        match self {
            RawQuery::TopExpensive(_) => "top-expensive",
            RawQuery::BoroughRevenue => "borough-custom",
        }
    }
}

/// Work a command hands back to the loop
enum Work {
    Load(PendingLoad),
    Raw(RawQuery),
}

/// Results coming back from spawned tasks
enum Completion {
    /// `None` when the load was cancelled in flight
    Load(PendingLoad, Option<Loaded>),
    Raw(RawQuery, Option<serde_json::Value>),
}

/// Fetches off the loop task. Rendering stays on the loop.
fn spawn_load(api: Arc<dyn StatsApi>, pending: PendingLoad, tx: mpsc::Sender<Completion>) {
    tokio::spawn(async move {
        let token = pending.token().clone();
        let loaded = tokio::select! {
            _ = token.cancelled() => None,
            loaded = fetch(api.as_ref(), pending.request()) => Some(loaded),
        };
        let _ = tx.send(Completion::Load(pending, loaded)).await;
    });
}

fn spawn_raw(api: Arc<dyn StatsApi>, query: RawQuery, tx: mpsc::Sender<Completion>) {
    tokio::spawn(async move {
        let value = match query {
            RawQuery::TopExpensive(n) => api.top_expensive_trips(n).await,
            RawQuery::BoroughRevenue => api.custom_borough_revenue().await,
        };
        let _ = tx.send(Completion::Raw(query, value)).await;
    });
}

/// Mounts the dashboard and processes commands until `quit`, or until the
/// input ends and every outstanding load has come back.
pub async fn run_event_loop<D, R, W>(
    controller: &mut DashboardController<D>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    D: Document + Display,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::channel::<Completion>(32);
    let mut lines = input.lines();
    let mut input_open = true;
    let mut in_flight = 0usize;

    let pending = controller.mount();
    spawn_load(controller.api(), pending, tx.clone());
    in_flight += 1;
    writeln!(out, "{}", controller.document())?;

    while input_open || in_flight > 0 {
        tokio::select! {
            Some(completion) = rx.recv(), if in_flight > 0 => {
                in_flight -= 1;
                match completion {
                    Completion::Load(pending, Some(loaded)) => {
                        if let Some(next) = controller.complete(pending, loaded) {
                            spawn_load(controller.api(), next, tx.clone());
                            in_flight += 1;
                        }
                        writeln!(out, "{}", controller.document())?;
                    }
                    Completion::Load(_, None) => {}
                    Completion::Raw(query, value) => write_raw(out, query.label(), value)?,
                }
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    tracing::debug!("Input closed, waiting for {} request(s)", in_flight);
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<UiEvent>() {
                    Ok(UiEvent::Quit) => break,
                    Ok(event) => {
                        match handle_event(controller, event, out)? {
                            Some(Work::Load(pending)) => spawn_load(controller.api(), pending, tx.clone()),
                            Some(Work::Raw(query)) => spawn_raw(controller.api(), query, tx.clone()),
                            None => continue,
                        }
                        in_flight += 1;
                    }
                    Err(e) => tracing::warn!("Ignoring '{}': {}", line.trim(), e),
                }
            }
        }
    }

    Ok(())
}

/// Applies a command's immediate effect. Nothing here waits on the backend.
fn handle_event<D, W>(
    controller: &mut DashboardController<D>,
    event: UiEvent,
    out: &mut W,
) -> anyhow::Result<Option<Work>>
where
    D: Document + Display,
    W: Write,
{
    let work = match event {
        UiEvent::Navigate(view) => Some(Work::Load(controller.navigate(view))),
        UiEvent::ToggleTheme => {
            controller.toggle_theme();
            None
        }
        UiEvent::BoroughFilter(borough) => Some(Work::Load(controller.set_borough_filter(borough))),
        UiEvent::SortField(field) => Some(Work::Load(controller.set_sort_field(field))),
        UiEvent::TopExpensive(n) => return Ok(Some(Work::Raw(RawQuery::TopExpensive(n)))),
        UiEvent::BoroughRevenue => return Ok(Some(Work::Raw(RawQuery::BoroughRevenue))),
        UiEvent::Show | UiEvent::Quit => None,
    };

    writeln!(out, "{}", controller.document())?;
    Ok(work)
}

fn write_raw<W: Write>(out: &mut W, label: &str, value: Option<serde_json::Value>) -> anyhow::Result<()> {
    match value {
        Some(value) => writeln!(out, "-- {}\n{}", label, serde_json::to_string_pretty(&value)?)?,
        None => writeln!(out, "-- {}: no data available", label)?,
    }
    Ok(())
}
