// Application layer - Data seam, chart lifecycle and view coordination
pub mod chart_registry;
pub mod dashboard_controller;
pub mod stats_api;

#[cfg(test)]
pub mod fake_api;
