// Domain layer - Backend payloads and view state
pub mod chart;
pub mod stats;
pub mod trips;
pub mod view;
