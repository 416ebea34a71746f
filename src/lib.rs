//! Client side of the trip statistics dashboard: a typed API client for the
//! statistics backend and a controller that turns fetched data into DOM
//! updates for three views (dashboard, analytics, data quality).
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
