use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

/// Reads `config/dashboard.*` when present; `DASHBOARD__API__BASE_URL` overrides it.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_config_from("config/dashboard")
}

fn load_config_from(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
