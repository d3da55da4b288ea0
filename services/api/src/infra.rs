use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use promotion_dashboard::config::DatasetConfig;
use promotion_dashboard::dataset::DatasetLoader;
use promotion_dashboard::error::AppError;
use promotion_dashboard::report::Dashboard;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dashboard: Arc<Dashboard>,
}

/// Loads the dataset and precomputes every static view.
pub(crate) fn load_dashboard(config: &DatasetConfig) -> Result<Dashboard, AppError> {
    let dataset = DatasetLoader::from_path(&config.path)?;
    Ok(Dashboard::build(
        Arc::new(dataset),
        config.dashboard_settings(),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
