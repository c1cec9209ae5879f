use std::sync::Arc;

use crate::dashboards::d402_hourly_sales::service::DashboardSettings;
use crate::dashboards::d402_hourly_sales::DashboardSession;
use crate::shared::config::Config;
use crate::shared::indicators::registry::IndicatorRegistry;

/// Application state shared by all handlers through axum `State`
#[derive(Clone)]
pub struct AppState {
    pub session: DashboardSession,
    pub settings: Arc<DashboardSettings>,
    pub indicators: Arc<IndicatorRegistry>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let settings = DashboardSettings::from_config(config)
            .map_err(|e| anyhow::anyhow!("invalid dashboard config: {e}"))?;
        let indicators = IndicatorRegistry::new(&settings.currency_symbol);

        Ok(Self {
            session: DashboardSession::new(),
            settings: Arc::new(settings),
            indicators: Arc::new(indicators),
        })
    }
}
