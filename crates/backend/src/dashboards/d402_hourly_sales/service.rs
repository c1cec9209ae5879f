use chrono::NaiveTime;
use contracts::dashboards::d402_hourly_sales::{
    AnalysisResponse, StaffingProjection, StaffingRequest,
};

use super::commentary::{self, CommentaryRules};
use super::error::DashboardResult;
use super::session::DashboardSession;
use super::staffing::{self, StaffingInput};
use super::{charts, metrics};
use crate::shared::config::Config;
use crate::shared::indicators::metadata;
use crate::shared::indicators::registry::IndicatorRegistry;

/// Resolved dashboard settings (config values parsed once at startup)
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub currency_symbol: String,
    pub closing_time: NaiveTime,
    pub staff_count: u32,
    pub max_upload_bytes: usize,
    pub commentary: CommentaryRules,
}

impl DashboardSettings {
    pub fn from_config(config: &Config) -> DashboardResult<Self> {
        Ok(Self {
            currency_symbol: config.dashboard.currency_symbol.clone(),
            closing_time: staffing::parse_time_of_day(&config.dashboard.closing_time)?,
            staff_count: config.dashboard.staff_count,
            max_upload_bytes: config.dashboard.max_upload_bytes,
            commentary: CommentaryRules::from_config(&config.commentary),
        })
    }
}

/// Full recompute over the confirmed dataset: rows, summary, indicators,
/// charts and commentary.
pub fn get_analysis(
    session: &DashboardSession,
    settings: &DashboardSettings,
    registry: &IndicatorRegistry,
) -> DashboardResult<AnalysisResponse> {
    let dataset = session.confirmed_dataset()?;
    let derived = metrics::derive(&dataset.rows)?;

    let indicators = registry.compute(&metadata::summary_set(), &derived.summary);
    let charts = charts::build_all(&derived.rows);
    let commentary = commentary::generate(&derived.rows, &settings.commentary);

    Ok(AnalysisResponse {
        dataset_id: dataset.id,
        summary: derived.summary,
        indicators,
        rows: derived.rows,
        charts,
        commentary,
    })
}

/// Remaining-time projection against the confirmed dataset's totals.
/// Fields missing from the request fall back to `now` and the configured defaults.
pub fn get_staffing_projection(
    session: &DashboardSession,
    settings: &DashboardSettings,
    request: &StaffingRequest,
    now: NaiveTime,
) -> DashboardResult<StaffingProjection> {
    let dataset = session.confirmed_dataset()?;
    let summary = metrics::derive(&dataset.rows)?.summary;

    let current_time = match request.current_time.as_deref() {
        Some(raw) => staffing::parse_time_of_day(raw)?,
        None => now,
    };
    let closing_time = match request.closing_time.as_deref() {
        Some(raw) => staffing::parse_time_of_day(raw)?,
        None => settings.closing_time,
    };

    let input = StaffingInput {
        current_time,
        closing_time,
        staff_count: request.staff_count.unwrap_or(settings.staff_count),
        grand_total_target: summary.grand_total_target,
        grand_total_sales: summary.grand_total_sales,
    };

    staffing::project(&input, &settings.currency_symbol)
}
