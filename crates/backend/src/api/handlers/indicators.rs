use axum::{extract::State, Json};
use contracts::shared::indicators::IndicatorCatalogResponse;

use crate::shared::app_state::AppState;

/// GET /api/d402/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog(State(state): State<AppState>) -> Json<IndicatorCatalogResponse> {
    Json(state.indicators.catalog().clone())
}
