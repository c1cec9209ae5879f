use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::shared::app_state::AppState;

/// Multipart framing overhead allowed on top of the configured file limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    let upload_limit = state.settings.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D402 Hourly Sales Dashboard
        // ========================================
        .route(
            "/api/d402/template",
            get(handlers::d402_hourly_sales::get_template)
                .post(handlers::d402_hourly_sales::submit_template),
        )
        .route(
            "/api/d402/upload",
            post(handlers::d402_hourly_sales::upload_csv)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/d402/confirm",
            post(handlers::d402_hourly_sales::confirm),
        )
        .route("/api/d402/state", get(handlers::d402_hourly_sales::get_state))
        .route(
            "/api/d402/dataset",
            get(handlers::d402_hourly_sales::get_dataset),
        )
        .route(
            "/api/d402/analysis",
            get(handlers::d402_hourly_sales::get_analysis),
        )
        .route(
            "/api/d402/staffing",
            post(handlers::d402_hourly_sales::compute_staffing),
        )
        .route(
            "/api/d402/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .with_state(state)
}
