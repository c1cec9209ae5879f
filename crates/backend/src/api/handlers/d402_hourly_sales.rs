use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d402_hourly_sales::{
    AnalysisResponse, Dataset, ErrorResponse, LoadState, SalesRow, StaffingProjection,
    StaffingRequest, TemplateRequest,
};

use crate::dashboards::d402_hourly_sales::session::NO_DATASET_MESSAGE;
use crate::dashboards::d402_hourly_sales::{service, source, DashboardError};
use crate::shared::app_state::AppState;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Parse(_) => StatusCode::BAD_REQUEST,
            DashboardError::NotLoaded(_) => StatusCode::CONFLICT,
            DashboardError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("D402 Dashboard: {}", self);
        } else {
            tracing::warn!("D402 Dashboard: {}", self);
        }

        let message = match &self {
            DashboardError::Parse(m)
            | DashboardError::NotLoaded(m)
            | DashboardError::Configuration(m)
            | DashboardError::Internal(m) => m.clone(),
        };
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// GET /api/d402/template
pub async fn get_template() -> Json<Vec<SalesRow>> {
    Json(source::template())
}

/// POST /api/d402/template
pub async fn submit_template(
    State(state): State<AppState>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<LoadState>, DashboardError> {
    tracing::info!(
        "D402 Dashboard: template submitted with {} rows",
        request.rows.len()
    );
    source::set_from_template(&state.session, request.rows)?;
    Ok(Json(state.session.state()?))
}

/// POST /api/d402/upload (multipart, field `file`)
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LoadState>, DashboardError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DashboardError::parse(format!("invalid multipart body: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DashboardError::parse(format!("failed to read upload: {e}")))?;
        if bytes.len() > state.settings.max_upload_bytes {
            return Err(DashboardError::parse(format!(
                "file is {} bytes, limit is {}",
                bytes.len(),
                state.settings.max_upload_bytes
            )));
        }

        tracing::info!(
            "D402 Dashboard: received upload {:?} ({} bytes)",
            file_name,
            bytes.len()
        );
        source::set_from_upload(&state.session, file_name, &bytes)?;
        return Ok(Json(state.session.state()?));
    }

    Err(DashboardError::parse("multipart body has no file field"))
}

/// POST /api/d402/confirm
pub async fn confirm(State(state): State<AppState>) -> Result<Json<LoadState>, DashboardError> {
    Ok(Json(state.session.confirm()?))
}

/// GET /api/d402/state
pub async fn get_state(State(state): State<AppState>) -> Result<Json<LoadState>, DashboardError> {
    Ok(Json(state.session.state()?))
}

/// GET /api/d402/dataset
pub async fn get_dataset(State(state): State<AppState>) -> Result<Json<Dataset>, DashboardError> {
    match state.session.dataset()? {
        Some(dataset) => Ok(Json(dataset)),
        None => Err(DashboardError::NotLoaded(NO_DATASET_MESSAGE.to_string())),
    }
}

/// GET /api/d402/analysis
pub async fn get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, DashboardError> {
    let response = service::get_analysis(&state.session, &state.settings, &state.indicators)?;
    tracing::info!(
        "D402 Dashboard: returning analysis of {} rows for dataset {}",
        response.rows.len(),
        response.dataset_id
    );
    Ok(Json(response))
}

/// POST /api/d402/staffing
pub async fn compute_staffing(
    State(state): State<AppState>,
    Json(request): Json<StaffingRequest>,
) -> Result<Json<StaffingProjection>, DashboardError> {
    let now = chrono::Local::now().time();
    let projection =
        service::get_staffing_projection(&state.session, &state.settings, &request, now)?;
    Ok(Json(projection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;

    fn state() -> AppState {
        AppState::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_template_confirm_analysis_flow() {
        let state = state();

        let err = get_analysis(State(state.clone())).await.unwrap_err();
        assert_eq!(err.kind(), "not_loaded");

        let Json(template) = get_template().await;
        let Json(loaded) = submit_template(
            State(state.clone()),
            Json(TemplateRequest { rows: template }),
        )
        .await
        .unwrap();
        assert_eq!(loaded.row_count, 10);
        assert!(!loaded.loaded);

        let Json(confirmed) = confirm(State(state.clone())).await.unwrap();
        assert!(confirmed.loaded);

        let Json(analysis) = get_analysis(State(state.clone())).await.unwrap();
        assert_eq!(analysis.summary.grand_total_sales, 22800.0);
        assert_eq!(Some(analysis.dataset_id), confirmed.dataset_id);
    }

    #[tokio::test]
    async fn test_staffing_endpoint() {
        let state = state();
        submit_template(
            State(state.clone()),
            Json(TemplateRequest {
                rows: vec![SalesRow::new("18時", 8000.0, 4000.0, 90, 15000.0)],
            }),
        )
        .await
        .unwrap();
        confirm(State(state.clone())).await.unwrap();

        let request = StaffingRequest {
            current_time: Some("18:00".into()),
            closing_time: Some("20:00".into()),
            staff_count: Some(3),
        };
        let Json(projection) = compute_staffing(State(state.clone()), Json(request))
            .await
            .unwrap();
        assert_eq!(projection.required_per_hour_display, "¥1,500");
        assert_eq!(projection.required_per_staff_display, "¥500");

        let request = StaffingRequest {
            current_time: Some("20:00".into()),
            closing_time: Some("20:00".into()),
            staff_count: Some(3),
        };
        let err = compute_staffing(State(state), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "configuration_error");
    }

    #[tokio::test]
    async fn test_dataset_and_confirm_without_data() {
        let state = state();
        assert!(get_dataset(State(state.clone())).await.is_err());
        let err = confirm(State(state.clone())).await.unwrap_err();
        assert!(matches!(err, DashboardError::NotLoaded(_)));
        let Json(load_state) = get_state(State(state)).await.unwrap();
        assert!(!load_state.loaded);
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (DashboardError::parse("x"), StatusCode::BAD_REQUEST),
            (
                DashboardError::NotLoaded("x".into()),
                StatusCode::CONFLICT,
            ),
            (
                DashboardError::configuration("x"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DashboardError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
