//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::adapters::SubmittedStreamsAdapter;
use crate::error::ApiError;
use crate::web::protocol::{
    AdherenceStateDto, DayEntryDto, EventStreamDto, GridCellDto, HealthResponse,
    NextActivityDto, ReportRowDto, SessionCompletionStateDto, TimeWindowDto,
    WeeklyReportRequest, WeeklyReportResponse,
};
use crate::web::state::AppState;
use adherence_core::WeeklyReportGenerator;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        weekly_report_handler,
    ),
    components(
        schemas(
            HealthResponse,
            WeeklyReportRequest,
            AdherenceStateDto,
            EventStreamDto,
            DayEntryDto,
            TimeWindowDto,
            SessionCompletionStateDto,
            WeeklyReportResponse,
            GridCellDto,
            ReportRowDto,
            NextActivityDto,
        )
    ),
    tags(
        (name = "Adherence Reports API", description = "Weekly adherence reports built from participant event streams.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Report that the service is up.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Generate the participant's weekly adherence report.
///
/// Accepts the participant's adherence state and their already-computed event
/// streams, and returns a dense 7-day grid with one cell per row per day.
#[utoipa::path(
    post,
    path = "/v1/reports/weekly",
    request_body = WeeklyReportRequest,
    responses(
        (status = 200, description = "Report generated", body = WeeklyReportResponse),
        (status = 400, description = "Malformed JSON payload"),
        (status = 422, description = "Event streams violate their contract (e.g., an entry with no start day)"),
        (status = 502, description = "Event stream collaborator failed")
    )
)]
pub async fn weekly_report_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<WeeklyReportRequest>,
) -> Result<Json<WeeklyReportResponse>, ApiError> {
    let (state, streams) = request.into_domain();
    let generator = WeeklyReportGenerator::new(
        Arc::new(SubmittedStreamsAdapter::new(streams)),
        app_state.calculator.clone(),
    );

    let report = generator.generate(&state)?;
    info!(
        rows = report.rows.len(),
        percent = report.weekly_adherence_percent,
        "Served weekly adherence report"
    );
    Ok(Json(report.into()))
}
