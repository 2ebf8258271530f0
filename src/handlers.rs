use crate::app::AppState;
use crate::assessment::{AssessmentDraft, DraftField, FormOptions};
use crate::error::{AppError, AppResult};
use crate::models::{
    DashboardResponse, FieldUpdate, HealthResponse, LoginRequest, SessionResponse,
};
use crate::session::FlowState;
use axum::{
    extract::{Json, State},
    response::Json as ResponseJson,
};
use tracing::{debug, info};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Option lists for the industry and business type selects
pub async fn form_options() -> ResponseJson<FormOptions> {
    ResponseJson(FormOptions::standard())
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<ResponseJson<SessionResponse>> {
    info!("Login requested as {:?}", payload.user_type);

    let mut session = state.session.lock().await;
    session.login(payload.user_type)?;

    Ok(ResponseJson(SessionResponse::from_session(&session)))
}

pub async fn session_status(State(state): State<AppState>) -> ResponseJson<SessionResponse> {
    let session = state.session.lock().await;
    ResponseJson(SessionResponse::from_session(&session))
}

/// Tears the session down, stored assessment included
pub async fn logout(State(state): State<AppState>) -> AppResult<ResponseJson<SessionResponse>> {
    let mut session = state.session.lock().await;
    session.logout()?;

    info!("Session logged out");
    Ok(ResponseJson(SessionResponse::from_session(&session)))
}

pub async fn get_draft(State(state): State<AppState>) -> ResponseJson<AssessmentDraft> {
    let session = state.session.lock().await;
    ResponseJson(session.draft().clone())
}

/// Stores one raw form value; the value itself is not validated
pub async fn update_draft(
    State(state): State<AppState>,
    Json(payload): Json<FieldUpdate>,
) -> AppResult<ResponseJson<AssessmentDraft>> {
    let field: DraftField = payload.name.parse()?;
    debug!("Updating draft field {}", field);

    let mut session = state.session.lock().await;
    session.update_field(field, payload.value)?;

    Ok(ResponseJson(session.draft().clone()))
}

pub async fn cancel_assessment(
    State(state): State<AppState>,
) -> AppResult<ResponseJson<SessionResponse>> {
    let mut session = state.session.lock().await;
    session.back_to_login()?;

    Ok(ResponseJson(SessionResponse::from_session(&session)))
}

/// Submits the draft to the scoring service and returns the dashboard on success.
///
/// Blank required fields are rejected before any call is made. A failed call
/// leaves the applicant on the form with the draft intact.
pub async fn submit_assessment(
    State(state): State<AppState>,
) -> AppResult<ResponseJson<DashboardResponse>> {
    info!("Assessment submission requested");

    let submitted = state.session.submit(state.scoring.clone()).await?;

    info!(
        "Assessment complete: approved={}, score={}",
        submitted.view.is_approved, submitted.view.empowr_score
    );

    Ok(ResponseJson(DashboardResponse::new(
        submitted.user_type,
        Some(submitted.view),
    )))
}

pub async fn dashboard(State(state): State<AppState>) -> AppResult<ResponseJson<DashboardResponse>> {
    let session = state.session.lock().await;
    if session.state() != FlowState::Dashboard {
        return Err(AppError::Conflict(format!(
            "dashboard is not available in state {:?}",
            session.state()
        )));
    }

    Ok(ResponseJson(DashboardResponse::new(
        session.user_type(),
        session.assessment_view(),
    )))
}
