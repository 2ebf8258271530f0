use crate::app::AppState;
use crate::handlers::{
    cancel_assessment, dashboard, form_options, get_draft, health_check, login, logout,
    session_status, submit_assessment, update_draft,
};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/session", get(session_status))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .route("/api/assessment/options", get(form_options))
        .route("/api/assessment/draft", get(get_draft).put(update_draft))
        .route("/api/assessment/cancel", post(cancel_assessment))
        .route("/api/assessment/submit", post(submit_assessment))
        .route("/api/dashboard", get(dashboard))
}
